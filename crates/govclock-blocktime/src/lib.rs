//! govclock-blocktime
//!
//! Block height ↔ wall-clock conversions for a network with a fixed block
//! time, plus a bounded memo for render-heavy call sites that convert the
//! same block counts over and over.

pub mod cache;
pub mod convert;
pub mod format;

pub use cache::{FormattedDuration, TimeConversionCache};
pub use convert::BlockTimeConverter;
pub use format::format_duration;

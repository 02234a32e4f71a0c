//! govclock-curve
//!
//! Off-chain evaluation of referenda threshold curves. Arithmetic follows the
//! on-chain fixed-point rules (perbill scale, integer division) so thresholds
//! shown in charts match what the runtime enforces.
//!
//! Evaluation never fails: malformed curve parameters degrade to a fallback
//! value and the reason is carried in [`CurveOutcome`].

pub mod delay;
pub mod evaluate;
mod fixed;

pub use delay::delay;
pub use evaluate::{evaluate, is_passing, threshold, CurveFault, CurveOutcome};

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{NetworkConfig, NetworkRegistry, TrackInfo};
pub use constants::*;
pub use error::GovclockError;
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovclockError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("block time must be greater than zero (network: {network})")]
    InvalidBlockTime { network: String },

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("unknown track {track} on network {network}")]
    UnknownTrack { network: String, track: String },

    #[error("{period} is not configured for network {network}")]
    PeriodNotConfigured { network: String, period: &'static str },

    #[error("conviction must be between 0 and {max}; got {got}")]
    InvalidConviction { max: u8, got: u8 },

    // ── Time arithmetic ──────────────────────────────────────────────────────
    #[error("date out of range: offset of {offset_ms} ms cannot be represented")]
    DateOutOfRange { offset_ms: i128 },

    // ── Loading ──────────────────────────────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    // ── General ──────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for GovclockError {
    fn from(e: serde_json::Error) -> Self {
        GovclockError::Serialization(e.to_string())
    }
}

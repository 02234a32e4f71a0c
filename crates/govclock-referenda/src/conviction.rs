//! Conviction voting lock expiry.
//!
//! A vote cast with conviction `Nx` keeps the voter's balance locked for
//! `2^(N-1)` vote-locking periods after the referendum ends. Conviction 0
//! carries no lock.

use govclock_blocktime::BlockTimeConverter;
use govclock_core::constants::MAX_CONVICTION;
use govclock_core::error::GovclockError;
use govclock_core::types::{BlockDuration, BlockNumber, Instant};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Conviction {
    None,
    Locked1x,
    Locked2x,
    Locked3x,
    Locked4x,
    Locked5x,
    Locked6x,
}

impl Conviction {
    pub fn from_level(level: u8) -> Result<Self, GovclockError> {
        Ok(match level {
            0 => Conviction::None,
            1 => Conviction::Locked1x,
            2 => Conviction::Locked2x,
            3 => Conviction::Locked3x,
            4 => Conviction::Locked4x,
            5 => Conviction::Locked5x,
            6 => Conviction::Locked6x,
            got => {
                return Err(GovclockError::InvalidConviction {
                    max: MAX_CONVICTION,
                    got,
                })
            }
        })
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    /// Number of vote-locking periods the balance stays locked.
    pub fn lock_periods(self) -> u64 {
        match self {
            Conviction::None => 0,
            other => 1 << (other.level() - 1),
        }
    }

    /// Voting weight relative to the locked balance.
    pub fn votes_multiplier(self) -> f64 {
        match self {
            Conviction::None => 0.1,
            other => other.level() as f64,
        }
    }
}

impl fmt::Display for Conviction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conviction::None => f.write_str("0.1x"),
            other => write!(f, "{}x", other.level()),
        }
    }
}

/// Block at which a vote's lock expires.
pub fn unlock_block(
    vote_end_block: BlockNumber,
    conviction: Conviction,
    vote_locking_period: BlockNumber,
) -> BlockNumber {
    vote_end_block.saturating_add(conviction.lock_periods().saturating_mul(vote_locking_period))
}

/// Expiry of a conviction lock, relative to the current chain head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteLock {
    pub conviction: Conviction,
    pub unlock_block: BlockNumber,
    pub unlock_at: Instant,
    /// Time left until unlock; `None` once the lock has expired.
    pub remaining: Option<BlockDuration>,
}

impl VoteLock {
    pub fn is_unlocked(&self) -> bool {
        self.remaining.is_none()
    }
}

pub fn estimate_unlock(
    converter: &BlockTimeConverter,
    current_block: BlockNumber,
    vote_end_block: BlockNumber,
    conviction: Conviction,
    vote_locking_period: BlockNumber,
    now: Instant,
) -> Result<VoteLock, GovclockError> {
    let unlock_block = unlock_block(vote_end_block, conviction, vote_locking_period);
    let unlock_at = converter.block_to_date(current_block, unlock_block, now)?;
    let remaining = (unlock_block > current_block)
        .then(|| converter.blocks_to_duration(unlock_block - current_block));
    Ok(VoteLock {
        conviction,
        unlock_block,
        unlock_at,
        remaining,
    })
}

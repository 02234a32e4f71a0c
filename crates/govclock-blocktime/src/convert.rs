use chrono::Duration;
use govclock_core::constants::{
    DEFAULT_FUTURE_BLOCK_OFFSET, MIN_DISPLAY_MINUTES, MS_PER_DAY, MS_PER_SECOND, SECS_PER_DAY,
    SECS_PER_HOUR, SECS_PER_MINUTE,
};
use govclock_core::error::GovclockError;
use govclock_core::types::{BlockDuration, BlockNumber, Instant, NetworkTimeConfig};
use tracing::debug;

/// Converts between block counts and wall-clock time for one network.
///
/// Construction validates the block time, so every method on a converter is
/// infallible except where a date leaves chrono's representable range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTimeConverter {
    network: String,
    block_time_ms: u64,
}

impl BlockTimeConverter {
    pub fn new(config: &NetworkTimeConfig) -> Result<Self, GovclockError> {
        if config.block_time_ms == 0 {
            return Err(GovclockError::InvalidBlockTime {
                network: config.network.clone(),
            });
        }
        Ok(Self {
            network: config.network.clone(),
            block_time_ms: config.block_time_ms,
        })
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn block_time_ms(&self) -> u64 {
        self.block_time_ms
    }

    /// Blocks produced per 24 hours. Fractional when the block time does not divide a day.
    pub fn blocks_per_day(&self) -> f64 {
        MS_PER_DAY as f64 / self.block_time_ms as f64
    }

    /// Break `blocks` down into days, hours and minutes.
    ///
    /// Anything under a minute reports `minutes == 1` so countdowns never show zero.
    pub fn blocks_to_duration(&self, blocks: BlockNumber) -> BlockDuration {
        let total_seconds = blocks.saturating_mul(self.block_time_ms) / MS_PER_SECOND;
        let days = total_seconds / SECS_PER_DAY;
        let remainder = total_seconds % SECS_PER_DAY;
        let hours = remainder / SECS_PER_HOUR;
        let minutes = if total_seconds < SECS_PER_MINUTE {
            MIN_DISPLAY_MINUTES
        } else {
            (remainder % SECS_PER_HOUR) / SECS_PER_MINUTE
        };
        BlockDuration {
            total_seconds,
            days,
            hours,
            minutes,
        }
    }

    /// Length of `blocks` in whole minutes. Zero blocks is zero minutes.
    pub fn blocks_to_minutes(&self, blocks: BlockNumber) -> u64 {
        if blocks == 0 {
            return 0;
        }
        self.blocks_to_duration(blocks).total_minutes()
    }

    /// Wall-clock instant at which `target_block` was (or will be) produced,
    /// extrapolated from `current_block` observed at `now`.
    pub fn block_to_date(
        &self,
        current_block: BlockNumber,
        target_block: BlockNumber,
        now: Instant,
    ) -> Result<Instant, GovclockError> {
        let offset_ms = (target_block as i128 - current_block as i128)
            .saturating_mul(self.block_time_ms as i128);
        i64::try_from(offset_ms)
            .ok()
            .and_then(Duration::try_milliseconds)
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or(GovclockError::DateOutOfRange { offset_ms })
    }

    /// Block height expected at `target`, extrapolated from `current_block_height` at `now`.
    ///
    /// A zero difference is replaced by a fixed look-ahead of
    /// `DEFAULT_FUTURE_BLOCK_OFFSET` blocks. Past targets saturate at block zero.
    pub fn date_to_blocks(
        &self,
        current_block_height: BlockNumber,
        target: Instant,
        now: Instant,
    ) -> BlockNumber {
        let diff_days = (target - now).num_milliseconds() as f64 / MS_PER_DAY as f64;
        let mut diff_blocks = (diff_days * self.blocks_per_day()).round() as i64;
        if diff_blocks == 0 {
            debug!(
                network = %self.network,
                current_block_height,
                "zero block difference; using default look-ahead"
            );
            diff_blocks = DEFAULT_FUTURE_BLOCK_OFFSET as i64;
        }
        current_block_height.saturating_add_signed(diff_blocks)
    }
}

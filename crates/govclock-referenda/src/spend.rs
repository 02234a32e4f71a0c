use govclock_blocktime::BlockTimeConverter;
use govclock_core::error::GovclockError;
use govclock_core::types::{BlockDuration, BlockNumber, Instant};
use serde::Serialize;

/// Position within the treasury's recurring spend period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendPeriodStatus {
    pub period_blocks: BlockNumber,
    pub elapsed_blocks: BlockNumber,
    pub remaining_blocks: BlockNumber,
    /// Percentage of the current period elapsed, in `[0, 100)`.
    pub percent: f64,
    pub remaining: BlockDuration,
    pub next_payout_at: Instant,
}

/// Spend periods start at block zero and repeat every `spend_period_blocks`.
pub fn spend_period_status(
    converter: &BlockTimeConverter,
    current_block: BlockNumber,
    spend_period_blocks: BlockNumber,
    now: Instant,
) -> Result<SpendPeriodStatus, GovclockError> {
    if spend_period_blocks == 0 {
        return Err(GovclockError::PeriodNotConfigured {
            network: converter.network().to_string(),
            period: "spend period",
        });
    }
    let elapsed_blocks = current_block % spend_period_blocks;
    let remaining_blocks = spend_period_blocks - elapsed_blocks;
    let next_payout_at =
        converter.block_to_date(current_block, current_block.saturating_add(remaining_blocks), now)?;

    Ok(SpendPeriodStatus {
        period_blocks: spend_period_blocks,
        elapsed_blocks,
        remaining_blocks,
        percent: elapsed_blocks as f64 / spend_period_blocks as f64 * 100.0,
        remaining: converter.blocks_to_duration(remaining_blocks),
        next_payout_at,
    })
}

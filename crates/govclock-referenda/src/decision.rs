use chrono::Duration;
use govclock_blocktime::BlockTimeConverter;
use govclock_core::constants::MS_PER_SECOND;
use govclock_core::types::{Instant, TrackPeriods};
use govclock_curve::{delay, threshold};
use serde::Serialize;
use tracing::warn;

/// Where a referendum stands against its track's curves at one moment.
///
/// All values are fractions in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionStatus {
    pub elapsed_fraction: f64,
    pub approval: f64,
    pub support: f64,
    pub approval_threshold: f64,
    pub support_threshold: f64,
}

impl DecisionStatus {
    pub fn at(track: &TrackPeriods, elapsed_fraction: f64, approval: f64, support: f64) -> Self {
        let elapsed_fraction = elapsed_fraction.clamp(0.0, 1.0);
        Self {
            elapsed_fraction,
            approval,
            support,
            approval_threshold: threshold(&track.min_approval, elapsed_fraction),
            support_threshold: threshold(&track.min_support, elapsed_fraction),
        }
    }

    pub fn approval_met(&self) -> bool {
        self.approval >= self.approval_threshold
    }

    pub fn support_met(&self) -> bool {
        self.support >= self.support_threshold
    }

    /// Both thresholds met; the referendum may enter (or stay in) confirmation.
    pub fn is_passing(&self) -> bool {
        self.approval_met() && self.support_met()
    }
}

/// Fraction of the decision period elapsed at `now` for a decision that began
/// at `decision_started_at`. Zero-length periods count as fully elapsed.
pub fn elapsed_fraction(
    converter: &BlockTimeConverter,
    decision_period_blocks: u64,
    decision_started_at: Instant,
    now: Instant,
) -> f64 {
    let period_ms = decision_period_blocks.saturating_mul(converter.block_time_ms()) as f64;
    if period_ms <= 0.0 {
        return 1.0;
    }
    let done_ms = (now - decision_started_at).num_milliseconds() as f64;
    (done_ms / period_ms).clamp(0.0, 1.0)
}

/// Earliest instant at which both curves fall to the current tallies.
///
/// `None` when either curve stays above its tally for the whole decision
/// period, or when a curve could not be inverted.
pub fn estimated_pass_at(
    track: &TrackPeriods,
    converter: &BlockTimeConverter,
    decision_started_at: Instant,
    approval: f64,
    support: f64,
) -> Option<Instant> {
    let approval_delay = delay(&track.min_approval, approval);
    let support_delay = delay(&track.min_support, support);
    for (name, outcome) in [("approval", approval_delay), ("support", support_delay)] {
        if let Some(fault) = outcome.fault() {
            warn!(curve = name, %fault, "cannot invert curve; no pass estimate");
            return None;
        }
    }

    let x = approval_delay.value().max(support_delay.value());
    if x >= 1.0 && !DecisionStatus::at(track, 1.0, approval, support).is_passing() {
        return None;
    }

    let period_secs =
        track.decision_period.saturating_mul(converter.block_time_ms()) / MS_PER_SECOND;
    let offset_secs = (x * period_secs as f64).ceil() as i64;
    Duration::try_seconds(offset_secs).and_then(|d| decision_started_at.checked_add_signed(d))
}

//! govclock-referenda
//!
//! Referendum-facing computations built on the curve and block-time engines:
//! period progress, threshold overlays for tally charts, pass/fail status,
//! conviction vote-lock expiry and the treasury spend-period countdown.

pub mod conviction;
pub mod decision;
pub mod progress;
pub mod series;
pub mod spend;

pub use conviction::{estimate_unlock, unlock_block, Conviction, VoteLock};
pub use decision::{elapsed_fraction, estimated_pass_at, DecisionStatus};
pub use progress::PeriodProgressCalculator;
pub use series::ThresholdSeriesBuilder;
pub use spend::{spend_period_status, SpendPeriodStatus};

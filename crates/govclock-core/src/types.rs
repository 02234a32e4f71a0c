use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{PERBILL_SCALE, PERBILL_SCALE_F64};

/// Block height (or a count of blocks).
pub type BlockNumber = u64;

/// Wall-clock instant, always UTC.
pub type Instant = DateTime<Utc>;

// ── FixedPoint ───────────────────────────────────────────────────────────────

/// Signed fixed-point number scaled by 1_000_000_000 (on-chain `FixedI64`).
///
/// Perbill values are the non-negative subset: `FixedPoint::from_perbill(500_000_000)`
/// is one half. Curve offsets may legitimately be negative.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixedPoint(pub i64);

impl FixedPoint {
    pub const ZERO: FixedPoint = FixedPoint(0);
    pub const ONE: FixedPoint = FixedPoint(PERBILL_SCALE as i64);

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn from_perbill(parts: u32) -> Self {
        Self(parts as i64)
    }

    /// Whole percent, e.g. `from_percent(50)` == 0.5.
    pub const fn from_percent(percent: u32) -> Self {
        Self(percent as i64 * 10_000_000)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Widened raw value for intermediate arithmetic.
    pub const fn wide(self) -> i128 {
        self.0 as i128
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / PERBILL_SCALE_F64
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.9}", self.to_f64())
    }
}

impl fmt::Debug for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedPoint({})", self.0)
    }
}

// ── NetworkTimeConfig ────────────────────────────────────────────────────────

/// Per-network block production cadence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTimeConfig {
    /// Network key, e.g. "polkadot". Used to key cached conversions.
    pub network: String,
    /// Target block time in milliseconds. Must be greater than zero.
    pub block_time_ms: u64,
}

impl NetworkTimeConfig {
    pub fn new(network: impl Into<String>, block_time_ms: u64) -> Self {
        Self {
            network: network.into(),
            block_time_ms,
        }
    }
}

// ── Curves ───────────────────────────────────────────────────────────────────

/// Threshold curve as configured on-chain for a referenda track.
///
/// `x` is the elapsed fraction of the decision period; every field is a
/// [`FixedPoint`] on the perbill scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveSpec {
    /// `factor / (x + x_offset) + y_offset`
    #[serde(rename_all = "camelCase")]
    Reciprocal {
        factor: FixedPoint,
        x_offset: FixedPoint,
        y_offset: FixedPoint,
    },
    /// Straight line from `ceil` at `x = 0` down to `floor` at `x = length`, flat afterwards.
    #[serde(rename_all = "camelCase")]
    LinearDecreasing {
        length: FixedPoint,
        floor: FixedPoint,
        ceil: FixedPoint,
    },
    /// Starts at `begin`, drops by `step` every `period`, never below `end`.
    #[serde(rename_all = "camelCase")]
    SteppedDecreasing {
        begin: FixedPoint,
        end: FixedPoint,
        step: FixedPoint,
        period: FixedPoint,
    },
}

impl CurveSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            CurveSpec::Reciprocal { .. } => "reciprocal",
            CurveSpec::LinearDecreasing { .. } => "linearDecreasing",
            CurveSpec::SteppedDecreasing { .. } => "steppedDecreasing",
        }
    }
}

// ── Tracks ───────────────────────────────────────────────────────────────────

/// Period lengths (in blocks) and threshold curves of one governance track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPeriods {
    pub prepare_period: BlockNumber,
    pub decision_period: BlockNumber,
    pub confirm_period: BlockNumber,
    pub min_approval: CurveSpec,
    pub min_support: CurveSpec,
}

/// One of the three timed phases a referendum passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Prepare,
    Decision,
    Confirm,
}

impl PeriodKind {
    pub fn blocks(self, track: &TrackPeriods) -> BlockNumber {
        match self {
            PeriodKind::Prepare => track.prepare_period,
            PeriodKind::Decision => track.decision_period,
            PeriodKind::Confirm => track.confirm_period,
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PeriodKind::Prepare => "prepare",
            PeriodKind::Decision => "decision",
            PeriodKind::Confirm => "confirm",
        };
        f.write_str(s)
    }
}

// ── Durations ────────────────────────────────────────────────────────────────

/// Breakdown of a block count into calendar units.
///
/// `minutes` is the remainder after whole hours, except that anything shorter
/// than one minute is reported as one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDuration {
    pub total_seconds: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl BlockDuration {
    /// Whole minutes represented by the breakdown (days and hours included).
    pub fn total_minutes(&self) -> u64 {
        self.days * crate::constants::MINUTES_PER_DAY
            + self.hours * crate::constants::MINUTES_PER_HOUR
            + self.minutes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        };
        f.write_str(s)
    }
}

// ── Chart data ───────────────────────────────────────────────────────────────

/// Raw tally sample observed on-chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphPoint {
    pub timestamp: Instant,
    pub approval_percent: f64,
    pub support_percent: f64,
}

/// Point on a threshold overlay chart, percentages in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdPoint {
    pub hour_offset: f64,
    pub approval: f64,
    pub support: f64,
}

/// Progress through a referendum period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodProgress {
    pub passed_units: u64,
    pub total_units: u64,
    pub unit: TimeUnit,
    /// Percentage elapsed, in `[0, 100]`.
    pub percent: f64,
}

impl PeriodProgress {
    /// `"passed / total unit"`, e.g. `"3 / 28 days"`.
    pub fn label(&self) -> String {
        format!("{} / {} {}", self.passed_units, self.total_units, self.unit)
    }
}

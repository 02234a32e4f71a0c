use chrono::Duration;
use govclock_blocktime::BlockTimeConverter;
use govclock_core::constants::{MINUTES_PER_DAY, MINUTES_PER_HOUR};
use govclock_core::types::{Instant, PeriodKind, PeriodProgress, TimeUnit, TrackPeriods};
use tracing::debug;

/// Progress through the prepare, decision or confirm period of a referendum.
#[derive(Debug, Clone)]
pub struct PeriodProgressCalculator {
    converter: BlockTimeConverter,
}

impl PeriodProgressCalculator {
    pub fn new(converter: BlockTimeConverter) -> Self {
        Self { converter }
    }

    /// Configured length of `kind` on `track`, in minutes.
    pub fn total_minutes(&self, kind: PeriodKind, track: &TrackPeriods) -> u64 {
        self.converter.blocks_to_minutes(kind.blocks(track))
    }

    /// Progress at `now` of a period ending at `end_at`.
    ///
    /// A zero-length period or an unknown end reports zero progress.
    pub fn progress(
        &self,
        kind: PeriodKind,
        track: &TrackPeriods,
        end_at: Option<Instant>,
        now: Instant,
    ) -> PeriodProgress {
        let total = self.total_minutes(kind, track);
        let (passed, percent) = match end_at {
            Some(end_at) if total > 0 => elapsed(total, end_at, now),
            _ => (0, 0.0),
        };
        let (passed_units, total_units, unit) = to_display_units(passed, total);
        PeriodProgress {
            passed_units,
            total_units,
            unit,
            percent,
        }
    }

    pub fn percent(
        &self,
        kind: PeriodKind,
        track: &TrackPeriods,
        end_at: Option<Instant>,
        now: Instant,
    ) -> f64 {
        self.progress(kind, track, end_at, now).percent
    }

    /// `"passed / total unit"`.
    pub fn label(
        &self,
        kind: PeriodKind,
        track: &TrackPeriods,
        end_at: Option<Instant>,
        now: Instant,
    ) -> String {
        self.progress(kind, track, end_at, now).label()
    }
}

// (passed minutes clamped to [0, total], percent in [0, 100])
fn elapsed(total_minutes: u64, end_at: Instant, now: Instant) -> (u64, f64) {
    let start_at = i64::try_from(total_minutes)
        .ok()
        .and_then(Duration::try_minutes)
        .and_then(|length| end_at.checked_sub_signed(length));
    let Some(start_at) = start_at else {
        debug!(total_minutes, "period start not representable; treating as not started");
        return (0, 0.0);
    };

    if now >= end_at {
        return (total_minutes, 100.0);
    }
    if now <= start_at {
        return (0, 0.0);
    }
    let span_ms = (end_at - start_at).num_milliseconds() as f64;
    let done_ms = (now - start_at).num_milliseconds() as f64;
    let percent = (done_ms / span_ms * 100.0).clamp(0.0, 100.0);
    let passed = ((now - start_at).num_minutes().max(0) as u64).min(total_minutes);
    (passed, percent)
}

fn to_display_units(passed: u64, total: u64) -> (u64, u64, TimeUnit) {
    if total < MINUTES_PER_HOUR {
        (passed, total, TimeUnit::Minutes)
    } else if total < MINUTES_PER_DAY {
        (
            rounded_div(passed, MINUTES_PER_HOUR),
            rounded_div(total, MINUTES_PER_HOUR),
            TimeUnit::Hours,
        )
    } else {
        (
            rounded_div(passed, MINUTES_PER_DAY),
            rounded_div(total, MINUTES_PER_DAY),
            TimeUnit::Days,
        )
    }
}

fn rounded_div(value: u64, unit: u64) -> u64 {
    (value as f64 / unit as f64).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use govclock_core::types::{CurveSpec, FixedPoint, NetworkTimeConfig};

    fn track(prepare: u64, decision: u64, confirm: u64) -> TrackPeriods {
        let curve = CurveSpec::LinearDecreasing {
            length: FixedPoint::ONE,
            floor: FixedPoint::ZERO,
            ceil: FixedPoint::ONE,
        };
        TrackPeriods {
            prepare_period: prepare,
            decision_period: decision,
            confirm_period: confirm,
            min_approval: curve,
            min_support: curve,
        }
    }

    fn calculator() -> PeriodProgressCalculator {
        let conv = BlockTimeConverter::new(&NetworkTimeConfig::new("polkadot", 6_000)).unwrap();
        PeriodProgressCalculator::new(conv)
    }

    fn end() -> Instant {
        Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn exactly_zero_at_start() {
        // 28 day decision period.
        let t = track(1_200, 403_200, 14_400);
        let start = end() - Duration::days(28);
        let p = calculator().progress(PeriodKind::Decision, &t, Some(end()), start);
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.label(), "0 / 28 days");
    }

    #[test]
    fn exactly_hundred_at_and_after_end() {
        let t = track(1_200, 403_200, 14_400);
        let calc = calculator();
        assert_eq!(calc.percent(PeriodKind::Decision, &t, Some(end()), end()), 100.0);
        let later = end() + Duration::days(3);
        let p = calc.progress(PeriodKind::Decision, &t, Some(end()), later);
        assert_eq!(p.percent, 100.0);
        assert_eq!(p.label(), "28 / 28 days");
    }

    #[test]
    fn halfway_through_decision() {
        let t = track(1_200, 403_200, 14_400);
        let now = end() - Duration::days(14);
        let p = calculator().progress(PeriodKind::Decision, &t, Some(now + Duration::days(14)), now);
        assert!((p.percent - 50.0).abs() < 1e-9);
        assert_eq!((p.passed_units, p.total_units, p.unit), (14, 28, TimeUnit::Days));
    }

    #[test]
    fn prepare_period_in_hours() {
        // 1_200 blocks = 2 hours.
        let t = track(1_200, 403_200, 14_400);
        let now = end() - Duration::minutes(30);
        let label = calculator().label(PeriodKind::Prepare, &t, Some(end()), now);
        assert_eq!(label, "2 / 2 hours");
        let p = calculator().progress(PeriodKind::Prepare, &t, Some(end()), now);
        assert!((p.percent - 75.0).abs() < 1e-9);
    }

    #[test]
    fn short_period_in_minutes() {
        // 300 blocks = 30 minutes.
        let t = track(300, 403_200, 14_400);
        let now = end() - Duration::minutes(20);
        let label = calculator().label(PeriodKind::Prepare, &t, Some(end()), now);
        assert_eq!(label, "10 / 30 minutes");
    }

    #[test]
    fn missing_end_or_zero_period_is_zero() {
        let t = track(1_200, 403_200, 0);
        let calc = calculator();
        assert_eq!(calc.percent(PeriodKind::Decision, &t, None, end()), 0.0);
        assert_eq!(calc.percent(PeriodKind::Confirm, &t, Some(end()), end()), 0.0);
    }

    #[test]
    fn before_start_is_zero() {
        let t = track(1_200, 403_200, 14_400);
        let now = end() - Duration::days(2);
        let p = calculator().progress(PeriodKind::Confirm, &t, Some(end()), now);
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.passed_units, 0);
    }
}

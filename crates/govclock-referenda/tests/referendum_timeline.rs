//! End-to-end walk through a Polkadot referendum using the bundled network
//! registry: period progress, threshold overlay, pass estimate, vote-lock
//! expiry and the treasury countdown.
//!
//! Run with:
//!   cargo test -p govclock-referenda --test referendum_timeline

use chrono::{Duration, TimeZone, Utc};

use govclock_blocktime::{format_duration, BlockTimeConverter, TimeConversionCache};
use govclock_core::types::{GraphPoint, Instant, PeriodKind};
use govclock_core::NetworkRegistry;
use govclock_referenda::{
    elapsed_fraction, estimate_unlock, estimated_pass_at, spend_period_status, Conviction,
    DecisionStatus, PeriodProgressCalculator, ThresholdSeriesBuilder,
};

fn submitted_at() -> Instant {
    Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap()
}

#[test]
fn root_referendum_timeline() {
    let registry = NetworkRegistry::builtin().unwrap();
    let polkadot = registry.network("polkadot").unwrap();
    let root = polkadot.track("root").unwrap();
    let conv = BlockTimeConverter::new(&polkadot.time_config()).unwrap();

    // Prepare: 2 hours, decision: 28 days.
    let decision_start = submitted_at() + Duration::hours(2);
    let decision_end = decision_start + Duration::days(28);
    let now = decision_start + Duration::days(7);

    let calc = PeriodProgressCalculator::new(conv.clone());
    let prepare = calc.progress(
        PeriodKind::Prepare,
        &root.periods,
        Some(decision_start),
        now,
    );
    assert_eq!(prepare.percent, 100.0);
    assert_eq!(prepare.label(), "2 / 2 hours");

    let decision = calc.progress(PeriodKind::Decision, &root.periods, Some(decision_end), now);
    assert!((decision.percent - 25.0).abs() < 1e-9);
    assert_eq!(decision.label(), "7 / 28 days");

    // A quarter of the way in, root needs ~71.4% approval and 37.5% support.
    let elapsed = elapsed_fraction(&conv, root.periods.decision_period, decision_start, now);
    let status = DecisionStatus::at(&root.periods, elapsed, 0.9, 0.2);
    assert!((status.support_threshold - 0.375).abs() < 1e-9);
    assert!(status.approval_threshold > 0.71 && status.approval_threshold < 0.72);
    assert!(status.approval_met());
    assert!(!status.is_passing(), "support 20% is below the 37.5% threshold");

    let pass_at = estimated_pass_at(&root.periods, &conv, decision_start, 0.9, 0.2).unwrap();
    assert!(pass_at > now && pass_at < decision_end);
    let later = elapsed_fraction(&conv, root.periods.decision_period, decision_start, pass_at);
    assert!(DecisionStatus::at(&root.periods, later, 0.9, 0.2).is_passing());
}

#[test]
fn overlay_matches_single_threshold() {
    let registry = NetworkRegistry::builtin().unwrap();
    let polkadot = registry.network("polkadot").unwrap();
    let treasurer = polkadot.track("treasurer").unwrap();
    let conv = BlockTimeConverter::new(&polkadot.time_config()).unwrap();
    let builder = ThresholdSeriesBuilder::new(&treasurer.periods, &conv);

    let minutes = builder.decision_period_minutes();
    let hours = builder.decision_period_hours();
    let points: Vec<GraphPoint> = (0..5)
        .map(|i| GraphPoint {
            timestamp: submitted_at() + Duration::hours(i * 6),
            approval_percent: 70.0,
            support_percent: 5.0,
        })
        .collect();

    let series = builder.build_series(&points, submitted_at(), minutes, hours);
    assert_eq!(series.len(), 5);
    let offsets: Vec<f64> = series.iter().map(|p| p.hour_offset).collect();
    assert_eq!(offsets, vec![0.0, 6.0, 12.0, 18.0, 24.0]);
    assert!(series.iter().all(|p| p.approval <= 100.0 && p.approval >= 50.0));
    assert_eq!(builder.single_threshold(hours, hours), 50.0);
    assert_eq!(builder.single_threshold(0.0, hours), 100.0);
}

#[test]
fn vote_lock_and_spend_countdown() {
    let registry = NetworkRegistry::builtin().unwrap();
    let kusama = registry.network("kusama").unwrap();
    let conv = BlockTimeConverter::new(&kusama.time_config()).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();

    let lock_period = kusama.vote_locking_period().unwrap();
    let lock = estimate_unlock(
        &conv,
        30_000_000,
        30_000_000,
        Conviction::from_level(2).unwrap(),
        lock_period,
        now,
    )
    .unwrap();
    assert_eq!(lock.unlock_at, now + Duration::days(14));

    let spend = spend_period_status(&conv, 30_000_000, kusama.spend_period().unwrap(), now).unwrap();
    assert_eq!(spend.elapsed_blocks + spend.remaining_blocks, 86_400);
    assert!(spend.next_payout_at > now);
}

#[test]
fn cache_serves_repeated_countdowns() {
    let registry = NetworkRegistry::builtin().unwrap();
    let conv = BlockTimeConverter::new(&registry.network("polkadot").unwrap().time_config()).unwrap();
    let cache = TimeConversionCache::new();

    for _ in 0..10 {
        let d = cache.convert(&conv, 403_200, format_duration);
        assert_eq!(d.formatted, "28d");
    }
    assert_eq!(cache.len(), 1);
}

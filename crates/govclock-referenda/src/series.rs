use govclock_blocktime::BlockTimeConverter;
use govclock_core::constants::MINUTES_PER_HOUR;
use govclock_core::types::{GraphPoint, Instant, ThresholdPoint, TrackPeriods};
use govclock_curve::threshold;

/// Builds approval/support threshold overlays for a track's tally chart.
pub struct ThresholdSeriesBuilder<'a> {
    track: &'a TrackPeriods,
    converter: &'a BlockTimeConverter,
}

impl<'a> ThresholdSeriesBuilder<'a> {
    pub fn new(track: &'a TrackPeriods, converter: &'a BlockTimeConverter) -> Self {
        Self { track, converter }
    }

    pub fn decision_period_minutes(&self) -> f64 {
        self.converter.blocks_to_minutes(self.track.decision_period) as f64
    }

    pub fn decision_period_hours(&self) -> f64 {
        self.decision_period_minutes() / MINUTES_PER_HOUR as f64
    }

    /// Overlay thresholds onto raw tally samples.
    ///
    /// Hours are whole hours since `proposal_created_at`, truncated. Curve
    /// values replace the samples only when `decision_period_minutes` is larger
    /// than `decision_period_hours`; the elapsed fraction is then
    /// `hour / decision_period_minutes`. Otherwise samples pass through as-is.
    pub fn build_series(
        &self,
        points: &[GraphPoint],
        proposal_created_at: Instant,
        decision_period_minutes: f64,
        decision_period_hours: f64,
    ) -> Vec<ThresholdPoint> {
        let overlay = decision_period_minutes > decision_period_hours;
        points
            .iter()
            .map(|point| {
                let hour = (point.timestamp - proposal_created_at).num_hours() as f64;
                if overlay {
                    let elapsed = hour / decision_period_minutes;
                    ThresholdPoint {
                        hour_offset: hour,
                        approval: threshold(&self.track.min_approval, elapsed) * 100.0,
                        support: threshold(&self.track.min_support, elapsed) * 100.0,
                    }
                } else {
                    ThresholdPoint {
                        hour_offset: hour,
                        approval: point.approval_percent,
                        support: point.support_percent,
                    }
                }
            })
            .collect()
    }

    /// Approval threshold, in percent rounded to two decimals, `current_hour_offset`
    /// hours into a decision period of `decision_period_hours`.
    pub fn single_threshold(&self, current_hour_offset: f64, decision_period_hours: f64) -> f64 {
        if decision_period_hours <= 0.0 {
            return 0.0;
        }
        let elapsed = (current_hour_offset / decision_period_hours).clamp(0.0, 1.0);
        round_2dp(threshold(&self.track.min_approval, elapsed) * 100.0)
    }

    /// `samples + 1` evenly spaced points over the whole decision period.
    pub fn curve_series(&self, samples: usize) -> Vec<ThresholdPoint> {
        let samples = samples.max(1);
        let hours = self.decision_period_hours();
        (0..=samples)
            .map(|i| {
                let elapsed = i as f64 / samples as f64;
                ThresholdPoint {
                    hour_offset: elapsed * hours,
                    approval: threshold(&self.track.min_approval, elapsed) * 100.0,
                    support: threshold(&self.track.min_support, elapsed) * 100.0,
                }
            })
            .collect()
    }
}

fn round_2dp(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use govclock_core::types::{CurveSpec, FixedPoint, NetworkTimeConfig};

    fn track() -> TrackPeriods {
        TrackPeriods {
            prepare_period: 1_200,
            decision_period: 403_200,
            confirm_period: 14_400,
            min_approval: CurveSpec::LinearDecreasing {
                length: FixedPoint::ONE,
                floor: FixedPoint::from_percent(50),
                ceil: FixedPoint::ONE,
            },
            min_support: CurveSpec::LinearDecreasing {
                length: FixedPoint::ONE,
                floor: FixedPoint::ZERO,
                ceil: FixedPoint::from_percent(50),
            },
        }
    }

    fn converter() -> BlockTimeConverter {
        BlockTimeConverter::new(&NetworkTimeConfig::new("polkadot", 6_000)).unwrap()
    }

    fn created() -> Instant {
        Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
    }

    fn sample(hours: i64, approval: f64, support: f64) -> GraphPoint {
        GraphPoint {
            timestamp: created() + Duration::hours(hours) + Duration::minutes(59),
            approval_percent: approval,
            support_percent: support,
        }
    }

    #[test]
    fn decision_period_units() {
        let t = track();
        let conv = converter();
        let b = ThresholdSeriesBuilder::new(&t, &conv);
        assert_eq!(b.decision_period_minutes(), 40_320.0);
        assert_eq!(b.decision_period_hours(), 672.0);
    }

    #[test]
    fn overlay_replaces_samples_with_curve() {
        let t = track();
        let conv = converter();
        let b = ThresholdSeriesBuilder::new(&t, &conv);
        let points = vec![sample(0, 12.0, 3.0), sample(20_160, 80.0, 9.0)];
        let series = b.build_series(&points, created(), 40_320.0, 672.0);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].hour_offset, 0.0, "hours are truncated");
        assert_eq!(series[0].approval, 100.0);
        assert_eq!(series[0].support, 50.0);
        // hour 20_160 of 40_320 is the midpoint of the curve.
        assert!((series[1].approval - 75.0).abs() < 1e-6);
        assert!((series[1].support - 25.0).abs() < 1e-6);
    }

    #[test]
    fn samples_pass_through_without_overlay() {
        let t = track();
        let conv = converter();
        let b = ThresholdSeriesBuilder::new(&t, &conv);
        let points = vec![sample(5, 61.5, 4.25)];
        let series = b.build_series(&points, created(), 672.0, 672.0);
        assert_eq!(
            series[0],
            ThresholdPoint {
                hour_offset: 5.0,
                approval: 61.5,
                support: 4.25,
            }
        );
    }

    #[test]
    fn single_threshold_rounds_and_clamps() {
        let t = track();
        let conv = converter();
        let b = ThresholdSeriesBuilder::new(&t, &conv);
        assert_eq!(b.single_threshold(0.0, 672.0), 100.0);
        assert_eq!(b.single_threshold(336.0, 672.0), 75.0);
        assert_eq!(b.single_threshold(100.0, 672.0), 92.56);
        assert_eq!(b.single_threshold(5_000.0, 672.0), 50.0);
        assert_eq!(b.single_threshold(-10.0, 672.0), 100.0);
        assert_eq!(b.single_threshold(10.0, 0.0), 0.0);
    }

    #[test]
    fn degraded_curve_yields_zero() {
        let mut t = track();
        t.min_approval = CurveSpec::Reciprocal {
            factor: FixedPoint::ONE,
            x_offset: FixedPoint::ZERO,
            y_offset: FixedPoint::ZERO,
        };
        let conv = converter();
        let b = ThresholdSeriesBuilder::new(&t, &conv);
        assert_eq!(b.single_threshold(0.0, 672.0), 0.0);
    }

    #[test]
    fn curve_series_spans_decision_period() {
        let t = track();
        let conv = converter();
        let series = ThresholdSeriesBuilder::new(&t, &conv).curve_series(4);
        assert_eq!(series.len(), 5);
        assert_eq!(series[0].hour_offset, 0.0);
        assert_eq!(series[4].hour_offset, 672.0);
        assert_eq!(series[4].approval, 50.0);
        assert!(series.windows(2).all(|w| w[0].approval >= w[1].approval));
    }
}

use govclock_core::types::CurveSpec;
use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::fixed::{clamp_unit, fixed_to_fraction, floor_div, fraction_to_fixed};
use govclock_core::constants::PERBILL_SCALE;

/// Why a curve could not be evaluated with its configured parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveFault {
    /// Reciprocal `x + x_offset` evaluated to zero.
    ZeroDenominator,
    /// Linear `length` is zero or negative.
    NonPositiveLength,
    /// Stepped `period` or `step` is zero or negative.
    NonPositiveStep,
    /// An intermediate product left the representable range.
    Overflow,
}

impl fmt::Display for CurveFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CurveFault::ZeroDenominator => "zero denominator",
            CurveFault::NonPositiveLength => "non-positive length",
            CurveFault::NonPositiveStep => "non-positive step or period",
            CurveFault::Overflow => "arithmetic overflow",
        };
        f.write_str(s)
    }
}

/// Result of a curve computation.
///
/// `Degraded` still carries a usable number (`fallback`) so callers that only
/// need something renderable can call [`CurveOutcome::value`] unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveOutcome {
    Exact(f64),
    Degraded { fallback: f64, reason: CurveFault },
}

impl CurveOutcome {
    pub(crate) fn degraded(reason: CurveFault) -> Self {
        CurveOutcome::Degraded {
            fallback: 0.0,
            reason,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            CurveOutcome::Exact(v) => *v,
            CurveOutcome::Degraded { fallback, .. } => *fallback,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, CurveOutcome::Degraded { .. })
    }

    pub fn fault(&self) -> Option<CurveFault> {
        match self {
            CurveOutcome::Exact(_) => None,
            CurveOutcome::Degraded { reason, .. } => Some(*reason),
        }
    }
}

/// Evaluate `curve` at `elapsed_fraction` of the decision period.
///
/// The input is clamped to `[0, 1]` and the output is always in `[0, 1]`.
/// Degraded outcomes fall back to `0`.
pub fn evaluate(curve: &CurveSpec, elapsed_fraction: f64) -> CurveOutcome {
    let x = fraction_to_fixed(elapsed_fraction);
    let raw = match curve {
        CurveSpec::Reciprocal {
            factor,
            x_offset,
            y_offset,
        } => reciprocal(x, factor.wide(), x_offset.wide(), y_offset.wide()),
        CurveSpec::LinearDecreasing { length, floor, ceil } => {
            linear_decreasing(x, length.wide(), floor.wide(), ceil.wide())
        }
        CurveSpec::SteppedDecreasing {
            begin,
            end,
            step,
            period,
        } => stepped_decreasing(x, begin.wide(), end.wide(), step.wide(), period.wide()),
    };
    match raw {
        Ok(perbill) => CurveOutcome::Exact(fixed_to_fraction(clamp_unit(perbill))),
        Err(fault) => CurveOutcome::degraded(fault),
    }
}

/// [`evaluate`], logging and flattening degraded outcomes to their fallback.
pub fn threshold(curve: &CurveSpec, elapsed_fraction: f64) -> f64 {
    let outcome = evaluate(curve, elapsed_fraction);
    if let Some(fault) = outcome.fault() {
        warn!(
            curve = curve.kind(),
            %fault,
            elapsed_fraction,
            "curve evaluation degraded; using 0"
        );
    }
    outcome.value()
}

/// True when `observed` (a fraction in `[0, 1]`) meets the curve at `elapsed_fraction`.
pub fn is_passing(curve: &CurveSpec, elapsed_fraction: f64, observed: f64) -> bool {
    observed >= threshold(curve, elapsed_fraction)
}

// factor / (x + x_offset) + y_offset
fn reciprocal(x: i128, factor: i128, x_offset: i128, y_offset: i128) -> Result<i128, CurveFault> {
    let numerator = factor
        .checked_mul(PERBILL_SCALE)
        .ok_or(CurveFault::Overflow)?;
    let denominator = x.checked_add(x_offset).ok_or(CurveFault::Overflow)?;
    if denominator == 0 {
        return Err(CurveFault::ZeroDenominator);
    }
    let v = floor_div(numerator, denominator).ok_or(CurveFault::Overflow)?;
    v.checked_add(y_offset).ok_or(CurveFault::Overflow)
}

// ceil - (ceil - floor) * min(x, length) / length
//
// Single rounding step (floor) so x = length lands exactly on `floor`.
fn linear_decreasing(x: i128, length: i128, floor: i128, ceil: i128) -> Result<i128, CurveFault> {
    if length <= 0 {
        return Err(CurveFault::NonPositiveLength);
    }
    let x = x.min(length);
    let span = ceil.checked_sub(floor).ok_or(CurveFault::Overflow)?;
    let scaled = span.checked_mul(x).ok_or(CurveFault::Overflow)?;
    let deducted = floor_div(scaled, length).ok_or(CurveFault::Overflow)?;
    ceil.checked_sub(deducted).ok_or(CurveFault::Overflow)
}

// max(end, begin - min(begin, step * floor(x / period)))
fn stepped_decreasing(
    x: i128,
    begin: i128,
    end: i128,
    step: i128,
    period: i128,
) -> Result<i128, CurveFault> {
    if period <= 0 || step < 0 {
        return Err(CurveFault::NonPositiveStep);
    }
    let steps = x / period;
    let reduction = step.checked_mul(steps).ok_or(CurveFault::Overflow)?;
    Ok((begin - reduction.min(begin)).max(end))
}

//! Inverse of curve evaluation: how far into the decision period a curve
//! must be before it falls to a given level.

use govclock_core::constants::PERBILL_SCALE;
use govclock_core::types::CurveSpec;

use crate::evaluate::{CurveFault, CurveOutcome};
use crate::fixed::{ceil_div, fixed_to_fraction, fraction_to_fixed};

/// Smallest elapsed fraction at which `curve` is at or below `y`.
///
/// Returns `1.0` when the curve never reaches `y` within the decision period.
/// Degraded outcomes also fall back to `1.0`.
pub fn delay(curve: &CurveSpec, y: f64) -> CurveOutcome {
    let y = fraction_to_fixed(y);
    let raw = match curve {
        CurveSpec::LinearDecreasing { length, floor, ceil } => {
            linear_delay(y, length.wide(), floor.wide(), ceil.wide())
        }
        CurveSpec::SteppedDecreasing {
            begin,
            end,
            step,
            period,
        } => stepped_delay(y, begin.wide(), end.wide(), step.wide(), period.wide()),
        CurveSpec::Reciprocal {
            factor,
            x_offset,
            y_offset,
        } => reciprocal_delay(y, factor.wide(), x_offset.wide(), y_offset.wide()),
    };
    match raw {
        Ok(x) => CurveOutcome::Exact(fixed_to_fraction(x.clamp(0, PERBILL_SCALE))),
        Err(reason) => CurveOutcome::Degraded {
            fallback: 1.0,
            reason,
        },
    }
}

fn linear_delay(y: i128, length: i128, floor: i128, ceil: i128) -> Result<i128, CurveFault> {
    if length <= 0 {
        return Err(CurveFault::NonPositiveLength);
    }
    if y < floor {
        return Ok(PERBILL_SCALE);
    }
    if y >= ceil || ceil <= floor {
        return Ok(0);
    }
    let scaled = (ceil - y).checked_mul(length).ok_or(CurveFault::Overflow)?;
    ceil_div(scaled, ceil - floor).ok_or(CurveFault::Overflow)
}

fn stepped_delay(
    y: i128,
    begin: i128,
    end: i128,
    step: i128,
    period: i128,
) -> Result<i128, CurveFault> {
    if y < end {
        return Ok(PERBILL_SCALE);
    }
    if y >= begin {
        return Ok(0);
    }
    if step <= 0 || period <= 0 {
        return Err(CurveFault::NonPositiveStep);
    }
    let steps = ceil_div(begin - y, step).ok_or(CurveFault::Overflow)?;
    period.checked_mul(steps).ok_or(CurveFault::Overflow)
}

fn reciprocal_delay(
    y: i128,
    factor: i128,
    x_offset: i128,
    y_offset: i128,
) -> Result<i128, CurveFault> {
    // The curve approaches y_offset asymptotically and never reaches it.
    if y <= y_offset {
        return Ok(PERBILL_SCALE);
    }
    let numerator = factor
        .checked_mul(PERBILL_SCALE)
        .ok_or(CurveFault::Overflow)?;
    let term = ceil_div(numerator, y - y_offset).ok_or(CurveFault::Overflow)?;
    term.checked_sub(x_offset).ok_or(CurveFault::Overflow)
}

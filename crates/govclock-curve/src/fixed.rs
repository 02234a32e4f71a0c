use govclock_core::constants::{PERBILL_SCALE, PERBILL_SCALE_F64};

/// Clamp a fraction to `[0, 1]` and lift it onto the perbill scale.
/// NaN is treated as zero.
pub(crate) fn fraction_to_fixed(fraction: f64) -> i128 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * PERBILL_SCALE_F64).round() as i128
}

pub(crate) fn fixed_to_fraction(raw: i128) -> f64 {
    raw as f64 / PERBILL_SCALE_F64
}

pub(crate) fn clamp_unit(raw: i128) -> i128 {
    raw.clamp(0, PERBILL_SCALE)
}

/// Integer division rounding towards negative infinity.
pub(crate) fn floor_div(a: i128, b: i128) -> Option<i128> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Integer division rounding towards positive infinity.
pub(crate) fn ceil_div(a: i128, b: i128) -> Option<i128> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) == (b < 0)) {
        Some(q + 1)
    } else {
        Some(q)
    }
}

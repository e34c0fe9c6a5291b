//! Range mapping helpers shared by the generators.

const MAX_CURVE: f64 = 10.0;

/// Map `value` from `[in_low, in_high]` onto `[out_low, out_high]`.
///
/// `curve` bends the mapping: `0` is linear, positive values push the
/// output towards `out_high` early, negative values hold it near `out_low`
/// for longer. It is limited to `[-10, 10]`. The input is clamped to its
/// range, so values slightly outside never extrapolate. Output ranges may
/// be inverted (`out_low > out_high`).
///
/// An inverted input range (`in_low > in_high`) has no meaningful mapping
/// and yields `0.0`.
pub fn scale(
    in_low: f64,
    in_high: f64,
    out_low: f64,
    out_high: f64,
    value: f64,
    curve: f64,
) -> f64 {
    if in_low > in_high {
        return 0.0;
    }

    let exponent = 10f64.powf(-0.1 * curve.clamp(-MAX_CURVE, MAX_CURVE));
    let value = value.clamp(in_low, in_high);

    let in_range = in_high - in_low;
    let normalized = if in_range > 0.0 {
        (value - in_low) / in_range
    } else {
        0.0
    };

    out_low + normalized.powf(exponent) * (out_high - out_low)
}

/// Linear map without clamping, rounded to the nearest integer.
pub fn map_range(value: f64, in_low: f64, in_high: f64, out_low: f64, out_high: f64) -> i64 {
    let mapped = (value - in_low) * (out_high - out_low) / (in_high - in_low) + out_low;
    mapped.round() as i64
}

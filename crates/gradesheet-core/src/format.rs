//! Point value display.

/// Slack for binary representation error, e.g. `4.1` has fraction `0.0999...`.
const EPSILON: f64 = 1e-9;

/// Render a point value for a person to read.
///
/// Values whose fractional part is below 0.01 print as integers (truncated
/// toward zero), below 0.1 with two decimals, otherwise with one decimal.
/// Fractions are compared with a small tolerance so decimal inputs such as
/// `4.1` or `4.01` land on the side their decimal spelling says.
pub fn format_magnitude(x: f64) -> String {
    let abs = x.abs();
    let frac = abs - abs.trunc();
    if frac > 1.0 - EPSILON {
        // Accumulated sums such as 44.99999999999999.
        format!("{}", x.round() as i64)
    } else if frac < 0.01 - EPSILON {
        format!("{}", x.trunc() as i64)
    } else if frac < 0.1 - EPSILON {
        format!("{x:.2}")
    } else {
        format!("{x:.1}")
    }
}

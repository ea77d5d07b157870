//! Normalization of values coming from, and going to, the page controls.

use crate::error::InputError;

/// Upper bound of the iteration control.
pub const MAX_ITERATIONS: u32 = 10_000;

/// Decimal places shown in the offset and scale labels.
pub const LABEL_PRECISION: usize = 5;

/// Coerce a raw control value into a valid iteration count.
///
/// Negative values become 0, fractional values are rounded, and anything
/// above [`MAX_ITERATIONS`] is capped.
pub fn clamp_iterations(value: f64) -> u32 {
    value.max(0.0).round().min(MAX_ITERATIONS as f64) as u32
}

/// Parse the text of the iteration control and clamp it.
pub fn parse_iterations(raw: &str) -> Result<u32, InputError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| InputError::NotANumber(raw.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::NotANumber(raw.to_string()));
    }
    Ok(clamp_iterations(value))
}

/// Fixed-point label text. Negative zero prints as `0.00000`.
pub fn format_value(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", LABEL_PRECISION, value)
}

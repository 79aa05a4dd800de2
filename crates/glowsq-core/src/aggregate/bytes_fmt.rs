//! Human-readable byte formatting for the display labels.

/// Unit suffixes, base 1000.
const UNITS: [&str; 5] = ["B", "K", "M", "G", "T"];
const BASE: f64 = 1000.0;

/// Decimals beyond this carry no information in an `f64`.
pub const MAX_PRECISION: usize = 20;

/// Significant digits kept before deciding a half.
const SIGNIFICANT_DIGITS: usize = 15;

/// Format a byte count as a compact label such as `"245M"` or `"1.2T"`.
///
/// The count is rounded to a whole byte first and clamped at zero
/// (non-finite input counts as zero). The largest unit whose threshold the
/// count reaches is chosen; terabytes get one more decimal than asked for.
/// Halves round away from zero, and no digit grouping is applied.
/// `precision` is capped at [`MAX_PRECISION`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::as_conversions
)]
pub fn format_bytes(bytes: f64, precision: usize) -> String {
    let bytes = if bytes.is_finite() && bytes > 0.0 {
        round_half_up(bytes, 0)
    } else {
        0.0
    };

    let pow = unit_index(bytes);
    let precision = precision.min(MAX_PRECISION);
    let precision = if pow == UNITS.len() - 1 {
        precision + 1
    } else {
        precision
    };

    let scaled = bytes / BASE.powi(pow as i32);
    let value = round_half_up(scaled, precision as i32);

    format!("{value:.precision$}{}", UNITS[pow])
}

/// Round half away from zero at `places` decimals.
///
/// The shifted value is first cut to 15 significant digits, so a decimal
/// that is not exactly representable (`1.005` is stored as
/// `1.00499999...`) still rounds the way it reads.
fn round_half_up(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    let shifted = value * factor;
    if !shifted.is_finite() {
        return value;
    }
    let trimmed = format!("{shifted:.digits$e}", digits = SIGNIFICANT_DIGITS - 1)
        .parse::<f64>()
        .unwrap_or(shifted);
    let rounded = trimmed.round() / factor;
    if rounded.is_finite() { rounded } else { value }
}

/// Index into [`UNITS`] for an already-rounded, non-negative count.
fn unit_index(bytes: f64) -> usize {
    let mut pow = 0;
    let mut threshold = BASE;
    while pow < UNITS.len() - 1 && bytes >= threshold {
        pow += 1;
        threshold *= BASE;
    }
    pow
}

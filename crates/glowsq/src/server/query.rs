//! Lenient parsing of the display's `width`/`height` query parameters.
//!
//! Displays send whatever their firmware was built with, so a bad value
//! falls back to the configured default instead of rejecting the request.

use glowsq_config::GraphSection;
use glowsq_core::GraphOptions;

/// Raw dimensions from the query string; `None` means absent or not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayQuery {
    pub width: Option<u64>,
    pub height: Option<u64>,
}

impl DisplayQuery {
    /// Parse a raw query string. Repeated keys: the last one wins.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let Some(raw) = raw else {
            return query;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "width" => query.width = parse_dimension(&value),
                "height" => query.height = parse_dimension(&value),
                _ => {}
            }
        }
        query
    }

    /// Resolve against configured defaults and scale floors.
    pub fn options(self, defaults: &GraphSection) -> GraphOptions {
        let mut options = defaults.options();
        if let Some(width) = self.width {
            options.width = usize::try_from(width).unwrap_or(usize::MAX);
        }
        if let Some(height) = self.height {
            options.height = u32::try_from(height).unwrap_or(u32::MAX);
        }
        options
    }
}

/// An integer, or a finite decimal truncated toward zero. Negative values
/// clamp to 0.
fn parse_dimension(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(int) = value.parse::<i128>() {
        return Some(u64::try_from(int.max(0)).unwrap_or(u64::MAX));
    }

    let float = value.parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some(truncate_to_u64(float))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn truncate_to_u64(value: f64) -> u64 {
    // Float-to-int `as` truncates toward zero and saturates at both ends.
    value.trunc() as u64
}

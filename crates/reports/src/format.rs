//! Display formatting shared by the table and every export surface.
//!
//! Formatters take raw numbers only. A cell that already holds text is
//! never parsed and re-formatted, so a value is formatted exactly once.

use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "₹";
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFormat {
    /// Glyph prefixed to money values
    pub currency: String,
    /// chrono format string for date cells
    pub date_format: String,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Fixed two-decimal money with the currency glyph in front.
///
/// ```
/// assert_eq!(reports::format_currency(500.5, "₹"), "₹500.50");
/// assert_eq!(reports::format_currency(-12.0, "₹"), "-₹12.00");
/// ```
pub fn format_currency(value: f64, currency: &str) -> String {
    let fixed = format_fixed(value.abs(), 2);
    if value < 0.0 && fixed != "0.00" {
        format!("-{}{}", currency, fixed)
    } else {
        format!("{}{}", currency, fixed)
    }
}

/// Fixed-point number without grouping. Negative zero prints as zero.
pub fn format_fixed(value: f64, decimals: u8) -> String {
    if !value.is_finite() {
        return format!("{:.*}", decimals as usize, 0.0);
    }
    let s = format!("{:.*}", decimals as usize, value);
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(500.5, "₹"), "₹500.50");
        assert_eq!(format_currency(200.0, "₹"), "₹200.00");
        assert_eq!(format_currency(0.0, "₹"), "₹0.00");
        assert_eq!(format_currency(1234567.891, "₹"), "₹1234567.89");
        assert_eq!(format_currency(-12.0, "₹"), "-₹12.00");
        assert_eq!(format_currency(-0.001, "₹"), "₹0.00");
        assert_eq!(format_currency(3.5, "Rs."), "Rs.3.50");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(2.345, 0), "2");
        assert_eq!(format_fixed(2.0, 2), "2.00");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(-1.5, 1), "-1.5");
        assert_eq!(format_fixed(f64::NAN, 2), "0.00");
        assert_eq!(format_fixed(f64::NAN, 0), "0");
    }

    #[test]
    fn test_overflowed_sum_keeps_money_shape() {
        assert_eq!(format_currency(f64::INFINITY, "₹"), "₹0.00");
        assert_eq!(format_currency(f64::NEG_INFINITY, "₹"), "₹0.00");
        assert_eq!(format_fixed(f64::INFINITY, 3), "0.000");
    }
}

//! # retail-core
//!
//! Core series types for the Sigalli retail dashboard.
//! Implements Strategy pattern for value formatting.

pub mod series;
pub mod summary;

pub use series::*;
pub use summary::*;

use std::sync::Arc;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for turning a chart value into display text
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64) -> String + Send + Sync,
{
    fn format(&self, value: f64) -> String {
        self(value)
    }
}

/// Default currency unit (Central African CFA franc)
pub const DEFAULT_CURRENCY_UNIT: &str = "FCFA";

/// Currency formatter collapsing amounts to M / K tiers
///
/// - `>= 1_000_000` renders one decimal with an `M` suffix (`1.5M FCFA`)
/// - `>= 1_000` renders no decimals with a `K` suffix (`48K FCFA`)
/// - anything below renders the raw amount (`500 FCFA`)
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    pub unit: String,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self {
            unit: DEFAULT_CURRENCY_UNIT.to_string(),
        }
    }
}

impl CurrencyFormatter {
    pub fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }
}

impl ValueFormatter for CurrencyFormatter {
    fn format(&self, amount: f64) -> String {
        let abs = amount.abs();
        let sign = if amount < 0.0 { "-" } else { "" };

        if abs >= 1_000_000.0 {
            format!("{}{:.1}M {}", sign, round_half_up(abs / 1_000_000.0, 1), self.unit)
        } else if abs >= 1_000.0 {
            format!("{}{:.0}K {}", sign, round_half_up(abs / 1_000.0, 0), self.unit)
        } else {
            format!("{}{} {}", sign, abs, self.unit)
        }
    }
}

/// Round to `decimals` places with ties going up (`2.5` -> `3`, `1.25` -> `1.3`)
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Thousands-grouping formatter (`48000` -> `48 000`)
#[derive(Debug, Clone)]
pub struct GroupedNumberFormatter {
    pub separator: char,
}

impl Default for GroupedNumberFormatter {
    fn default() -> Self {
        Self { separator: ' ' }
    }
}

impl ValueFormatter for GroupedNumberFormatter {
    fn format(&self, num: f64) -> String {
        let raw = num.to_string();
        let (sign, digits) = match raw.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", raw.as_str()),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac)) => (int_part, Some(frac)),
            None => (digits, None),
        };

        let mut out = String::with_capacity(raw.len() + int_part.len() / 3);
        out.push_str(sign);

        let len = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 && ch.is_ascii_digit() {
                out.push(self.separator);
            }
            out.push(ch);
        }

        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }

        out
    }
}

/// Whole-percent formatter for shares in `[0, 1]` (`0.523` -> `52%`)
#[derive(Debug, Clone, Default)]
pub struct PercentFormatter;

impl ValueFormatter for PercentFormatter {
    fn format(&self, fraction: f64) -> String {
        format!("{}%", round_percent(fraction))
    }
}

/// Share in `[0, 1]` as a rounded whole percentage; non-finite shares read as 0
pub fn round_percent(fraction: f64) -> i64 {
    let pct = (fraction * 100.0).round();
    if pct.is_finite() { pct as i64 } else { 0 }
}

/// Format an amount with the default currency formatter
pub fn format_currency(amount: f64) -> String {
    CurrencyFormatter::default().format(amount)
}

/// Format a number with space-separated thousands
pub fn format_number(num: f64) -> String {
    GroupedNumberFormatter::default().format(num)
}

/// Format a share as a rounded whole percentage
pub fn format_percent(fraction: f64) -> String {
    PercentFormatter.format(fraction)
}

/// Shareable formatter handle carried by chart configurations
#[derive(Clone)]
pub struct ValueFormat(Arc<dyn ValueFormatter>);

impl ValueFormat {
    pub fn new(formatter: impl ValueFormatter + 'static) -> Self {
        Self(Arc::new(formatter))
    }

    pub fn currency(unit: impl Into<String>) -> Self {
        Self::new(CurrencyFormatter::new(unit))
    }

    pub fn grouped() -> Self {
        Self::new(GroupedNumberFormatter::default())
    }

    pub fn format(&self, value: f64) -> String {
        self.0.format(value)
    }
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::new(CurrencyFormatter::default())
    }
}

impl std::fmt::Debug for ValueFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValueFormat(..)")
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const PRIMARY: &str = "#6254e7";
    pub const SECONDARY: &str = "#ff7426";
    pub const SUCCESS: &str = "#34C759";
    pub const ERROR: &str = "#FF3B30";
    pub const SURFACE: &str = "#FFFFFF";
    pub const BACKGROUND: &str = "#F4F4F4";
    pub const BORDER: &str = "#E8E6F0";
    pub const TEXT: &str = "#3B3663";
    pub const TEXT_SECONDARY: &str = "#696687";
    pub const TEXT_LIGHT: &str = "#9994B8";
    pub const BLACK: &str = "#1A1A2E";
    pub const WHITE: &str = "#FFFFFF";

    /// Categorical palette, cycled by series index
    pub const CHART_PALETTE: [&str; 10] = [
        "#6254e7", "#ff7426", "#34C759", "#007AFF", "#FF3B30", "#FFCC00", "#8B7FF2", "#FF9A5C",
        "#5AC8FA", "#AF52DE",
    ];

    /// Palette color for a series index
    pub fn palette(index: usize) -> &'static str {
        CHART_PALETTE[index % CHART_PALETTE.len()]
    }

    /// `#rrggbb` as an `rgba()` string; other inputs are returned unchanged
    pub fn with_alpha(hex: &str, alpha: f64) -> String {
        let channels = hex
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.is_ascii())
            .and_then(|h| {
                let r = u8::from_str_radix(&h[0..2], 16).ok()?;
                let g = u8::from_str_radix(&h[2..4], 16).ok()?;
                let b = u8::from_str_radix(&h[4..6], 16).ok()?;
                Some((r, g, b))
            });

        match channels {
            Some((r, g, b)) => format!("rgba({}, {}, {}, {:.2})", r, g, b, alpha.clamp(0.0, 1.0)),
            None => hex.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_tiers() {
        assert_eq!(format_currency(1_500_000.0), "1.5M FCFA");
        assert_eq!(format_currency(500.0), "500 FCFA");
        assert_eq!(format_currency(48_000.0), "48K FCFA");
        assert_eq!(format_currency(279_600_000.0), "279.6M FCFA");
    }

    #[test]
    fn test_currency_ties_round_up() {
        assert_eq!(format_currency(2_500.0), "3K FCFA");
        assert_eq!(format_currency(3_500.0), "4K FCFA");
        assert_eq!(format_currency(1_250_000.0), "1.3M FCFA");
        assert_eq!(format_currency(-2_500.0), "-3K FCFA");
    }

    #[test]
    fn test_currency_threshold_boundaries() {
        assert_eq!(format_currency(999.0), "999 FCFA");
        assert_eq!(format_currency(1_000.0), "1K FCFA");
        assert_eq!(format_currency(1_000_000.0), "1.0M FCFA");
        assert_eq!(format_currency(0.0), "0 FCFA");
    }

    #[test]
    fn test_currency_negative_keeps_sign() {
        assert_eq!(format_currency(-2_000.0), "-2K FCFA");
        assert_eq!(format_currency(-12.0), "-12 FCFA");
    }

    #[test]
    fn test_currency_custom_unit() {
        let formatter = CurrencyFormatter::new("XAF");
        assert_eq!(formatter.format(3_100_000.0), "3.1M XAF");
    }

    #[test]
    fn test_grouped_number() {
        assert_eq!(format_number(48_000.0), "48 000");
        assert_eq!(format_number(1_234_567.0), "1 234 567");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(-4_297.0), "-4 297");
        assert_eq!(format_number(1_234.5), "1 234.5");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(0.523), "52%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(f64::NAN), "0%");
    }

    #[test]
    fn test_closure_formatter_strategy() {
        let format = ValueFormat::new(|v: f64| format!("{v:.0} units"));
        assert_eq!(format.format(12.0), "12 units");
        assert_eq!(ValueFormat::default().format(2_600.0), "3K FCFA");
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(colors::palette(0), colors::PRIMARY);
        assert_eq!(colors::palette(10), colors::PRIMARY);
        assert_eq!(colors::palette(13), "#007AFF");
    }

    #[test]
    fn test_with_alpha() {
        assert_eq!(colors::with_alpha("#6254e7", 0.07), "rgba(98, 84, 231, 0.07)");
        assert_eq!(colors::with_alpha("tomato", 0.5), "tomato");
    }
}

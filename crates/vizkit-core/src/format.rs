//! Number formatting strategies for ticks, tooltips and legends.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::Value;

// ============================================================================
// STRATEGY PATTERN: Value Formatter
// ============================================================================

/// Strategy trait for turning a numeric value into display text
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

/// Caller-supplied formatting closure
#[derive(Clone)]
pub struct CustomFormatter(pub Arc<dyn Fn(f64) -> String + Send + Sync>);

impl CustomFormatter {
    pub fn new(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl std::fmt::Debug for CustomFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CustomFormatter(..)")
    }
}

/// Serializable formatter selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValueFormat {
    /// Thousands-grouped, up to three fraction digits (`1,234.5`)
    #[default]
    Grouped,
    /// K/M/B suffixes (`1.5K`)
    Compact,
    Fixed {
        decimals: usize,
    },
    /// Input is a fraction: `0.25` → `25%`
    Percent {
        #[serde(default)]
        decimals: usize,
    },
    Currency {
        symbol: String,
        #[serde(default = "default_currency_decimals")]
        decimals: usize,
    },
    /// Grouped number followed by a unit suffix
    Unit {
        unit: String,
    },
    /// Epoch milliseconds rendered with a chrono pattern (UTC)
    Time {
        pattern: String,
    },
    #[serde(skip)]
    Custom(CustomFormatter),
}

fn default_currency_decimals() -> usize {
    2
}

impl ValueFormat {
    pub fn custom(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(CustomFormatter::new(f))
    }

    /// Format a tick or category value; text passes through unchanged
    pub fn format_value(&self, value: &Value) -> String {
        match value {
            Value::Number(n) => self.format(*n),
            other => other.to_string(),
        }
    }
}

impl ValueFormatter for ValueFormat {
    fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return String::new();
        }
        match self {
            Self::Grouped => format_grouped(value),
            Self::Compact => format_compact(value),
            Self::Fixed { decimals } => group_fixed(value, *decimals),
            Self::Percent { decimals } => format!("{:.prec$}%", value * 100.0, prec = *decimals),
            Self::Currency { symbol, decimals } => {
                if value < 0.0 {
                    format!("-{}{}", symbol, group_fixed(-value, *decimals))
                } else {
                    format!("{}{}", symbol, group_fixed(value, *decimals))
                }
            }
            Self::Unit { unit } => format!("{}{}", format_grouped(value), unit),
            Self::Time { pattern } => format_time(value, pattern),
            Self::Custom(f) => (f.0)(value),
        }
    }
}

// ============================================================================
// FORMAT HELPERS
// ============================================================================

/// Locale-style grouping with up to three fraction digits, trailing zeros trimmed
pub fn format_grouped(value: f64) -> String {
    let fixed = format!("{:.3}", value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    let out = group_digits(trimmed);
    if out == "-0" { "0".to_string() } else { out }
}

/// Grouping with an exact number of fraction digits
pub fn group_fixed(value: f64, decimals: usize) -> String {
    group_digits(&format!("{:.prec$}", value, prec = decimals))
}

fn group_digits(number: &str) -> String {
    let (sign, rest) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Compact K/M/B notation with one decimal, `.0` dropped
pub fn format_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1_000.0, "K"), (1_000_000.0, "M"), (1_000_000_000.0, "B")];

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    let Some(mut tier) = UNITS.iter().rposition(|(size, _)| abs >= *size) else {
        return format_grouped(value);
    };
    let mut text = format!("{:.1}", abs / UNITS[tier].0);
    // 999_960 rounds to "1000.0K"; carry into the next unit
    if tier + 1 < UNITS.len() && text.parse::<f64>().is_ok_and(|v| v >= 1_000.0) {
        tier += 1;
        text = format!("{:.1}", abs / UNITS[tier].0);
    }

    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}{}{}", sign, text, UNITS[tier].1)
}

fn format_time(timestamp_ms: f64, pattern: &str) -> String {
    match Utc.timestamp_millis_opt(timestamp_ms as i64).single() {
        Some(dt) => dt.format(pattern).to_string(),
        None => format_grouped(timestamp_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_formatter() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1234.5), "1,234.5");
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(-9876.54321), "-9,876.543");
        assert_eq!(format_grouped(-0.0001), "0");
    }

    #[test]
    fn test_compact_formatter() {
        assert_eq!(format_compact(1_500_000.0), "1.5M");
        assert_eq!(format_compact(2_000.0), "2K");
        assert_eq!(format_compact(-3_260_000_000.0), "-3.3B");
        assert_eq!(format_compact(500.0), "500");
        assert_eq!(format_compact(999_960.0), "1M");
        assert_eq!(format_compact(-999_999_999.0), "-1B");
        assert_eq!(format_compact(950_000.0), "950K");
        assert_eq!(format_compact(999_940.0), "999.9K");
    }

    #[test]
    fn test_format_strategies() {
        assert_eq!(ValueFormat::Percent { decimals: 0 }.format(0.25), "25%");
        assert_eq!(ValueFormat::Fixed { decimals: 2 }.format(1234.5), "1,234.50");
        let usd = ValueFormat::Currency {
            symbol: "$".into(),
            decimals: 2,
        };
        assert_eq!(usd.format(-1200.0), "-$1,200.00");
        assert_eq!(ValueFormat::Unit { unit: "ms".into() }.format(1500.0), "1,500ms");
        assert_eq!(ValueFormat::custom(|v| format!("<{}>", v)).format(3.0), "<3>");
    }

    #[test]
    fn test_time_formatter() {
        let fmt = ValueFormat::Time {
            pattern: "%b %d".into(),
        };
        // 2024-01-15T00:00:00Z
        assert_eq!(fmt.format(1_705_276_800_000.0), "Jan 15");
    }

    #[test]
    fn test_format_value_passes_text_through() {
        let fmt = ValueFormat::Compact;
        assert_eq!(fmt.format_value(&Value::Text("Jan".into())), "Jan");
        assert_eq!(fmt.format_value(&Value::Number(4200.0)), "4.2K");
    }

    #[test]
    fn test_value_format_from_json() {
        let fmt: ValueFormat = serde_json::from_str(r#"{"kind":"percent","decimals":1}"#).unwrap();
        assert_eq!(fmt.format(0.123), "12.3%");
        let fmt: ValueFormat = serde_json::from_str(r#"{"kind":"currency","symbol":"€"}"#).unwrap();
        assert_eq!(fmt.format(5.0), "€5.00");
    }
}

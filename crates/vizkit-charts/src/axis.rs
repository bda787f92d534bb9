//! Axis domain resolution and axis specs.

use vizkit_core::{
    AxisConfig, BoundKeyword, Domain, DomainBound, StyleToken, Theme, Value, ValueFormat,
    ValueFormatter, tokens,
};

use crate::chartkit::LinearScale;
use crate::plan::{AxisKind, AxisPosition, AxisSpec, Tick};

/// Tick count used when an axis leaves it unset
pub const DEFAULT_TICK_COUNT: usize = 5;

/// Smallest and largest finite value in `values`
pub fn value_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Resolve a configured domain against the data extent
///
/// Fixed bounds are taken as-is, `dataMin`/`dataMax` read the raw extent and
/// `auto` bounds are extended to nice tick multiples. Degenerate results
/// (equal or inverted bounds, non-finite values) fall back to auto-scaling.
pub fn resolve_domain(domain: Option<&Domain>, extent: Option<(f64, f64)>, include_zero: bool) -> (f64, f64) {
    domain_with_ticks(domain, extent, include_zero, DEFAULT_TICK_COUNT)
}

/// Domain of a value axis; auto bounds are niced to the axis' `tickCount`
pub fn axis_domain(config: &AxisConfig, extent: Option<(f64, f64)>, include_zero: bool) -> (f64, f64) {
    let count = config.tick_count.unwrap_or(DEFAULT_TICK_COUNT);
    domain_with_ticks(config.domain.as_ref(), extent, include_zero, count)
}

fn domain_with_ticks(
    domain: Option<&Domain>,
    extent: Option<(f64, f64)>,
    include_zero: bool,
    tick_count: usize,
) -> (f64, f64) {
    let (lo, hi) = extent.unwrap_or((0.0, 1.0));
    let auto = auto_domain(lo, hi, include_zero, tick_count);
    let Domain(min_bound, max_bound) = domain.copied().unwrap_or_default();

    let pick = |bound: DomainBound, auto_value: f64| match bound {
        DomainBound::Value(v) => v,
        DomainBound::Keyword(BoundKeyword::DataMin) => lo,
        DomainBound::Keyword(BoundKeyword::DataMax) => hi,
        DomainBound::Keyword(BoundKeyword::Auto) => auto_value,
    };
    let min = pick(min_bound, auto.0);
    let max = pick(max_bound, auto.1);

    if !min.is_finite() || !max.is_finite() || min > max {
        tracing::warn!(min, max, "Invalid axis domain, falling back to auto-scale");
        return auto;
    }
    if min == max {
        tracing::warn!(value = min, "Degenerate axis domain, expanding");
        return expand(min);
    }
    (min, max)
}

fn auto_domain(lo: f64, hi: f64, include_zero: bool, tick_count: usize) -> (f64, f64) {
    let (lo, hi) = if include_zero { (lo.min(0.0), hi.max(0.0)) } else { (lo, hi) };
    if lo == hi {
        return expand(lo);
    }
    LinearScale::new()
        .domain(lo, hi)
        .nice(tick_count.max(1))
        .domain_bounds()
}

fn expand(value: f64) -> (f64, f64) {
    if value == 0.0 { (0.0, 1.0) } else { (value - 1.0, value + 1.0) }
}

/// Label for a numeric tick: formatter output plus the axis unit
pub fn tick_label(value: f64, format: &ValueFormat, unit: Option<&str>) -> String {
    let mut label = format.format(value);
    if let Some(unit) = unit {
        label.push_str(unit);
    }
    label
}

fn base_spec(id: &str, position: AxisPosition, kind: AxisKind, config: &AxisConfig, theme: Theme) -> AxisSpec {
    AxisSpec {
        id: id.to_string(),
        position,
        kind,
        data_key: config.data_key.clone(),
        label: config.label.clone(),
        domain: None,
        ticks: Vec::new(),
        hide: config.hide,
        angle: config.angle.unwrap_or(0.0),
        stroke: theme.resolve(StyleToken::Axis).to_string(),
        tick_color: theme.resolve(StyleToken::MutedText).to_string(),
        tick_font_size: tokens::axis::TICK_FONT_SIZE,
    }
}

/// Numeric axis over a resolved domain
///
/// `fallback_format` applies when the axis config names no tick formatter
/// (stacked-percent charts pass a percent formatter).
pub fn numeric_axis(
    id: &str,
    position: AxisPosition,
    config: &AxisConfig,
    domain: (f64, f64),
    fallback_format: &ValueFormat,
    theme: Theme,
) -> AxisSpec {
    let format = config.tick_formatter.as_ref().unwrap_or(fallback_format);
    let count = config.tick_count.unwrap_or(DEFAULT_TICK_COUNT);
    let ticks = LinearScale::new()
        .domain(domain.0, domain.1)
        .nice_ticks(count)
        .into_iter()
        .map(|v| Tick {
            value: Value::Number(v),
            label: tick_label(v, format, config.unit.as_deref()),
        })
        .collect();

    AxisSpec {
        domain: Some(domain),
        ticks,
        ..base_spec(id, position, AxisKind::Number, config, theme)
    }
}

/// Category axis with one tick per category, in data order
pub fn category_axis(
    id: &str,
    position: AxisPosition,
    config: &AxisConfig,
    categories: &[Value],
    theme: Theme,
) -> AxisSpec {
    let ticks = categories
        .iter()
        .map(|v| {
            let label = match &config.tick_formatter {
                Some(format) => format.format_value(v),
                None => v.to_string(),
            };
            Tick {
                value: v.clone(),
                label,
            }
        })
        .collect();

    AxisSpec {
        ticks,
        ..base_spec(id, position, AxisKind::Category, config, theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_domain_is_nice_and_includes_zero() {
        assert_eq!(resolve_domain(None, Some((12.0, 87.0)), true), (0.0, 100.0));
        assert_eq!(resolve_domain(None, Some((-12.0, 30.0)), true), (-20.0, 30.0));
    }

    #[test]
    fn test_fixed_and_keyword_bounds() {
        let fixed = Domain::fixed(0.0, 1.0);
        assert_eq!(resolve_domain(Some(&fixed), Some((0.2, 0.4)), true), (0.0, 1.0));

        let data = Domain(
            DomainBound::Keyword(BoundKeyword::DataMin),
            DomainBound::Keyword(BoundKeyword::DataMax),
        );
        assert_eq!(resolve_domain(Some(&data), Some((3.0, 9.0)), true), (3.0, 9.0));
    }

    #[test]
    fn test_degenerate_domain_falls_back() {
        assert_eq!(resolve_domain(Some(&Domain::fixed(5.0, 5.0)), None, true), (4.0, 6.0));
        assert_eq!(resolve_domain(None, Some((7.0, 7.0)), false), (6.0, 8.0));
        assert_eq!(resolve_domain(None, Some((0.0, 0.0)), true), (0.0, 1.0));
        // inverted bounds use the auto domain
        assert_eq!(resolve_domain(Some(&Domain::fixed(10.0, 0.0)), Some((0.0, 40.0)), true), (0.0, 40.0));
    }

    #[test]
    fn test_axis_domain_follows_tick_count() {
        let mut axis = AxisConfig::default();
        assert_eq!(axis_domain(&axis, Some((0.0, 87.0)), true), (0.0, 100.0));
        axis.tick_count = Some(10);
        assert_eq!(axis_domain(&axis, Some((0.0, 87.0)), true), (0.0, 90.0));
        let fixed = AxisConfig::default().with_domain(Domain::fixed(0.0, 50.0));
        assert_eq!(axis_domain(&fixed, Some((0.0, 87.0)), true), (0.0, 50.0));
    }

    #[test]
    fn test_numeric_axis_ticks() {
        let config = AxisConfig {
            unit: Some("ms".to_string()),
            ..Default::default()
        };
        let axis = numeric_axis("y", AxisPosition::Left, &config, (0.0, 2000.0), &ValueFormat::Grouped, Theme::light());
        assert_eq!(axis.kind, AxisKind::Number);
        assert_eq!(axis.ticks.first().map(|t| t.label.as_str()), Some("0ms"));
        assert_eq!(axis.ticks.last().map(|t| t.label.as_str()), Some("2,000ms"));
    }

    #[test]
    fn test_category_axis_preserves_order() {
        let cats = vec![Value::from("Mar"), Value::from("Jan"), Value::from("Feb")];
        let axis = category_axis("x", AxisPosition::Bottom, &AxisConfig::key("m"), &cats, Theme::dark());
        let labels: Vec<_> = axis.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["Mar", "Jan", "Feb"]);
        assert!(axis.domain.is_none());
    }
}

//! Resolution steps shared by the cartesian families (line, bar, area,
//! scatter, composed): categories, grid, overlays, legend and tooltip specs.

use vizkit_core::{
    AxisConfig, ChartDefaults, DataPoint, FrameConfig, LegendConfig, ReferenceAreaConfig,
    ReferenceAxis, ReferenceLineConfig, SeriesConfig, StyleToken, Theme, TooltipConfig, Value,
    YAxisId, tokens,
};

use crate::ChartMargin;
use crate::color::resolve_color;
use crate::plan::{
    Animation, ChartFamily, ChartPlan, GridSpec, LegendItem, LegendSpec, Layout, OverlayLayer,
    ReferenceAreaMark, ReferenceLineMark, TooltipSpec,
};

/// Category field used when the category axis names none
pub const DEFAULT_CATEGORY_KEY: &str = "name";

/// Fill opacity of a reference area without an explicit one
pub const REFERENCE_AREA_OPACITY: f64 = 0.1;

pub fn category_key(axis: &AxisConfig) -> String {
    axis.data_key
        .clone()
        .unwrap_or_else(|| DEFAULT_CATEGORY_KEY.to_string())
}

/// Category value of each row, in data order; rows without one fall back to their index
pub fn category_values(data: &[DataPoint], key: &str) -> Vec<Value> {
    data.iter()
        .enumerate()
        .map(|(i, row)| match row.get(key) {
            Some(v) if !v.is_null() => v.clone(),
            _ => Value::Number(i as f64),
        })
        .collect()
}

/// Series that survive the caller's hidden set, with their original index
pub fn visible_series<'a>(series: &'a [SeriesConfig], hidden: &[String]) -> Vec<(usize, &'a SeriesConfig)> {
    series
        .iter()
        .enumerate()
        .filter(|(_, s)| !hidden.iter().any(|h| h == &s.data_key))
        .collect()
}

pub fn grid_spec(show: bool, layout: Layout, theme: Theme) -> Option<GridSpec> {
    if !show {
        return None;
    }
    // Grid lines run along the value axis
    let (horizontal, vertical) = match layout {
        Layout::Vertical => (tokens::grid::HORIZONTAL, tokens::grid::VERTICAL),
        Layout::Horizontal => (tokens::grid::VERTICAL, tokens::grid::HORIZONTAL),
    };
    Some(GridSpec {
        stroke: theme.resolve(StyleToken::Grid).to_string(),
        stroke_dasharray: tokens::grid::STROKE_DASHARRAY.to_string(),
        horizontal,
        vertical,
    })
}

/// Axis id a y-bound overlay attaches to
fn overlay_axis_id(axis: ReferenceAxis, y_axis_id: Option<YAxisId>, dual: bool) -> String {
    match axis {
        ReferenceAxis::X => "x".to_string(),
        ReferenceAxis::Y if dual => y_axis_id.unwrap_or_default().as_str().to_string(),
        ReferenceAxis::Y => "y".to_string(),
    }
}

/// Reference lines, painted above the data marks
pub fn reference_lines(configs: &[ReferenceLineConfig], dual: bool) -> Vec<ReferenceLineMark> {
    configs
        .iter()
        .map(|c| ReferenceLineMark {
            axis: c.axis,
            value: c.value.clone(),
            axis_id: overlay_axis_id(c.axis, c.y_axis_id, dual),
            label: c.label.clone(),
            color: c
                .color
                .clone()
                .unwrap_or_else(|| tokens::status::NEUTRAL.to_string()),
            stroke_dasharray: c
                .stroke_dasharray
                .clone()
                .unwrap_or_else(|| tokens::grid::STROKE_DASHARRAY.to_string()),
            layer: OverlayLayer::Above,
        })
        .collect()
}

/// Reference areas, painted behind the data marks
pub fn reference_areas(configs: &[ReferenceAreaConfig], dual: bool) -> Vec<ReferenceAreaMark> {
    configs
        .iter()
        .map(|c| ReferenceAreaMark {
            x1: c.x1.clone(),
            x2: c.x2.clone(),
            y1: c.y1,
            y2: c.y2,
            axis_id: overlay_axis_id(ReferenceAxis::Y, c.y_axis_id, dual),
            label: c.label.clone(),
            color: c
                .color
                .clone()
                .unwrap_or_else(|| tokens::status::NEUTRAL.to_string()),
            fill_opacity: c.fill_opacity.unwrap_or(REFERENCE_AREA_OPACITY),
            layer: OverlayLayer::Behind,
        })
        .collect()
}

pub fn legend_spec(config: &LegendConfig, payload: Vec<LegendItem>, theme: Theme) -> LegendSpec {
    LegendSpec {
        show: config.show,
        position: config.position,
        align: config.align,
        interactive: config.interactive,
        payload,
        text_color: theme.resolve(StyleToken::LegendText).to_string(),
    }
}

/// Tooltip spec; `default_total` is the family default for the "Total" row
pub fn tooltip_spec(config: &TooltipConfig, default_total: bool, theme: Theme) -> TooltipSpec {
    TooltipSpec {
        show: config.show,
        show_total: config.show_total.unwrap_or(default_total),
        total_label: config
            .total_label
            .clone()
            .unwrap_or_else(|| tokens::tooltip::TOTAL_LABEL.to_string()),
        value_format: config.value_formatter.clone().unwrap_or_default(),
        label_format: config.label_formatter.clone(),
        background: theme.resolve(StyleToken::TooltipBackground).to_string(),
        border: theme.resolve(StyleToken::TooltipBorder).to_string(),
    }
}

pub fn animation(frame: &FrameConfig, defaults: &ChartDefaults) -> Animation {
    Animation {
        active: frame.animate && defaults.animation_duration_ms > 0,
        duration_ms: defaults.animation_duration_ms,
        easing: defaults.animation_easing.clone(),
    }
}

/// Accessible name: explicit label, else family plus title or series names
pub fn aria_label<'a, I>(frame: &FrameConfig, family: ChartFamily, names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    if let Some(label) = &frame.aria_label {
        return label.clone();
    }
    if let Some(title) = &frame.title {
        return format!("{}: {}", family.label(), title);
    }
    let names: Vec<&str> = names.into_iter().collect();
    if names.is_empty() {
        family.label().to_string()
    } else {
        format!("{} showing {}", family.label(), names.join(", "))
    }
}

pub fn chart_height(frame: &FrameConfig, defaults: &ChartDefaults) -> f64 {
    frame.height.unwrap_or(defaults.height)
}

/// Legend payload for every configured series, hidden ones included
pub fn legend_payload(series: &[SeriesConfig], palette: Option<&[String]>) -> Vec<LegendItem> {
    series
        .iter()
        .enumerate()
        .map(|(i, s)| LegendItem {
            value: s.display_name().to_string(),
            color: resolve_color(s.color.as_deref(), i, palette),
            data_key: s.data_key.clone(),
        })
        .collect()
}

/// Plan skeleton with frame-level fields filled and no axes or marks
pub fn base_plan(
    family: ChartFamily,
    frame: &FrameConfig,
    defaults: &ChartDefaults,
    theme: Theme,
    tooltip: TooltipSpec,
    legend: LegendSpec,
    aria_label: String,
) -> ChartPlan {
    ChartPlan {
        family,
        layout: Layout::Vertical,
        height: chart_height(frame, defaults),
        margin: ChartMargin::standard(),
        categories: Vec::new(),
        category_key: None,
        stack_mode: None,
        bar_gap: None,
        bar_category_gap: None,
        axes: Vec::new(),
        grid: None,
        defs: Vec::new(),
        marks: Vec::new(),
        reference_lines: Vec::new(),
        reference_areas: Vec::new(),
        stack_totals: Vec::new(),
        z_axis: None,
        center: None,
        tooltip,
        legend,
        animation: animation(frame, defaults),
        aria_label,
        text_color: theme.resolve(StyleToken::Text).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_values_fall_back_to_index() {
        let data = vec![
            DataPoint::new().with("m", "Jan"),
            DataPoint::new().with("other", 1),
        ];
        let cats = category_values(&data, "m");
        assert_eq!(cats, vec![Value::from("Jan"), Value::Number(1.0)]);
    }

    #[test]
    fn test_visible_series_keeps_index() {
        let series = vec![SeriesConfig::new("a"), SeriesConfig::new("b"), SeriesConfig::new("c")];
        let visible = visible_series(&series, &["b".to_string()]);
        let idx: Vec<_> = visible.iter().map(|(i, s)| (*i, s.data_key.as_str())).collect();
        assert_eq!(idx, vec![(0, "a"), (2, "c")]);
    }

    #[test]
    fn test_overlay_layers() {
        let line = ReferenceLineConfig {
            value: Value::from(50.0),
            y_axis_id: Some(YAxisId::Right),
            ..Default::default()
        };
        let lines = reference_lines(&[line.clone()], true);
        assert_eq!(lines[0].layer, OverlayLayer::Above);
        assert_eq!(lines[0].axis_id, "right");
        assert_eq!(reference_lines(&[line], false)[0].axis_id, "y");

        let areas = reference_areas(&[ReferenceAreaConfig::default()], false);
        assert_eq!(areas[0].layer, OverlayLayer::Behind);
        assert_eq!(areas[0].fill_opacity, REFERENCE_AREA_OPACITY);
    }

    #[test]
    fn test_aria_label_precedence() {
        let mut frame = FrameConfig::default();
        assert_eq!(aria_label(&frame, ChartFamily::Bar, ["Revenue"]), "Bar chart showing Revenue");
        frame.title = Some("Sales".to_string());
        assert_eq!(aria_label(&frame, ChartFamily::Bar, ["Revenue"]), "Bar chart: Sales");
        frame.aria_label = Some("Quarterly sales".to_string());
        assert_eq!(aria_label(&frame, ChartFamily::Bar, ["Revenue"]), "Quarterly sales");
    }

    #[test]
    fn test_animation_respects_frame_flag() {
        let defaults = ChartDefaults::default();
        let frame = FrameConfig {
            animate: false,
            ..Default::default()
        };
        assert!(!animation(&frame, &defaults).active);
        assert!(animation(&FrameConfig::default(), &defaults).active);
        assert!(!animation(&FrameConfig::default(), &ChartDefaults::compact()).active);
    }
}

//! Radial bar and gauge composers.

use serde::Deserialize;

use vizkit_core::{
    FrameConfig, LegendConfig, PointCallback, RadialDataPoint, StyleToken, Threshold,
    TooltipConfig, ValueFormat, ValueFormatter, dispatch_click, tokens,
};

use crate::cartesian::{aria_label, base_plan, legend_spec, tooltip_spec};
use crate::color::resolve_color;
use crate::plan::{
    CenterLabel, ChartFamily, ChartPlan, GaugeMark, LegendItem, Mark, RadialBarMark, RadialTrack,
};
use crate::shell::{Composer, RenderContext};
use crate::ChartMargin;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Color of the first threshold (ascending) whose value is at or above `value`
///
/// Values beyond every threshold take the highest threshold's color.
pub fn threshold_color(thresholds: &[Threshold], value: f64) -> Option<&str> {
    let mut sorted: Vec<&Threshold> = thresholds.iter().collect();
    sorted.sort_by(|a, b| a.value.total_cmp(&b.value));
    sorted
        .iter()
        .copied()
        .find(|t| t.value >= value)
        .or_else(|| sorted.last().copied())
        .map(|t| t.color.as_str())
}

/// Position of `value` within `[min, max]` as a percentage clamped to `[0, 100]`
pub fn gauge_percentage(value: f64, min: f64, max: f64) -> f64 {
    if max <= min || !value.is_finite() {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0) * 100.0
}

// ============================================================================
// RADIAL BAR
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RadialBarChartProps {
    pub data: Vec<RadialDataPoint>,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    /// Radii as a percentage of the fitting radius
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Ring thickness as a fraction of each ring's band
    pub bar_size: Option<f64>,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Full-sweep track behind each bar
    pub show_background: bool,
    /// Value reaching the full sweep; the largest value when unset
    pub max_value: Option<f64>,
    #[serde(flatten)]
    pub frame: FrameConfig,
    #[serde(skip)]
    pub on_segment_click: Option<PointCallback<RadialDataPoint>>,
}

impl Default for RadialBarChartProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            inner_radius: 20.0,
            outer_radius: 90.0,
            bar_size: None,
            start_angle: 90.0,
            end_angle: -270.0,
            show_background: true,
            max_value: None,
            frame: FrameConfig::default(),
            on_segment_click: None,
        }
    }
}

impl RadialBarChartProps {
    pub fn new(data: Vec<RadialDataPoint>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn click(&self, index: usize) -> bool {
        dispatch_click(self.on_segment_click.as_ref(), &self.data, index)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RadialBarChart;

impl Composer for RadialBarChart {
    type Props = RadialBarChartProps;

    fn family(&self) -> ChartFamily {
        ChartFamily::RadialBar
    }

    fn frame<'a>(&self, props: &'a RadialBarChartProps) -> &'a FrameConfig {
        &props.frame
    }

    fn is_empty(&self, props: &RadialBarChartProps) -> bool {
        props.data.is_empty()
    }

    fn compose(&self, props: &RadialBarChartProps, ctx: &mut RenderContext<'_>) -> ChartPlan {
        let defaults = ctx.defaults;
        let palette = props.frame.colors.as_deref();
        let count = props.data.len();

        let max = props.max_value.unwrap_or_else(|| {
            props
                .data
                .iter()
                .map(|p| p.value)
                .filter(|v| v.is_finite())
                .fold(0.0, f64::max)
        });
        let sweep = props.end_angle - props.start_angle;
        let band = (props.outer_radius - props.inner_radius) / count.max(1) as f64;
        let thickness = band * props.bar_size.unwrap_or(0.8).clamp(0.0, 1.0);
        let track_fill = ctx.theme.resolve(StyleToken::TrackBackground);

        let mut marks = Vec::with_capacity(count);
        let mut payload = Vec::with_capacity(count);
        for (index, point) in props.data.iter().enumerate() {
            let fill = resolve_color(point.color.as_deref(), index, palette);
            let value = if point.value.is_finite() { point.value.max(0.0) } else { 0.0 };
            let share = if max > 0.0 { (value / max).min(1.0) } else { 0.0 };
            let inner = props.inner_radius + band * index as f64;

            marks.push(Mark::RadialBar(RadialBarMark {
                index,
                name: point.name.clone(),
                value,
                fill: fill.clone(),
                inner_radius_pct: inner,
                outer_radius_pct: inner + thickness,
                start_angle: props.start_angle,
                end_angle: props.start_angle + sweep * share,
                track: props.show_background.then(|| RadialTrack {
                    fill: track_fill.to_string(),
                    end_angle: props.end_angle,
                }),
            }));
            payload.push(LegendItem {
                value: point.name.clone(),
                color: fill,
                data_key: point.name.clone(),
            });
        }

        let legend = legend_spec(&props.legend, payload, ctx.theme);
        let tooltip = tooltip_spec(&props.tooltip, false, ctx.theme);
        let label = aria_label(&props.frame, ChartFamily::RadialBar, props.data.iter().map(|p| p.name.as_str()));

        ChartPlan {
            margin: ChartMargin::polar(),
            marks,
            ..base_plan(ChartFamily::RadialBar, &props.frame, defaults, ctx.theme, tooltip, legend, label)
        }
    }
}

// ============================================================================
// GAUGE
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GaugeChartProps {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub thresholds: Vec<Threshold>,
    /// Arc color when no thresholds are given
    pub color: Option<String>,
    /// Caption under the value
    pub label: Option<String>,
    pub unit: Option<String>,
    pub value_formatter: Option<ValueFormat>,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    #[serde(flatten)]
    pub frame: FrameConfig,
}

impl Default for GaugeChartProps {
    fn default() -> Self {
        Self {
            value: 0.0,
            min: 0.0,
            max: 100.0,
            thresholds: Vec::new(),
            color: None,
            label: None,
            unit: None,
            value_formatter: None,
            start_angle: 180.0,
            end_angle: 0.0,
            inner_radius: 70.0,
            outer_radius: 100.0,
            frame: FrameConfig::default(),
        }
    }
}

impl GaugeChartProps {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn thresholds(mut self, thresholds: Vec<Threshold>) -> Self {
        self.thresholds = thresholds;
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GaugeChart;

impl Composer for GaugeChart {
    type Props = GaugeChartProps;

    fn family(&self) -> ChartFamily {
        ChartFamily::Gauge
    }

    fn frame<'a>(&self, props: &'a GaugeChartProps) -> &'a FrameConfig {
        &props.frame
    }

    fn is_empty(&self, props: &GaugeChartProps) -> bool {
        !props.value.is_finite()
    }

    fn compose(&self, props: &GaugeChartProps, ctx: &mut RenderContext<'_>) -> ChartPlan {
        let defaults = ctx.defaults;
        if props.max <= props.min {
            tracing::warn!(min = props.min, max = props.max, "Gauge range is empty, showing 0%");
        }
        let percentage = gauge_percentage(props.value, props.min, props.max);

        let color = threshold_color(&props.thresholds, props.value)
            .map(str::to_string)
            .or_else(|| props.color.clone())
            .unwrap_or_else(|| tokens::color(0).to_string());

        let format = props.value_formatter.clone().unwrap_or_default();
        let mut formatted = format.format(props.value);
        if let Some(unit) = &props.unit {
            formatted.push_str(unit);
        }

        let sweep = props.end_angle - props.start_angle;
        let mark = GaugeMark {
            value: props.value,
            min: props.min,
            max: props.max,
            percentage,
            color,
            track_color: ctx.theme.resolve(StyleToken::TrackBackground).to_string(),
            start_angle: props.start_angle,
            end_angle: props.end_angle,
            value_angle: props.start_angle + sweep * percentage / 100.0,
            inner_radius_pct: props.inner_radius,
            outer_radius_pct: props.outer_radius,
            formatted_value: formatted.clone(),
            label: props.label.clone(),
        };

        let legend = legend_spec(&LegendConfig { show: false, ..Default::default() }, Vec::new(), ctx.theme);
        let tooltip = tooltip_spec(&TooltipConfig { show: false, ..Default::default() }, false, ctx.theme);
        let label = aria_label(&props.frame, ChartFamily::Gauge, [formatted.as_str()]);

        ChartPlan {
            margin: ChartMargin::polar(),
            marks: vec![Mark::Gauge(mark)],
            center: Some(CenterLabel {
                value: formatted,
                caption: props.label.clone(),
            }),
            ..base_plan(ChartFamily::Gauge, &props.frame, defaults, ctx.theme, tooltip, legend, label)
        }
    }
}

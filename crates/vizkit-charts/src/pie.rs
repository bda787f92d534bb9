//! Pie and donut composer.

use serde::{Deserialize, Serialize};

use vizkit_core::{
    FrameConfig, LegendConfig, PieDataPoint, PointCallback, TooltipConfig, ValueFormatter,
    dispatch_click, pie_total,
};

use crate::cartesian::{aria_label, base_plan, legend_spec, tooltip_spec};
use crate::color::resolve_color;
use crate::plan::{CenterLabel, ChartFamily, ChartPlan, LegendItem, Mark, SectorMark};
use crate::shell::{Composer, RenderContext};
use crate::tooltip::percentage;
use crate::ChartMargin;

/// Caption under the donut center value when none is configured
pub const DEFAULT_CENTER_CAPTION: &str = "Total";

/// What each sector's label shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieLabel {
    #[default]
    None,
    Value,
    Percent,
    Name,
    NamePercent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PieChartProps {
    pub data: Vec<PieDataPoint>,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    /// Donut with the engine's default inner radius
    pub donut: bool,
    /// Inner radius as a percentage of the fitting radius; overrides `donut`
    pub inner_radius: Option<f64>,
    pub outer_radius: Option<f64>,
    /// Degrees left empty between sectors
    pub padding_angle: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub active_index: Option<usize>,
    pub label: PieLabel,
    /// Sectors below this share (percent) get no label
    pub label_min_percent: Option<f64>,
    /// Donut center text; the formatted total when unset
    pub center_label: Option<String>,
    pub center_caption: Option<String>,
    #[serde(flatten)]
    pub frame: FrameConfig,
    #[serde(skip)]
    pub on_segment_click: Option<PointCallback<PieDataPoint>>,
}

impl Default for PieChartProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            donut: false,
            inner_radius: None,
            outer_radius: None,
            padding_angle: 0.0,
            start_angle: 90.0,
            end_angle: -270.0,
            active_index: None,
            label: PieLabel::None,
            label_min_percent: None,
            center_label: None,
            center_caption: None,
            frame: FrameConfig::default(),
            on_segment_click: None,
        }
    }
}

impl PieChartProps {
    pub fn new(data: Vec<PieDataPoint>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn donut(mut self) -> Self {
        self.donut = true;
        self
    }

    pub fn click(&self, index: usize) -> bool {
        dispatch_click(self.on_segment_click.as_ref(), &self.data, index)
    }
}

fn sector_label(strategy: PieLabel, name: &str, formatted: &str, pct: f64) -> Option<String> {
    match strategy {
        PieLabel::None => None,
        PieLabel::Value => Some(formatted.to_string()),
        PieLabel::Percent => Some(format!("{:.1}%", pct)),
        PieLabel::Name => Some(name.to_string()),
        PieLabel::NamePercent => Some(format!("{} {:.1}%", name, pct)),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PieChart;

impl Composer for PieChart {
    type Props = PieChartProps;

    fn family(&self) -> ChartFamily {
        ChartFamily::Pie
    }

    fn frame<'a>(&self, props: &'a PieChartProps) -> &'a FrameConfig {
        &props.frame
    }

    fn is_empty(&self, props: &PieChartProps) -> bool {
        props.data.is_empty()
    }

    fn compose(&self, props: &PieChartProps, ctx: &mut RenderContext<'_>) -> ChartPlan {
        let defaults = ctx.defaults;
        let palette = props.frame.colors.as_deref();
        let tooltip = tooltip_spec(&props.tooltip, false, ctx.theme);

        let values: Vec<f64> = props
            .data
            .iter()
            .map(|p| {
                if p.value < 0.0 {
                    tracing::warn!(name = %p.name, value = p.value, "Negative pie value clamped to zero");
                }
                if p.value.is_finite() { p.value.max(0.0) } else { 0.0 }
            })
            .collect();
        let total = pie_total(&props.data);

        let inner = props
            .inner_radius
            .unwrap_or(if props.donut { defaults.donut_inner_radius_pct } else { 0.0 });
        let outer = props.outer_radius.unwrap_or(defaults.pie_outer_radius_pct);
        let min_label = props.label_min_percent.unwrap_or(defaults.pie_label_min_percent);

        // Padding sits after every non-zero sector
        let sweep = props.end_angle - props.start_angle;
        let direction = if sweep < 0.0 { -1.0 } else { 1.0 };
        let non_zero = values.iter().filter(|v| **v > 0.0).count();
        let usable = (sweep.abs() - props.padding_angle * non_zero as f64).max(0.0);

        let mut cursor = props.start_angle;
        let mut marks = Vec::with_capacity(values.len());
        let mut payload = Vec::with_capacity(values.len());
        for (index, (point, &value)) in props.data.iter().zip(&values).enumerate() {
            let fill = resolve_color(point.color.as_deref(), index, palette);
            let share = if total > 0.0 { value / total } else { 0.0 };
            let end = cursor + direction * usable * share;
            let pct = percentage(value, total);
            let formatted = tooltip.value_format.format(value);

            let label = if pct >= min_label {
                sector_label(props.label, &point.name, &formatted, pct)
            } else {
                None
            };

            marks.push(Mark::Sector(SectorMark {
                index,
                name: point.name.clone(),
                value,
                percentage: pct,
                fill: fill.clone(),
                start_angle: cursor,
                end_angle: end,
                inner_radius_pct: inner,
                outer_radius_pct: outer,
                active: props.active_index == Some(index),
                active_offset: defaults.pie_active_offset,
                label,
            }));
            payload.push(LegendItem {
                value: point.name.clone(),
                color: fill,
                data_key: point.name.clone(),
            });

            cursor = if value > 0.0 { end + direction * props.padding_angle } else { end };
        }

        let center = (inner > 0.0).then(|| CenterLabel {
            value: props
                .center_label
                .clone()
                .unwrap_or_else(|| tooltip.value_format.format(total)),
            caption: Some(
                props
                    .center_caption
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CENTER_CAPTION.to_string()),
            ),
        });

        let legend = legend_spec(&props.legend, payload, ctx.theme);
        let label = aria_label(&props.frame, ChartFamily::Pie, props.data.iter().map(|p| p.name.as_str()));

        ChartPlan {
            margin: ChartMargin::polar(),
            marks,
            center,
            ..base_plan(ChartFamily::Pie, &props.frame, defaults, ctx.theme, tooltip, legend, label)
        }
    }
}

//! Area chart composer: overlapping or stacked, gradient or solid fill.

use serde::Deserialize;

use vizkit_core::{
    AxisConfig, CurveType, DataPoint, Domain, FrameConfig, LegendConfig, PointCallback,
    ReferenceAreaConfig, ReferenceLineConfig, SeriesConfig, TooltipConfig, ValueFormat,
    dispatch_click,
};

use crate::axis::{axis_domain, category_axis, numeric_axis, resolve_domain};
use crate::cartesian::{
    aria_label, base_plan, category_key, category_values, grid_spec, legend_payload, legend_spec,
    reference_areas, reference_lines, tooltip_spec, visible_series,
};
use crate::color::resolve_color;
use crate::gradient::gradient_def;
use crate::plan::{AreaMark, AxisPosition, ChartFamily, ChartPlan, Fill, Layout, Mark};
use crate::shell::{Composer, RenderContext};
use crate::stacking::{StackMode, compute_stacks};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AreaChartProps {
    pub data: Vec<DataPoint>,
    pub series: Vec<SeriesConfig>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    /// `grouped` draws overlapping areas from zero
    pub variant: StackMode,
    pub curve: CurveType,
    /// Gradient fill; solid fill at each series' `fillOpacity` otherwise
    pub gradient: bool,
    pub connect_nulls: bool,
    pub show_grid: bool,
    pub reference_lines: Vec<ReferenceLineConfig>,
    pub reference_areas: Vec<ReferenceAreaConfig>,
    pub hidden_series: Vec<String>,
    #[serde(flatten)]
    pub frame: FrameConfig,
    #[serde(skip)]
    pub on_data_point_click: Option<PointCallback<DataPoint>>,
}

impl Default for AreaChartProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            series: Vec::new(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            variant: StackMode::Grouped,
            curve: CurveType::default(),
            gradient: true,
            connect_nulls: false,
            show_grid: true,
            reference_lines: Vec::new(),
            reference_areas: Vec::new(),
            hidden_series: Vec::new(),
            frame: FrameConfig::default(),
            on_data_point_click: None,
        }
    }
}

impl AreaChartProps {
    pub fn new(data: Vec<DataPoint>, series: Vec<SeriesConfig>) -> Self {
        Self {
            data,
            series,
            ..Default::default()
        }
    }

    pub fn variant(mut self, variant: StackMode) -> Self {
        self.variant = variant;
        self
    }

    pub fn click(&self, index: usize) -> bool {
        dispatch_click(self.on_data_point_click.as_ref(), &self.data, index)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AreaChart;

impl Composer for AreaChart {
    type Props = AreaChartProps;

    fn family(&self) -> ChartFamily {
        ChartFamily::Area
    }

    fn frame<'a>(&self, props: &'a AreaChartProps) -> &'a FrameConfig {
        &props.frame
    }

    fn is_empty(&self, props: &AreaChartProps) -> bool {
        props.data.is_empty()
    }

    fn compose(&self, props: &AreaChartProps, ctx: &mut RenderContext<'_>) -> ChartPlan {
        let defaults = ctx.defaults;
        let mode = props.variant;
        let palette = props.frame.colors.as_deref();
        let key = category_key(&props.x_axis);
        let categories = category_values(&props.data, &key);
        let visible = visible_series(&props.series, &props.hidden_series);

        let refs: Vec<&SeriesConfig> = visible.iter().map(|(_, s)| *s).collect();
        let stacks = compute_stacks(&props.data, &refs, mode);

        let mut defs = Vec::new();
        let mut marks = Vec::with_capacity(visible.len());
        for (&(index, series), stacked) in visible.iter().zip(stacks.series.iter()) {
            let color = resolve_color(series.color.as_deref(), index, palette);
            let fill = if props.gradient {
                let id = ctx.gradients.id_for(&series.data_key);
                defs.push(gradient_def(id.clone(), &color, defaults));
                Fill::Gradient { id }
            } else {
                Fill::Solid {
                    color: color.clone(),
                    opacity: series.fill_opacity.unwrap_or(defaults.area_fill_opacity),
                }
            };

            marks.push(Mark::Area(AreaMark {
                data_key: series.data_key.clone(),
                name: series.display_name().to_string(),
                stroke: color,
                stroke_width: defaults.stroke_width,
                fill,
                stack_id: stacked.stack_id.clone(),
                curve: props.curve,
                connect_nulls: props.connect_nulls,
                y_axis_id: "y".to_string(),
                active_dot_radius: defaults.active_dot_radius,
                segments: stacked.segments.clone(),
            }));
        }

        let (domain, fallback_format) = match mode {
            StackMode::StackedPercent => (
                resolve_domain(
                    Some(&props.y_axis.domain.unwrap_or(Domain::fixed(0.0, 1.0))),
                    Some((0.0, 1.0)),
                    true,
                ),
                ValueFormat::Percent { decimals: 0 },
            ),
            _ => (
                axis_domain(&props.y_axis, stacks.extent(), true),
                ValueFormat::Grouped,
            ),
        };

        let axes = vec![
            category_axis("x", AxisPosition::Bottom, &props.x_axis, &categories, ctx.theme),
            numeric_axis("y", AxisPosition::Left, &props.y_axis, domain, &fallback_format, ctx.theme),
        ];

        let legend = legend_spec(&props.legend, legend_payload(&props.series, palette), ctx.theme);
        let tooltip = tooltip_spec(&props.tooltip, mode.is_stacked(), ctx.theme);
        let label = aria_label(&props.frame, ChartFamily::Area, visible.iter().map(|(_, s)| s.display_name()));

        ChartPlan {
            categories: categories.iter().map(ToString::to_string).collect(),
            category_key: Some(key),
            stack_mode: Some(mode),
            axes,
            grid: grid_spec(props.show_grid, Layout::Vertical, ctx.theme),
            defs,
            marks,
            reference_lines: reference_lines(&props.reference_lines, false),
            reference_areas: reference_areas(&props.reference_areas, false),
            stack_totals: stacks.totals,
            ..base_plan(ChartFamily::Area, &props.frame, defaults, ctx.theme, tooltip, legend, label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ChartInstance;
    use crate::tooltip::category_tooltip;

    fn props() -> AreaChartProps {
        AreaChartProps::new(
            vec![
                DataPoint::new().with("name", "Jan").with("organic", 40).with("paid", 24),
                DataPoint::new().with("name", "Feb").with("organic", 30).with("paid", 13),
            ],
            vec![SeriesConfig::new("organic"), SeriesConfig::new("paid")],
        )
    }

    #[test]
    fn test_gradient_ids_stable_across_renders() {
        let mut chart = ChartInstance::mount(AreaChart);
        let first = chart.render(&props());
        let mut changed = props();
        changed.data[0].insert("organic", 55);
        let second = chart.render(&changed);

        let ids = |out: &crate::shell::ChartOutput| -> Vec<String> {
            out.plan().unwrap().defs.iter().map(|d| d.id.clone()).collect()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(ids(&first).len(), 2);

        let mut remounted = ChartInstance::mount(AreaChart);
        let third = remounted.render(&props());
        assert!(ids(&third).iter().all(|id| !ids(&first).contains(id)));
    }

    #[test]
    fn test_stacked_area_segments_and_total() {
        let mut chart = ChartInstance::mount(AreaChart);
        let out = chart.render(&props().variant(StackMode::Stacked));
        let plan = out.plan().unwrap();
        let paid = plan.areas().nth(1).unwrap();
        let seg = paid.segments[0].unwrap();
        assert_eq!((seg.base, seg.top), (40.0, 64.0));
        assert!(plan.tooltip.show_total);
        assert_eq!(category_tooltip(plan, 1).unwrap().total.unwrap().value, 43.0);
    }

    #[test]
    fn test_solid_fill_uses_series_opacity() {
        let mut p = props();
        p.gradient = false;
        p.series[0].fill_opacity = Some(0.6);
        let mut chart = ChartInstance::mount(AreaChart);
        let out = chart.render(&p);
        let plan = out.plan().unwrap();
        assert!(plan.defs.is_empty());
        let opacities: Vec<_> = plan.areas().map(|a| a.fill.opacity()).collect();
        assert_eq!(opacities, vec![0.6, 0.3]);
    }
}

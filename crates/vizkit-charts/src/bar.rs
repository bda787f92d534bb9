//! Bar chart composer: grouped, stacked and stacked-percent, vertical or horizontal.

use serde::Deserialize;

use vizkit_core::{
    AxisConfig, DataPoint, Domain, FrameConfig, LegendConfig, PointCallback, ReferenceAreaConfig,
    ReferenceLineConfig, SeriesConfig, TooltipConfig, ValueFormat, dispatch_click,
};

use crate::axis::{axis_domain, category_axis, numeric_axis, resolve_domain};
use crate::cartesian::{
    aria_label, base_plan, category_key, category_values, grid_spec, legend_payload, legend_spec,
    reference_areas, reference_lines, tooltip_spec, visible_series,
};
use crate::color::resolve_color;
use crate::plan::{AxisPosition, BarMark, ChartFamily, ChartPlan, CornerRadius, Fill, Layout, Mark};
use crate::shell::{Composer, RenderContext};
use crate::stacking::{StackMode, compute_stacks};

/// Corner radii for the series at `index` of `count` rendered series
///
/// Grouped bars are fully rounded on their outer end. Stacked bars round only
/// the last series, so interior seams stay square. Vertical bars round their
/// top corners, horizontal bars their trailing (right) corners.
pub fn corner_radius(index: usize, count: usize, radius: f64, mode: StackMode, layout: Layout) -> CornerRadius {
    let r = match mode {
        StackMode::Grouped => radius,
        StackMode::Stacked | StackMode::StackedPercent => {
            if index + 1 == count {
                radius
            } else {
                0.0
            }
        }
    };
    match layout {
        Layout::Vertical => [r, r, 0.0, 0.0],
        Layout::Horizontal => [0.0, r, r, 0.0],
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BarChartProps {
    pub data: Vec<DataPoint>,
    pub series: Vec<SeriesConfig>,
    /// Category axis, whichever side it is drawn on
    pub x_axis: AxisConfig,
    /// Value axis, whichever side it is drawn on
    pub y_axis: AxisConfig,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    pub variant: StackMode,
    pub layout: Layout,
    /// Corner radius; engine default when unset
    pub radius: Option<f64>,
    pub bar_size: Option<f64>,
    pub max_bar_size: Option<f64>,
    pub bar_gap: Option<f64>,
    pub bar_category_gap: Option<f64>,
    /// Single-series charts: one palette color per category
    pub color_by_category: bool,
    pub show_grid: bool,
    pub reference_lines: Vec<ReferenceLineConfig>,
    pub reference_areas: Vec<ReferenceAreaConfig>,
    pub hidden_series: Vec<String>,
    #[serde(flatten)]
    pub frame: FrameConfig,
    #[serde(skip)]
    pub on_data_point_click: Option<PointCallback<DataPoint>>,
}

impl Default for BarChartProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            series: Vec::new(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            variant: StackMode::Grouped,
            layout: Layout::Vertical,
            radius: None,
            bar_size: None,
            max_bar_size: None,
            bar_gap: None,
            bar_category_gap: None,
            color_by_category: false,
            show_grid: true,
            reference_lines: Vec::new(),
            reference_areas: Vec::new(),
            hidden_series: Vec::new(),
            frame: FrameConfig::default(),
            on_data_point_click: None,
        }
    }
}

impl BarChartProps {
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

    pub fn horizontal(mut self) -> Self {
        self.layout = Layout::Horizontal;
        self
    }

    pub fn click(&self, index: usize) -> bool {
        dispatch_click(self.on_data_point_click.as_ref(), &self.data, index)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BarChart;

impl Composer for BarChart {
    type Props = BarChartProps;

    fn family(&self) -> ChartFamily {
        ChartFamily::Bar
    }

    fn frame<'a>(&self, props: &'a BarChartProps) -> &'a FrameConfig {
        &props.frame
    }

    fn is_empty(&self, props: &BarChartProps) -> bool {
        props.data.is_empty()
    }

    fn compose(&self, props: &BarChartProps, ctx: &mut RenderContext<'_>) -> ChartPlan {
        let defaults = ctx.defaults;
        let mode = props.variant;
        let layout = props.layout;
        let palette = props.frame.colors.as_deref();
        let key = category_key(&props.x_axis);
        let categories = category_values(&props.data, &key);
        let visible = visible_series(&props.series, &props.hidden_series);

        let (category_id, value_id, category_pos, value_pos) = match layout {
            Layout::Vertical => ("x", "y", AxisPosition::Bottom, AxisPosition::Left),
            Layout::Horizontal => ("y", "x", AxisPosition::Left, AxisPosition::Bottom),
        };

        let refs: Vec<&SeriesConfig> = visible.iter().map(|(_, s)| *s).collect();
        let stacks = compute_stacks(&props.data, &refs, mode);
        let radius = props.radius.unwrap_or(defaults.bar_radius);
        let count = visible.len();

        let cell_colors = (props.color_by_category && count == 1).then(|| {
            (0..props.data.len())
                .map(|i| resolve_color(None, i, palette))
                .collect::<Vec<_>>()
        });

        let marks: Vec<Mark> = visible
            .iter()
            .zip(stacks.series.iter())
            .enumerate()
            .map(|(position, (&(index, series), stacked))| {
                Mark::Bar(BarMark {
                    data_key: series.data_key.clone(),
                    name: series.display_name().to_string(),
                    fill: Fill::solid(resolve_color(series.color.as_deref(), index, palette)),
                    stack_id: stacked.stack_id.clone(),
                    radius: corner_radius(position, count, radius, mode, layout),
                    y_axis_id: value_id.to_string(),
                    bar_size: props.bar_size,
                    max_bar_size: props.max_bar_size.unwrap_or(defaults.max_bar_size),
                    segments: stacked.segments.clone(),
                    cell_colors: cell_colors.clone(),
                })
            })
            .collect();

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
            category_axis(category_id, category_pos, &props.x_axis, &categories, ctx.theme),
            numeric_axis(value_id, value_pos, &props.y_axis, domain, &fallback_format, ctx.theme),
        ];

        let legend = legend_spec(&props.legend, legend_payload(&props.series, palette), ctx.theme);
        let tooltip = tooltip_spec(&props.tooltip, mode.is_stacked(), ctx.theme);
        let label = aria_label(&props.frame, ChartFamily::Bar, visible.iter().map(|(_, s)| s.display_name()));

        ChartPlan {
            layout,
            categories: categories.iter().map(ToString::to_string).collect(),
            category_key: Some(key),
            stack_mode: Some(mode),
            bar_gap: props.bar_gap,
            bar_category_gap: props.bar_category_gap,
            axes,
            grid: grid_spec(props.show_grid, layout, ctx.theme),
            marks,
            reference_lines: reference_lines(&props.reference_lines, false),
            reference_areas: reference_areas(&props.reference_areas, false),
            stack_totals: stacks.totals,
            ..base_plan(ChartFamily::Bar, &props.frame, defaults, ctx.theme, tooltip, legend, label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientRegistry;
    use crate::tooltip::category_tooltip;
    use vizkit_core::{ChartDefaults, Theme, tokens::palettes};

    fn data() -> Vec<DataPoint> {
        vec![
            DataPoint::new().with("name", "Q1").with("a", 10).with("b", 20).with("c", 5),
            DataPoint::new().with("name", "Q2").with("a", 15).with("b", 5).with("c", 10),
        ]
    }

    fn series() -> Vec<SeriesConfig> {
        vec![SeriesConfig::new("a"), SeriesConfig::new("b"), SeriesConfig::new("c")]
    }

    fn compose(props: &BarChartProps) -> ChartPlan {
        let defaults = ChartDefaults::default();
        let mut gradients = GradientRegistry::with_namespace("test");
        let mut ctx = RenderContext {
            theme: Theme::light(),
            defaults: &defaults,
            gradients: &mut gradients,
        };
        BarChart.compose(props, &mut ctx)
    }

    #[test]
    fn test_only_last_stacked_series_is_rounded() {
        let plan = compose(&BarChartProps::new(data(), series()).variant(StackMode::Stacked));
        let radii: Vec<_> = plan.bars().map(|b| b.radius).collect();
        assert_eq!(radii[0], [0.0; 4]);
        assert_eq!(radii[1], [0.0; 4]);
        assert_eq!(radii[2], [4.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_grouped_bars_all_rounded() {
        let plan = compose(&BarChartProps::new(data(), series()));
        assert!(plan.bars().all(|b| b.radius == [4.0, 4.0, 0.0, 0.0]));
        assert!(plan.stack_totals.is_empty());
        assert!(!plan.tooltip.show_total);
    }

    #[test]
    fn test_horizontal_rounds_trailing_corners_and_swaps_axes() {
        let plan = compose(&BarChartProps::new(data(), series()).variant(StackMode::Stacked).horizontal());
        let last = plan.bars().last().unwrap();
        assert_eq!(last.radius, [0.0, 4.0, 4.0, 0.0]);
        assert_eq!(last.y_axis_id, "x");
        assert_eq!(plan.axis("y").unwrap().position, AxisPosition::Left);
        assert!(plan.axis("x").unwrap().domain.is_some());
    }

    #[test]
    fn test_stacked_totals_and_tooltip() {
        let plan = compose(&BarChartProps::new(data(), series()).variant(StackMode::Stacked));
        assert_eq!(plan.totals("stack"), Some(&[35.0, 30.0][..]));
        let tip = category_tooltip(&plan, 0).unwrap();
        assert_eq!(tip.total.unwrap().value, 35.0);
        assert_eq!(plan.axis("y").unwrap().domain, Some((0.0, 40.0)));
    }

    #[test]
    fn test_stacked_percent_axis() {
        let plan = compose(&BarChartProps::new(data(), series()).variant(StackMode::StackedPercent));
        let axis = plan.axis("y").unwrap();
        assert_eq!(axis.domain, Some((0.0, 1.0)));
        assert_eq!(axis.ticks.last().unwrap().label, "100%");
        let top = plan.bars().last().unwrap().segments[0].unwrap();
        assert!((top.top - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_color_by_category() {
        let mut props = BarChartProps::new(data(), vec![SeriesConfig::new("a")]);
        props.color_by_category = true;
        let plan = compose(&props);
        let cells = plan.bars().next().unwrap().cell_colors.clone().unwrap();
        assert_eq!(cells, vec![palettes::PRIMARY[0].to_string(), palettes::PRIMARY[1].to_string()]);
    }

    #[test]
    fn test_corner_radius_policy() {
        for mode in [StackMode::Stacked, StackMode::StackedPercent] {
            assert_eq!(corner_radius(0, 2, 6.0, mode, Layout::Vertical), [0.0; 4]);
            assert_eq!(corner_radius(1, 2, 6.0, mode, Layout::Vertical), [6.0, 6.0, 0.0, 0.0]);
        }
        assert_eq!(corner_radius(0, 2, 6.0, StackMode::Grouped, Layout::Horizontal), [0.0, 6.0, 6.0, 0.0]);
    }
}

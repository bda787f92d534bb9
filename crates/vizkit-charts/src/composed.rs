//! Composed chart: line, bar and area series mixed on one category axis,
//! each bound to the left or right value axis.

use serde::Deserialize;

use vizkit_core::{
    AxisConfig, ComposedSeriesConfig, CurveType, DataPoint, FrameConfig, LegendConfig,
    PointCallback, ReferenceAreaConfig, ReferenceLineConfig, SeriesConfig, SeriesType,
    TooltipConfig, ValueFormat, YAxisId, dispatch_click,
};

use crate::axis::{axis_domain, category_axis, numeric_axis, value_extent};
use crate::bar::corner_radius;
use crate::cartesian::{
    aria_label, base_plan, category_key, category_values, grid_spec, legend_spec,
    reference_areas, reference_lines, tooltip_spec,
};
use crate::color::resolve_color;
use crate::gradient::gradient_def;
use crate::plan::{
    AreaMark, AxisPosition, BarMark, ChartFamily, ChartPlan, Fill, Layout, LegendItem, LineMark,
    Mark,
};
use crate::shell::{Composer, RenderContext};
use crate::stacking::{Segment, StackMode, compute_stacks};
use crate::ChartMargin;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComposedChartProps {
    pub data: Vec<DataPoint>,
    pub series: Vec<ComposedSeriesConfig>,
    pub x_axis: AxisConfig,
    /// Left value axis
    pub y_axis: AxisConfig,
    /// Right value axis; drawn when set or when any series binds to it
    pub right_y_axis: Option<AxisConfig>,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    pub curve: CurveType,
    pub bar_size: Option<f64>,
    /// Gradient fill for area series
    pub gradient: bool,
    pub show_grid: bool,
    pub reference_lines: Vec<ReferenceLineConfig>,
    pub reference_areas: Vec<ReferenceAreaConfig>,
    pub hidden_series: Vec<String>,
    #[serde(flatten)]
    pub frame: FrameConfig,
    #[serde(skip)]
    pub on_data_point_click: Option<PointCallback<DataPoint>>,
}

impl Default for ComposedChartProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            series: Vec::new(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            right_y_axis: None,
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            curve: CurveType::default(),
            bar_size: None,
            gradient: true,
            show_grid: true,
            reference_lines: Vec::new(),
            reference_areas: Vec::new(),
            hidden_series: Vec::new(),
            frame: FrameConfig::default(),
            on_data_point_click: None,
        }
    }
}

impl ComposedChartProps {
    pub fn new(data: Vec<DataPoint>, series: Vec<ComposedSeriesConfig>) -> Self {
        Self {
            data,
            series,
            ..Default::default()
        }
    }

    pub fn click(&self, index: usize) -> bool {
        dispatch_click(self.on_data_point_click.as_ref(), &self.data, index)
    }
}

/// Stack group key for a composed bar: `"{axis}:{stackId}"`
pub fn stack_key(axis: YAxisId, stack_id: &str) -> String {
    format!("{}:{}", axis.as_str(), stack_id)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ComposedChart;

impl Composer for ComposedChart {
    type Props = ComposedChartProps;

    fn family(&self) -> ChartFamily {
        ChartFamily::Composed
    }

    fn frame<'a>(&self, props: &'a ComposedChartProps) -> &'a FrameConfig {
        &props.frame
    }

    fn is_empty(&self, props: &ComposedChartProps) -> bool {
        props.data.is_empty()
    }

    fn compose(&self, props: &ComposedChartProps, ctx: &mut RenderContext<'_>) -> ChartPlan {
        let defaults = ctx.defaults;
        let palette = props.frame.colors.as_deref();
        let key = category_key(&props.x_axis);
        let categories = category_values(&props.data, &key);

        let visible: Vec<(usize, &ComposedSeriesConfig)> = props
            .series
            .iter()
            .enumerate()
            .filter(|(_, s)| !props.hidden_series.contains(&s.series.data_key))
            .collect();

        // Only bars with an explicit stackId stack; everything else starts at zero.
        // The same stackId on the two axes makes two separate stacks.
        let stack_members: Vec<SeriesConfig> = visible
            .iter()
            .filter(|(_, s)| s.kind == SeriesType::Bar)
            .filter_map(|(_, s)| {
                let id = s.series.stack_id.as_deref()?;
                Some(SeriesConfig {
                    stack_id: Some(stack_key(s.y_axis_id, id)),
                    ..s.series.clone()
                })
            })
            .collect();
        let stacked_bars: Vec<&SeriesConfig> = stack_members.iter().collect();
        let stacks = compute_stacks(&props.data, &stacked_bars, StackMode::Stacked);

        let mut defs = Vec::new();
        let mut marks = Vec::with_capacity(visible.len());
        let mut left_values = Vec::new();
        let mut right_values = Vec::new();

        for &(index, config) in &visible {
            let series = &config.series;
            let color = resolve_color(series.color.as_deref(), index, palette);
            let axis_id = config.y_axis_id.as_str().to_string();
            let raw: Vec<Option<f64>> = props.data.iter().map(|r| r.number(&series.data_key)).collect();
            let unstacked = || -> Vec<Option<Segment>> {
                raw.iter()
                    .map(|v| v.map(|value| Segment { base: 0.0, top: value, value }))
                    .collect()
            };

            let mark = match config.kind {
                SeriesType::Line => Mark::Line(LineMark {
                    data_key: series.data_key.clone(),
                    name: series.display_name().to_string(),
                    color: color.clone(),
                    stroke_width: defaults.stroke_width,
                    curve: props.curve,
                    dot_radius: series.show_dots.unwrap_or(false).then_some(defaults.dot_radius),
                    active_dot_radius: defaults.active_dot_radius,
                    stroke_dasharray: series.stroke_dasharray.clone(),
                    connect_nulls: false,
                    y_axis_id: axis_id,
                    fill: Fill::None,
                    values: raw.clone(),
                }),
                SeriesType::Bar => {
                    let stacked = stacks
                        .series(&series.data_key)
                        .and_then(|s| Some((s, s.stack_id.clone()?)));
                    let (segments, radius, stack_id) = match stacked {
                        Some((s, key)) => {
                            // Only the last member of each stack group is rounded
                            let group: Vec<&str> = stack_members
                                .iter()
                                .filter(|m| m.stack_id.as_deref() == Some(key.as_str()))
                                .map(|m| m.data_key.as_str())
                                .collect();
                            let position = group.iter().position(|k| *k == series.data_key).unwrap_or(0);
                            let r = corner_radius(
                                position,
                                group.len(),
                                defaults.bar_radius,
                                StackMode::Stacked,
                                Layout::Vertical,
                            );
                            (s.segments.clone(), r, Some(key))
                        }
                        None => (
                            unstacked(),
                            corner_radius(0, 1, defaults.bar_radius, StackMode::Grouped, Layout::Vertical),
                            None,
                        ),
                    };
                    Mark::Bar(BarMark {
                        data_key: series.data_key.clone(),
                        name: series.display_name().to_string(),
                        fill: Fill::solid(color.clone()),
                        stack_id,
                        radius,
                        y_axis_id: axis_id,
                        bar_size: props.bar_size,
                        max_bar_size: defaults.max_bar_size,
                        segments,
                        cell_colors: None,
                    })
                }
                SeriesType::Area => {
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
                    Mark::Area(AreaMark {
                        data_key: series.data_key.clone(),
                        name: series.display_name().to_string(),
                        stroke: color.clone(),
                        stroke_width: defaults.stroke_width,
                        fill,
                        stack_id: None,
                        curve: props.curve,
                        connect_nulls: false,
                        y_axis_id: axis_id,
                        active_dot_radius: defaults.active_dot_radius,
                        segments: unstacked(),
                    })
                }
            };

            let bucket = match config.y_axis_id {
                YAxisId::Left => &mut left_values,
                YAxisId::Right => &mut right_values,
            };
            match &mark {
                Mark::Bar(b) => bucket.extend(b.segments.iter().flatten().flat_map(|s| [s.base, s.top])),
                _ => bucket.extend(raw.iter().flatten().copied()),
            }
            marks.push(mark);
        }

        let has_right = props.right_y_axis.is_some() || visible.iter().any(|(_, s)| s.y_axis_id == YAxisId::Right);

        let left_domain = axis_domain(&props.y_axis, value_extent(left_values), true);
        let mut axes = vec![
            category_axis("x", AxisPosition::Bottom, &props.x_axis, &categories, ctx.theme),
            numeric_axis("left", AxisPosition::Left, &props.y_axis, left_domain, &ValueFormat::Grouped, ctx.theme),
        ];
        if has_right {
            let right_config = props.right_y_axis.clone().unwrap_or_default();
            let right_domain = axis_domain(&right_config, value_extent(right_values), true);
            axes.push(numeric_axis(
                "right",
                AxisPosition::Right,
                &right_config,
                right_domain,
                &ValueFormat::Grouped,
                ctx.theme,
            ));
        }

        let payload = props
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| LegendItem {
                value: s.series.display_name().to_string(),
                color: resolve_color(s.series.color.as_deref(), i, palette),
                data_key: s.series.data_key.clone(),
            })
            .collect();
        let legend = legend_spec(&props.legend, payload, ctx.theme);
        let tooltip = tooltip_spec(&props.tooltip, false, ctx.theme);
        let label = aria_label(
            &props.frame,
            ChartFamily::Composed,
            visible.iter().map(|(_, s)| s.series.display_name()),
        );

        ChartPlan {
            margin: if has_right { ChartMargin::dual_axis() } else { ChartMargin::standard() },
            categories: categories.iter().map(ToString::to_string).collect(),
            category_key: Some(key),
            axes,
            grid: grid_spec(props.show_grid, Layout::Vertical, ctx.theme),
            defs,
            marks,
            reference_lines: reference_lines(&props.reference_lines, true),
            reference_areas: reference_areas(&props.reference_areas, true),
            stack_totals: stacks.totals,
            ..base_plan(ChartFamily::Composed, &props.frame, defaults, ctx.theme, tooltip, legend, label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientRegistry;
    use vizkit_core::{ChartDefaults, Theme};

    fn compose(props: &ComposedChartProps) -> ChartPlan {
        let defaults = ChartDefaults::default();
        let mut gradients = GradientRegistry::with_namespace("test");
        let mut ctx = RenderContext {
            theme: Theme::light(),
            defaults: &defaults,
            gradients: &mut gradients,
        };
        ComposedChart.compose(props, &mut ctx)
    }

    fn props() -> ComposedChartProps {
        ComposedChartProps::new(
            vec![
                DataPoint::new().with("name", "Jan").with("revenue", 4000).with("margin", 0.32).with("visits", 900),
                DataPoint::new().with("name", "Feb").with("revenue", 3000).with("margin", 0.41).with("visits", 1200),
            ],
            vec![
                ComposedSeriesConfig::new("margin", SeriesType::Line).on_right(),
                ComposedSeriesConfig::new("revenue", SeriesType::Bar),
                ComposedSeriesConfig::new("visits", SeriesType::Area),
            ],
        )
    }

    #[test]
    fn test_marks_follow_data_order() {
        let plan = compose(&props());
        let kinds: Vec<_> = plan
            .marks
            .iter()
            .map(|m| match m {
                Mark::Line(_) => "line",
                Mark::Bar(_) => "bar",
                Mark::Area(_) => "area",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["line", "bar", "area"]);
    }

    #[test]
    fn test_right_axis_domain_is_independent() {
        let mut p = props();
        p.right_y_axis = Some(AxisConfig::default().with_formatter(ValueFormat::Percent { decimals: 0 }));
        let plan = compose(&p);

        let line = plan.lines().next().unwrap();
        assert_eq!(line.y_axis_id, "right");
        let right = plan.axis("right").unwrap();
        assert_eq!(right.domain, Some((0.0, 0.5)));
        assert_eq!(right.ticks.last().unwrap().label, "50%");
        assert_eq!(plan.axis("left").unwrap().domain, Some((0.0, 4000.0)));
        assert_eq!(plan.margin, ChartMargin::dual_axis());
    }

    #[test]
    fn test_gradients_only_for_areas() {
        let plan = compose(&props());
        assert_eq!(plan.defs.len(), 1);
        let area = plan.areas().next().unwrap();
        assert_eq!(area.fill, Fill::Gradient { id: plan.defs[0].id.clone() });
    }

    #[test]
    fn test_same_stack_id_on_both_axes_stays_separate() {
        let data = vec![
            DataPoint::new().with("name", "Jan").with("a", 10).with("b", 20).with("c", 5),
            DataPoint::new().with("name", "Feb").with("a", 15).with("b", 5).with("c", 7),
        ];
        let mut series = vec![
            ComposedSeriesConfig::new("a", SeriesType::Bar),
            ComposedSeriesConfig::new("b", SeriesType::Bar),
            ComposedSeriesConfig::new("c", SeriesType::Bar).on_right(),
        ];
        for s in &mut series {
            s.series.stack_id = Some("s".to_string());
        }
        let plan = compose(&ComposedChartProps::new(data, series));

        assert_eq!(plan.totals("left:s"), Some(&[30.0, 20.0][..]));
        assert_eq!(plan.totals("right:s"), Some(&[5.0, 7.0][..]));

        let bars: Vec<&BarMark> = plan.bars().collect();
        // The right-axis bar starts from zero, not on top of the left stack
        assert_eq!(bars[2].segments[0].unwrap().base, 0.0);
        assert_eq!(bars[2].stack_id.as_deref(), Some("right:s"));
        assert_eq!(plan.axis("right").unwrap().domain, Some((0.0, 8.0)));
        // Each group rounds its own top bar
        assert_eq!(bars[0].radius, [0.0; 4]);
        assert_ne!(bars[1].radius, [0.0; 4]);
        assert_ne!(bars[2].radius, [0.0; 4]);
    }

    #[test]
    fn test_no_right_axis_without_bindings() {
        let mut p = props();
        p.series[0].y_axis_id = YAxisId::Left;
        let plan = compose(&p);
        assert!(plan.axis("right").is_none());
        assert_eq!(plan.margin, ChartMargin::standard());
    }
}

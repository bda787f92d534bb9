//! Line chart composer.

use serde::Deserialize;

use vizkit_core::{
    AxisConfig, CurveType, DataPoint, FrameConfig, LegendConfig, PointCallback, ReferenceAreaConfig,
    ReferenceLineConfig, SeriesConfig, TooltipConfig, ValueFormat, dispatch_click,
};

use crate::axis::{axis_domain, category_axis, numeric_axis, value_extent};
use crate::cartesian::{
    aria_label, base_plan, category_key, category_values, grid_spec, legend_payload, legend_spec,
    reference_areas, reference_lines, tooltip_spec, visible_series,
};
use crate::color::resolve_color;
use crate::gradient::gradient_def;
use crate::plan::{AxisPosition, ChartFamily, ChartPlan, Fill, Layout, LineMark, Mark};
use crate::shell::{Composer, RenderContext};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineChartProps {
    pub data: Vec<DataPoint>,
    pub series: Vec<SeriesConfig>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    pub curve: CurveType,
    pub show_grid: bool,
    /// Dots for series that leave `showDots` unset
    pub show_dots: bool,
    pub connect_nulls: bool,
    /// Faded gradient fill under each line
    pub gradient: bool,
    pub reference_lines: Vec<ReferenceLineConfig>,
    pub reference_areas: Vec<ReferenceAreaConfig>,
    /// Data keys the caller has toggled off
    pub hidden_series: Vec<String>,
    #[serde(flatten)]
    pub frame: FrameConfig,
    #[serde(skip)]
    pub on_data_point_click: Option<PointCallback<DataPoint>>,
}

impl Default for LineChartProps {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            series: Vec::new(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            curve: CurveType::default(),
            show_grid: true,
            show_dots: true,
            connect_nulls: false,
            gradient: false,
            reference_lines: Vec::new(),
            reference_areas: Vec::new(),
            hidden_series: Vec::new(),
            frame: FrameConfig::default(),
            on_data_point_click: None,
        }
    }
}

impl LineChartProps {
    pub fn new(data: Vec<DataPoint>, series: Vec<SeriesConfig>) -> Self {
        Self {
            data,
            series,
            ..Default::default()
        }
    }

    /// Invoke the click callback for row `index`
    pub fn click(&self, index: usize) -> bool {
        dispatch_click(self.on_data_point_click.as_ref(), &self.data, index)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LineChart;

impl Composer for LineChart {
    type Props = LineChartProps;

    fn family(&self) -> ChartFamily {
        ChartFamily::Line
    }

    fn frame<'a>(&self, props: &'a LineChartProps) -> &'a FrameConfig {
        &props.frame
    }

    fn is_empty(&self, props: &LineChartProps) -> bool {
        props.data.is_empty()
    }

    fn compose(&self, props: &LineChartProps, ctx: &mut RenderContext<'_>) -> ChartPlan {
        let defaults = ctx.defaults;
        let palette = props.frame.colors.as_deref();
        let key = category_key(&props.x_axis);
        let categories = category_values(&props.data, &key);
        let visible = visible_series(&props.series, &props.hidden_series);

        let mut defs = Vec::new();
        let mut marks = Vec::with_capacity(visible.len());
        for &(index, series) in &visible {
            let color = resolve_color(series.color.as_deref(), index, palette);
            let values: Vec<Option<f64>> = props
                .data
                .iter()
                .map(|row| row.number(&series.data_key))
                .collect();

            let fill = if props.gradient {
                let id = ctx.gradients.id_for(&series.data_key);
                defs.push(gradient_def(id.clone(), &color, defaults));
                Fill::Gradient { id }
            } else {
                Fill::None
            };

            let show_dots = series.show_dots.unwrap_or(props.show_dots);
            marks.push(Mark::Line(LineMark {
                data_key: series.data_key.clone(),
                name: series.display_name().to_string(),
                color,
                stroke_width: defaults.stroke_width,
                curve: props.curve,
                dot_radius: show_dots.then_some(defaults.dot_radius),
                active_dot_radius: defaults.active_dot_radius,
                stroke_dasharray: series.stroke_dasharray.clone(),
                connect_nulls: props.connect_nulls,
                y_axis_id: "y".to_string(),
                fill,
                values,
            }));
        }

        let extent = value_extent(marks.iter().flat_map(|m| match m {
            Mark::Line(l) => l.values.iter().flatten().copied().collect::<Vec<_>>(),
            _ => Vec::new(),
        }));
        let domain = axis_domain(&props.y_axis, extent, true);

        let axes = vec![
            category_axis("x", AxisPosition::Bottom, &props.x_axis, &categories, ctx.theme),
            numeric_axis("y", AxisPosition::Left, &props.y_axis, domain, &ValueFormat::Grouped, ctx.theme),
        ];

        let legend = legend_spec(&props.legend, legend_payload(&props.series, palette), ctx.theme);
        let tooltip = tooltip_spec(&props.tooltip, false, ctx.theme);
        let label = aria_label(&props.frame, ChartFamily::Line, visible.iter().map(|(_, s)| s.display_name()));

        ChartPlan {
            layout: Layout::Vertical,
            categories: categories.iter().map(ToString::to_string).collect(),
            category_key: Some(key),
            axes,
            grid: grid_spec(props.show_grid, Layout::Vertical, ctx.theme),
            defs,
            marks,
            reference_lines: reference_lines(&props.reference_lines, false),
            reference_areas: reference_areas(&props.reference_areas, false),
            ..base_plan(ChartFamily::Line, &props.frame, defaults, ctx.theme, tooltip, legend, label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientRegistry;
    use crate::shell::ChartInstance;
    use vizkit_core::{ChartDefaults, Theme, Value, tokens::palettes};

    fn props() -> LineChartProps {
        LineChartProps::new(
            vec![
                DataPoint::new().with("day", "Mon").with("users", 120).with("sessions", 300),
                DataPoint::new().with("day", "Tue").with("users", Value::Null).with("sessions", 280),
                DataPoint::new().with("day", "Wed").with("users", 150).with("sessions", 310),
            ],
            vec![
                SeriesConfig::new("users").name("Users"),
                SeriesConfig::new("sessions").color("#ff0000"),
            ],
        )
        .with_x("day")
    }

    impl LineChartProps {
        fn with_x(mut self, key: &str) -> Self {
            self.x_axis = AxisConfig::key(key);
            self
        }
    }

    fn compose(props: &LineChartProps) -> ChartPlan {
        let defaults = ChartDefaults::default();
        let mut gradients = GradientRegistry::with_namespace("test");
        let mut ctx = RenderContext {
            theme: Theme::light(),
            defaults: &defaults,
            gradients: &mut gradients,
        };
        LineChart.compose(props, &mut ctx)
    }

    #[test]
    fn test_line_marks_follow_series() {
        let plan = compose(&props());
        let lines: Vec<_> = plan.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Users");
        assert_eq!(lines[0].color, palettes::PRIMARY[0]);
        assert_eq!(lines[1].color, "#ff0000");
        assert_eq!(lines[0].values, vec![Some(120.0), None, Some(150.0)]);
        assert_eq!(plan.categories, vec!["Mon", "Tue", "Wed"]);
        assert!(plan.defs.is_empty());
    }

    #[test]
    fn test_y_domain_covers_all_series() {
        let plan = compose(&props());
        assert_eq!(plan.axis("y").and_then(|a| a.domain), Some((0.0, 400.0)));
    }

    #[test]
    fn test_hidden_series_keep_legend_and_colors() {
        let mut p = props();
        p.hidden_series = vec!["users".to_string()];
        let plan = compose(&p);
        let lines: Vec<_> = plan.lines().collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].data_key, "sessions");
        assert_eq!(plan.legend.payload.len(), 2);
    }

    #[test]
    fn test_gradient_fill_references_def() {
        let mut p = props();
        p.gradient = true;
        let plan = compose(&p);
        for line in plan.lines() {
            let Fill::Gradient { id } = &line.fill else {
                panic!("expected gradient fill");
            };
            assert!(plan.gradient(id).is_some());
        }
    }

    #[test]
    fn test_render_empty_goes_to_placeholder() {
        let mut chart = ChartInstance::mount(LineChart);
        let output = chart.render(&LineChartProps::default());
        assert!(!output.state.is_ready());
    }

    #[test]
    fn test_click_dispatch() {
        use std::sync::{Arc, Mutex};
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let mut p = props();
        p.on_data_point_click = Some(PointCallback::new(move |row: &DataPoint, i| {
            *sink.lock().unwrap() = Some((row.label("day"), i));
        }));
        assert!(p.click(2));
        assert!(!p.click(3));
        assert_eq!(*seen.lock().unwrap(), Some((Some("Wed".to_string()), 2)));
    }
}

//! Scatter and bubble composer.

use serde::Deserialize;

use vizkit_core::{
    AxisConfig, BoundKeyword, Domain, DomainBound, FrameConfig, LegendConfig, PointCallback,
    PointShape, ReferenceAreaConfig, ReferenceLineConfig, ScatterDataPoint, ScatterInput,
    ScatterSeries, TooltipConfig, ValueFormat,
};

use crate::axis::{axis_domain, numeric_axis, resolve_domain, value_extent};
use crate::cartesian::{
    aria_label, base_plan, grid_spec, legend_spec, reference_areas, reference_lines, tooltip_spec,
};
use crate::chartkit::{LinearScale, Scale};
use crate::color::resolve_color;
use crate::plan::{
    AxisPosition, ChartFamily, ChartPlan, Layout, LegendItem, Mark, ScatterMark, ScatterPointMark,
    ZAxisSpec,
};
use crate::shell::{Composer, RenderContext};

/// Name of the implicit series wrapping a flat point list
pub const IMPLICIT_SERIES_NAME: &str = "Data";

/// Normalize authored input to the multi-series shape
pub fn normalize(input: &ScatterInput) -> Vec<ScatterSeries> {
    match input {
        ScatterInput::Grouped(series) => series.clone(),
        ScatterInput::Flat(points) => vec![ScatterSeries {
            name: IMPLICIT_SERIES_NAME.to_string(),
            data: points.clone(),
            color: None,
        }],
    }
}

/// Size encoding for bubble charts
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZAxisConfig {
    pub domain: Option<Domain>,
    /// Output symbol-area range; engine default when unset
    pub range: Option<(f64, f64)>,
    pub name: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScatterChartProps {
    pub data: ScatterInput,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub z_axis: ZAxisConfig,
    pub shape: PointShape,
    pub legend: LegendConfig,
    pub tooltip: TooltipConfig,
    pub show_grid: bool,
    pub reference_lines: Vec<ReferenceLineConfig>,
    pub reference_areas: Vec<ReferenceAreaConfig>,
    /// Series names the caller has toggled off
    pub hidden_series: Vec<String>,
    #[serde(flatten)]
    pub frame: FrameConfig,
    #[serde(skip)]
    pub on_point_click: Option<PointCallback<ScatterDataPoint>>,
}

impl Default for ScatterChartProps {
    fn default() -> Self {
        Self {
            data: ScatterInput::default(),
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            z_axis: ZAxisConfig::default(),
            shape: PointShape::default(),
            legend: LegendConfig::default(),
            tooltip: TooltipConfig::default(),
            show_grid: true,
            reference_lines: Vec::new(),
            reference_areas: Vec::new(),
            hidden_series: Vec::new(),
            frame: FrameConfig::default(),
            on_point_click: None,
        }
    }
}

impl ScatterChartProps {
    pub fn new(data: ScatterInput) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Invoke the click callback for point `point` of series `series`
    ///
    /// `series` counts visible series only, matching the order of the plan's
    /// scatter marks.
    pub fn click(&self, series: usize, point: usize) -> bool {
        let normalized = normalize(&self.data);
        match normalized
            .iter()
            .filter(|s| !self.hidden_series.contains(&s.name))
            .nth(series)
        {
            Some(s) => vizkit_core::dispatch_click(self.on_point_click.as_ref(), &s.data, point),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScatterChart;

impl Composer for ScatterChart {
    type Props = ScatterChartProps;

    fn family(&self) -> ChartFamily {
        ChartFamily::Scatter
    }

    fn frame<'a>(&self, props: &'a ScatterChartProps) -> &'a FrameConfig {
        &props.frame
    }

    fn is_empty(&self, props: &ScatterChartProps) -> bool {
        props.data.is_empty()
    }

    fn compose(&self, props: &ScatterChartProps, ctx: &mut RenderContext<'_>) -> ChartPlan {
        let defaults = ctx.defaults;
        let palette = props.frame.colors.as_deref();
        let all = normalize(&props.data);

        let colored: Vec<(String, &ScatterSeries)> = all
            .iter()
            .enumerate()
            .map(|(i, s)| (resolve_color(s.color.as_deref(), i, palette), s))
            .collect();
        let visible: Vec<&(String, &ScatterSeries)> = colored
            .iter()
            .filter(|(_, s)| !props.hidden_series.contains(&s.name))
            .collect();
        let points = || visible.iter().flat_map(|(_, s)| s.data.iter());

        // Any z value switches on the size encoding
        let z_axis = points().any(|p| p.z.is_some()).then(|| {
            let max_z = value_extent(points().filter_map(|p| p.z)).map(|(_, hi)| hi);
            let default_domain = Domain(DomainBound::Value(0.0), DomainBound::Keyword(BoundKeyword::DataMax));
            let domain = resolve_domain(
                Some(&props.z_axis.domain.unwrap_or(default_domain)),
                max_z.map(|hi| (0.0_f64.min(hi), hi)),
                true,
            );
            let (a, b) = props.z_axis.range.unwrap_or(defaults.bubble_range);
            ZAxisSpec {
                domain,
                range: (a.min(b), a.max(b)),
                name: props.z_axis.name.clone(),
                unit: props.z_axis.unit.clone(),
            }
        });
        let size_scale = z_axis.as_ref().map(|z| {
            LinearScale::new()
                .domain(z.domain.0, z.domain.1)
                .range(z.range.0, z.range.1)
                .clamp(true)
        });

        let marks: Vec<Mark> = visible
            .iter()
            .map(|(color, series)| {
                let points = series
                    .data
                    .iter()
                    .map(|p| ScatterPointMark {
                        x: p.x,
                        y: p.y,
                        z: p.z,
                        size: match (&size_scale, p.z) {
                            (Some(scale), Some(z)) => scale.scale(z),
                            (Some(scale), None) => scale.range_bounds().0,
                            (None, _) => defaults.scatter_point_size,
                        },
                        name: p.name.clone(),
                    })
                    .collect();
                Mark::Scatter(ScatterMark {
                    name: series.name.clone(),
                    color: color.clone(),
                    shape: props.shape,
                    points,
                })
            })
            .collect();

        let x_domain = axis_domain(&props.x_axis, value_extent(points().map(|p| p.x)), true);
        let y_domain = axis_domain(&props.y_axis, value_extent(points().map(|p| p.y)), true);
        let axes = vec![
            numeric_axis("x", AxisPosition::Bottom, &props.x_axis, x_domain, &ValueFormat::Grouped, ctx.theme),
            numeric_axis("y", AxisPosition::Left, &props.y_axis, y_domain, &ValueFormat::Grouped, ctx.theme),
        ];

        let payload = colored
            .iter()
            .map(|(color, s)| LegendItem {
                value: s.name.clone(),
                color: color.clone(),
                data_key: s.name.clone(),
            })
            .collect();
        let legend = legend_spec(&props.legend, payload, ctx.theme);
        let tooltip = tooltip_spec(&props.tooltip, false, ctx.theme);
        let label = aria_label(&props.frame, ChartFamily::Scatter, visible.iter().map(|(_, s)| s.name.as_str()));

        ChartPlan {
            axes,
            grid: grid_spec(props.show_grid, Layout::Vertical, ctx.theme),
            marks,
            reference_lines: reference_lines(&props.reference_lines, false),
            reference_areas: reference_areas(&props.reference_areas, false),
            z_axis,
            ..base_plan(ChartFamily::Scatter, &props.frame, defaults, ctx.theme, tooltip, legend, label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientRegistry;
    use vizkit_core::{ChartDefaults, Theme, tokens::palettes};

    fn compose(props: &ScatterChartProps) -> ChartPlan {
        let defaults = ChartDefaults::default();
        let mut gradients = GradientRegistry::with_namespace("test");
        let mut ctx = RenderContext {
            theme: Theme::light(),
            defaults: &defaults,
            gradients: &mut gradients,
        };
        ScatterChart.compose(props, &mut ctx)
    }

    fn points() -> Vec<ScatterDataPoint> {
        vec![ScatterDataPoint::new(1.0, 2.0), ScatterDataPoint::new(3.0, 5.0)]
    }

    #[test]
    fn test_flat_and_wrapped_compose_identically() {
        let flat = compose(&ScatterChartProps::new(ScatterInput::Flat(points())));
        let wrapped = compose(&ScatterChartProps::new(ScatterInput::Grouped(vec![ScatterSeries {
            name: IMPLICIT_SERIES_NAME.to_string(),
            data: points(),
            color: None,
        }])));
        assert_eq!(flat.marks, wrapped.marks);
        assert_eq!(flat.axes, wrapped.axes);
        let series = flat.scatter_series().next().unwrap();
        assert_eq!(series.name, "Data");
        assert_eq!(series.color, palettes::PRIMARY[0]);
    }

    #[test]
    fn test_flat_json_normalizes() {
        let input: ScatterInput = serde_json::from_str(r#"[{"x":1,"y":2}]"#).unwrap();
        assert_eq!(normalize(&input)[0].name, IMPLICIT_SERIES_NAME);
        let input: ScatterInput =
            serde_json::from_str(r#"[{"name":"A","data":[{"x":1,"y":2}]}]"#).unwrap();
        assert_eq!(normalize(&input)[0].name, "A");
    }

    #[test]
    fn test_bubble_size_is_monotonic() {
        let data = vec![
            ScatterDataPoint::new(1.0, 1.0).with_z(10.0),
            ScatterDataPoint::new(2.0, 2.0).with_z(20.0),
            ScatterDataPoint::new(3.0, 3.0).with_z(40.0),
        ];
        let plan = compose(&ScatterChartProps::new(ScatterInput::Flat(data)));
        let z = plan.z_axis.clone().unwrap();
        assert_eq!(z.domain, (0.0, 40.0));
        assert_eq!(z.range, (50.0, 400.0));
        let sizes: Vec<f64> = plan.scatter_series().next().unwrap().points.iter().map(|p| p.size).collect();
        assert!(sizes.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(sizes[2], 400.0);
    }

    #[test]
    fn test_reversed_range_still_monotonic() {
        let mut props = ScatterChartProps::new(ScatterInput::Flat(vec![
            ScatterDataPoint::new(1.0, 1.0).with_z(1.0),
            ScatterDataPoint::new(2.0, 2.0).with_z(2.0),
        ]));
        props.z_axis.range = Some((300.0, 20.0));
        let plan = compose(&props);
        let sizes: Vec<f64> = plan.scatter_series().next().unwrap().points.iter().map(|p| p.size).collect();
        assert!(sizes[0] < sizes[1]);
    }

    #[test]
    fn test_click_skips_hidden_series() {
        use std::sync::{Arc, Mutex};

        let clicked = Arc::new(Mutex::new(None));
        let sink = clicked.clone();
        let mut props = ScatterChartProps::new(ScatterInput::Grouped(vec![
            ScatterSeries { name: "A".to_string(), data: vec![ScatterDataPoint::new(1.0, 1.0)], color: None },
            ScatterSeries { name: "B".to_string(), data: vec![ScatterDataPoint::new(9.0, 9.0)], color: None },
        ]));
        props.on_point_click = Some(PointCallback::new(move |p: &ScatterDataPoint, i| {
            *sink.lock().unwrap() = Some((p.x, i));
        }));
        props.hidden_series = vec!["A".to_string()];

        // The first scatter mark in the plan is "B"
        let plan = compose(&props);
        assert_eq!(plan.scatter_series().next().unwrap().name, "B");
        assert!(props.click(0, 0));
        assert_eq!(*clicked.lock().unwrap(), Some((9.0, 0)));
        assert!(!props.click(1, 0));
    }

    #[test]
    fn test_no_z_means_no_z_axis() {
        let plan = compose(&ScatterChartProps::new(ScatterInput::Flat(points())));
        assert!(plan.z_axis.is_none());
        assert!(plan.scatter_series().next().unwrap().points.iter().all(|p| p.size == 64.0));
    }
}

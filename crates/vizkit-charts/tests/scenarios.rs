//! End-to-end chart scenarios through the public API.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use vizkit_charts::legend::{legend_entries, toggle};
use vizkit_charts::tooltip::category_tooltip;
use vizkit_charts::{
    AreaChart, AreaChartProps, BarChart, BarChartProps, ChartDescription, ChartFamily,
    ChartInstance, ChartProps, DisplayState, Fill, MountedChart, StackMode,
};
use vizkit_core::{DataPoint, FrameConfig, PointCallback, ScatterDataPoint, SeriesConfig, Theme};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn monthly() -> Vec<DataPoint> {
    vec![
        DataPoint::new().with("name", "Jan").with("a", 10.0).with("b", 20.0),
        DataPoint::new().with("name", "Feb").with("a", 15.0).with("b", 5.0),
    ]
}

fn stacked_series() -> Vec<SeriesConfig> {
    vec![SeriesConfig::new("a").stack("s"), SeriesConfig::new("b").stack("s")]
}

#[test]
fn test_stacked_bar_totals_and_tooltip() {
    init_tracing();
    let props = BarChartProps::new(monthly(), stacked_series()).variant(StackMode::Stacked);
    let mut chart = ChartInstance::mount(BarChart);
    let output = chart.render(&props);
    let plan = output.plan().expect("ready plan");

    assert_eq!(plan.totals("s"), Some(&[30.0, 20.0][..]));
    assert_eq!(plan.categories, vec!["Jan", "Feb"]);

    let bars: Vec<_> = plan.bars().collect();
    assert_eq!(bars.len(), 2);
    let jan_b = bars[1].segments[0].unwrap();
    assert_eq!((jan_b.base, jan_b.top), (10.0, 30.0));
    // Only the top of the stack is rounded
    assert_eq!(bars[0].radius, [0.0; 4]);
    assert!(bars[1].radius[0] > 0.0);

    let jan = category_tooltip(plan, 0).expect("tooltip");
    assert_eq!(jan.label, "Jan");
    assert_eq!(jan.rows.len(), 2);
    let total = jan.total.expect("total row");
    assert_eq!(total.name, "Total");
    assert_eq!(total.value, 30.0);

    let feb = category_tooltip(plan, 1).expect("tooltip");
    assert_eq!(feb.total.map(|t| t.value), Some(20.0));
}

#[test]
fn test_loading_wins_over_empty() {
    let props = BarChartProps {
        frame: FrameConfig {
            loading: true,
            ..Default::default()
        },
        ..BarChartProps::new(Vec::new(), stacked_series())
    };
    let output = ChartInstance::mount(BarChart).render(&props);
    assert!(matches!(output.state, DisplayState::Loading));
}

#[test]
fn test_error_wins_over_data() {
    let props = BarChartProps {
        frame: FrameConfig {
            error: Some("Upstream timeout".to_string()),
            ..Default::default()
        },
        ..BarChartProps::new(monthly(), stacked_series())
    };
    let output = ChartInstance::mount(BarChart).render(&props);
    match output.state {
        DisplayState::Error(ref message) => assert_eq!(message, "Upstream timeout"),
        other => panic!("expected error state, got {:?}", other),
    }
    assert!(output.plan().is_none());
}

#[test]
fn test_empty_uses_custom_message() {
    let mut props = BarChartProps::new(Vec::new(), stacked_series());
    props.frame.empty_message = Some("Nothing yet".to_string());
    let output = ChartInstance::mount(BarChart).render(&props);
    match output.state {
        DisplayState::Empty(message) => assert_eq!(message, "Nothing yet"),
        other => panic!("expected empty state, got {:?}", other),
    }
}

fn area_gradient_ids(plan: &vizkit_charts::ChartPlan) -> Vec<String> {
    plan.areas()
        .filter_map(|a| match &a.fill {
            Fill::Gradient { id } => Some(id.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_gradient_ids_survive_rerender_but_not_remount() {
    let props = AreaChartProps::new(monthly(), vec![SeriesConfig::new("a"), SeriesConfig::new("b")]);

    let mut first = ChartInstance::mount(AreaChart);
    let before = area_gradient_ids(first.render(&props).plan().expect("plan"));
    let after = area_gradient_ids(first.render(&props).plan().expect("plan"));
    assert_eq!(before.len(), 2);
    assert_eq!(before, after);
    assert_ne!(before[0], before[1]);

    let mut second = ChartInstance::mount(AreaChart);
    let remounted = area_gradient_ids(second.render(&props).plan().expect("plan"));
    assert!(remounted.iter().all(|id| !before.contains(id)));
}

#[test]
fn test_two_instances_never_share_ids() {
    let props = AreaChartProps::new(monthly(), vec![SeriesConfig::new("a")]);
    let mut left = ChartInstance::mount(AreaChart);
    let mut right = ChartInstance::mount(AreaChart);
    assert_ne!(left.namespace(), right.namespace());
    let l = area_gradient_ids(left.render(&props).plan().expect("plan"));
    let r = area_gradient_ids(right.render(&props).plan().expect("plan"));
    assert_ne!(l, r);
}

#[test]
fn test_hidden_series_stays_in_legend() {
    let hidden = toggle(&HashSet::new(), "b");
    let mut props = BarChartProps::new(monthly(), stacked_series()).variant(StackMode::Stacked);
    props.hidden_series = hidden.iter().cloned().collect();

    let output = ChartInstance::mount(BarChart).render(&props);
    let plan = output.plan().expect("plan");
    assert_eq!(plan.bars().count(), 1);
    assert_eq!(plan.totals("s"), Some(&[10.0, 15.0][..]));

    let entries = legend_entries(&plan.legend.payload, &hidden);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.data_key == "b" && e.hidden));

    let shown = toggle(&hidden, "b");
    assert!(shown.is_empty());
}

#[test]
fn test_json_description_renders() {
    init_tracing();
    let json = r#"{
        "type": "bar",
        "title": "Revenue",
        "variant": "stacked",
        "palette": "categorical",
        "data": [
            {"name": "Jan", "a": 10, "b": 20},
            {"name": "Feb", "a": 15, "b": 5}
        ],
        "series": [
            {"dataKey": "a", "stackId": "s"},
            {"dataKey": "b", "stackId": "s"}
        ]
    }"#;
    let description = ChartDescription::from_json(json).expect("valid description");
    let mut chart = description.mount();
    assert_eq!(chart.family(), ChartFamily::Bar);

    let output = chart.render();
    assert_eq!(output.frame.title.as_deref(), Some("Revenue"));
    let plan = output.plan().expect("plan");
    assert_eq!(plan.totals("s"), Some(&[30.0, 20.0][..]));
    assert_eq!(
        plan.legend.payload[0].color,
        vizkit_core::tokens::palettes::CATEGORICAL[0]
    );
    assert!(plan.to_json().expect("serializable").contains("\"family\""));
}

#[test]
fn test_json_description_rejects_duplicate_series() {
    let json = r#"{
        "type": "line",
        "data": [{"name": "Jan", "a": 1}],
        "series": [{"dataKey": "a"}, {"dataKey": "a"}]
    }"#;
    let err = ChartDescription::from_json(json).unwrap_err();
    assert_eq!(err.kind(), "Series");
}

fn recorder<T: Send + Sync + 'static, R: Send + 'static>(
    read: impl Fn(&T) -> R + Send + Sync + 'static,
) -> (PointCallback<T>, Arc<Mutex<Vec<(R, usize)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let callback = PointCallback::new(move |item: &T, index| sink.lock().unwrap().push((read(item), index)));
    (callback, seen)
}

#[test]
fn test_scatter_click_with_hidden_leading_series() {
    init_tracing();
    let json = r#"{
        "type": "scatter",
        "data": [
            {"name": "A", "data": [{"x": 1, "y": 1}]},
            {"name": "B", "data": [{"x": 9, "y": 9}, {"x": 7, "y": 3}]}
        ]
    }"#;
    let mut props = ChartDescription::from_json(json).expect("valid description").chart;
    props.set_hidden_series(["A".to_string()]);
    let (callback, seen) = recorder(|p: &ScatterDataPoint| p.x);
    let ChartProps::Scatter(scatter) = &mut props else {
        panic!("scatter props expected");
    };
    scatter.on_point_click = Some(callback);

    let mut chart = MountedChart::new(props.clone(), Theme::default());
    let output = chart.render();
    let plan = output.plan().expect("plan");

    // Mark 0 in the plan is the first visible series; clicking its second point
    let mark = plan.scatter_series().next().expect("visible series");
    assert_eq!(mark.name, "B");
    assert_eq!(mark.points[1].x, 7.0);

    let ChartProps::Scatter(scatter) = &props else { unreachable!() };
    assert!(scatter.click(0, 1));
    assert!(props.click(0));
    assert_eq!(*seen.lock().unwrap(), vec![(7.0, 1), (9.0, 0)]);
}

#[test]
fn test_composed_click_with_hidden_series_addresses_rows() {
    let json = r#"{
        "type": "composed",
        "data": [
            {"name": "Jan", "revenue": 4000, "margin": 0.32},
            {"name": "Feb", "revenue": 3000, "margin": 0.41}
        ],
        "series": [
            {"dataKey": "revenue", "type": "bar"},
            {"dataKey": "margin", "type": "line", "yAxisId": "right"}
        ]
    }"#;
    let mut props = ChartDescription::from_json(json).expect("valid description").chart;
    props.set_hidden_series(["revenue".to_string()]);
    let (callback, seen) = recorder(|row: &DataPoint| row.label("name"));
    let ChartProps::Composed(composed) = &mut props else {
        panic!("composed props expected");
    };
    composed.on_data_point_click = Some(callback);

    let mut chart = MountedChart::new(props.clone(), Theme::default());
    let output = chart.render();
    let plan = output.plan().expect("plan");
    assert_eq!(plan.marks.len(), 1);

    // Category 1 of the plan is the row handed to the callback
    let feb = category_tooltip(plan, 1).expect("tooltip");
    assert_eq!(feb.label, "Feb");
    assert!(props.click(1));
    assert!(!props.click(2));
    assert_eq!(*seen.lock().unwrap(), vec![(Some("Feb".to_string()), 1)]);
}

//! Shared configuration vocabulary consumed by every chart family.
//!
//! All types deserialize from camelCase JSON so a chart can be described as a
//! document, and all carry `Default` so they can be built in code field by field.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{Value, ValueFormat};

fn yes() -> bool {
    true
}

// ============================================================================
// SERIES
// ============================================================================

/// One value-producing field of each row plus its display metadata
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    pub data_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_dots: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl SeriesConfig {
    pub fn new(data_key: impl Into<String>) -> Self {
        Self {
            data_key: data_key.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn stack(mut self, stack_id: impl Into<String>) -> Self {
        self.stack_id = Some(stack_id.into());
        self
    }

    pub fn dashed(mut self, dasharray: impl Into<String>) -> Self {
        self.stroke_dasharray = Some(dasharray.into());
        self
    }

    /// Display name, falling back to the data key
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.data_key)
    }
}

/// Render type of one series inside a composed chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesType {
    #[default]
    Line,
    Bar,
    Area,
}

/// Y axis a composed series is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YAxisId {
    #[default]
    Left,
    Right,
}

impl YAxisId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Series of a composed chart: a base series plus render type and axis binding
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedSeriesConfig {
    #[serde(flatten)]
    pub series: SeriesConfig,
    #[serde(rename = "type", default)]
    pub kind: SeriesType,
    #[serde(default)]
    pub y_axis_id: YAxisId,
}

impl ComposedSeriesConfig {
    pub fn new(data_key: impl Into<String>, kind: SeriesType) -> Self {
        Self {
            series: SeriesConfig::new(data_key),
            kind,
            y_axis_id: YAxisId::Left,
        }
    }

    pub fn on_right(mut self) -> Self {
        self.y_axis_id = YAxisId::Right;
        self
    }
}

/// Interpolation between consecutive points of a line or area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurveType {
    #[default]
    Monotone,
    Linear,
    Step,
    Natural,
}

/// Marker symbol for scatter points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointShape {
    #[default]
    Circle,
    Square,
    Triangle,
    Diamond,
    Cross,
    Star,
}

// ============================================================================
// AXES
// ============================================================================

/// Keyword bound in an axis domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundKeyword {
    Auto,
    DataMin,
    DataMax,
}

/// One end of an axis domain
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainBound {
    Value(f64),
    Keyword(BoundKeyword),
}

impl Default for DomainBound {
    fn default() -> Self {
        Self::Keyword(BoundKeyword::Auto)
    }
}

/// `[min, max]` domain; either end may be left to auto-scaling
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Domain(pub DomainBound, pub DomainBound);

impl Domain {
    pub fn fixed(min: f64, max: f64) -> Self {
        Self(DomainBound::Value(min), DomainBound::Value(max))
    }

    pub fn auto() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_formatter: Option<ValueFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<usize>,
    #[serde(default)]
    pub hide: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl AxisConfig {
    pub fn key(data_key: impl Into<String>) -> Self {
        Self {
            data_key: Some(data_key.into()),
            ..Default::default()
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_formatter(mut self, formatter: ValueFormat) -> Self {
        self.tick_formatter = Some(formatter);
        self
    }
}

// ============================================================================
// LEGEND & TOOLTIP
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendAlign {
    Start,
    #[default]
    Center,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendConfig {
    #[serde(default = "yes")]
    pub show: bool,
    #[serde(default)]
    pub position: LegendPosition,
    #[serde(default)]
    pub align: LegendAlign,
    /// Entries toggle series visibility through a caller-owned hidden set
    #[serde(default)]
    pub interactive: bool,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            show: true,
            position: LegendPosition::Bottom,
            align: LegendAlign::Center,
            interactive: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipConfig {
    #[serde(default = "yes")]
    pub show: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_formatter: Option<ValueFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_formatter: Option<ValueFormat>,
    /// `None` keeps the family default (on for stacked bar/area)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_total: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_label: Option<String>,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show: true,
            value_formatter: None,
            label_formatter: None,
            show_total: None,
            total_label: None,
        }
    }
}

// ============================================================================
// REFERENCE OVERLAYS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReferenceAxis {
    X,
    #[default]
    Y,
}

/// Horizontal or vertical marker at a fixed axis value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLineConfig {
    #[serde(default)]
    pub axis: ReferenceAxis,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<YAxisId>,
}

/// Shaded rectangle between axis values; open sides span the plot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceAreaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<YAxisId>,
}

// ============================================================================
// FRAME (container shell inputs)
// ============================================================================

/// Title, sizing and display-state flags shared by every chart family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default)]
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    #[serde(default = "yes")]
    pub animate: bool,
    /// Palette override for series without an explicit color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            height: None,
            loading: false,
            error: None,
            empty_message: None,
            aria_label: None,
            animate: true,
            colors: None,
        }
    }
}

impl FrameConfig {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

// ============================================================================
// CALLBACKS
// ============================================================================

/// Click handler receiving the originating record and its index
pub struct PointCallback<T>(Arc<dyn Fn(&T, usize) + Send + Sync>);

impl<T> PointCallback<T> {
    pub fn new(f: impl Fn(&T, usize) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, item: &T, index: usize) {
        (self.0)(item, index)
    }
}

impl<T> Clone for PointCallback<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> std::fmt::Debug for PointCallback<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PointCallback(..)")
    }
}

/// Invoke `callback` with `items[index]`; out-of-range indices are ignored
pub fn dispatch_click<T>(callback: Option<&PointCallback<T>>, items: &[T], index: usize) -> bool {
    match (callback, items.get(index)) {
        (Some(cb), Some(item)) => {
            cb.call(item, index);
            true
        }
        _ => false,
    }
}

// ============================================================================
// ENGINE DEFAULTS
// ============================================================================

/// Engine-wide defaults applied when a chart leaves a setting unspecified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartDefaults {
    pub height: f64,
    pub animation_duration_ms: u32,
    pub animation_easing: String,
    pub bar_radius: f64,
    pub max_bar_size: f64,
    pub stroke_width: f64,
    pub dot_radius: f64,
    pub active_dot_radius: f64,
    /// Offset of the near (opaque) and far (transparent) gradient stops
    pub gradient_stops: (f64, f64),
    pub gradient_near_opacity: f64,
    pub gradient_far_opacity: f64,
    pub area_fill_opacity: f64,
    pub pie_outer_radius_pct: f64,
    pub donut_inner_radius_pct: f64,
    pub pie_active_offset: f64,
    pub pie_label_min_percent: f64,
    pub bubble_range: (f64, f64),
    pub scatter_point_size: f64,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        use crate::tokens::sizing;
        Self {
            height: sizing::HEIGHT_MD,
            animation_duration_ms: 800,
            animation_easing: "ease-out".to_string(),
            bar_radius: sizing::BAR_RADIUS,
            max_bar_size: sizing::BAR_MAX_SIZE,
            stroke_width: sizing::STROKE_WIDTH,
            dot_radius: sizing::DOT_RADIUS,
            active_dot_radius: sizing::ACTIVE_DOT_RADIUS,
            gradient_stops: (0.05, 0.95),
            gradient_near_opacity: 0.4,
            gradient_far_opacity: 0.05,
            area_fill_opacity: 0.3,
            pie_outer_radius_pct: 80.0,
            donut_inner_radius_pct: 60.0,
            pie_active_offset: 8.0,
            pie_label_min_percent: 5.0,
            bubble_range: (50.0, 400.0),
            scatter_point_size: 64.0,
        }
    }
}

impl ChartDefaults {
    /// Small multiples: shorter, no animation
    pub fn compact() -> Self {
        Self {
            height: crate::tokens::sizing::HEIGHT_SM,
            animation_duration_ms: 0,
            stroke_width: 1.5,
            dot_radius: 3.0,
            active_dot_radius: 4.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_series_config_from_json() {
        let s: SeriesConfig =
            serde_json::from_str(r#"{"dataKey":"revenue","name":"Revenue","stackId":"s"}"#)
                .unwrap();
        assert_eq!(s.data_key, "revenue");
        assert_eq!(s.display_name(), "Revenue");
        assert_eq!(s.stack_id.as_deref(), Some("s"));
        assert_eq!(SeriesConfig::new("cost").display_name(), "cost");
    }

    #[test]
    fn test_composed_series_from_json() {
        let s: ComposedSeriesConfig =
            serde_json::from_str(r#"{"dataKey":"rate","type":"area","yAxisId":"right"}"#).unwrap();
        assert_eq!(s.series.data_key, "rate");
        assert_eq!(s.kind, SeriesType::Area);
        assert_eq!(s.y_axis_id, YAxisId::Right);
    }

    #[test]
    fn test_domain_from_json() {
        let axis: AxisConfig = serde_json::from_str(r#"{"domain":[0,"auto"]}"#).unwrap();
        assert_eq!(
            axis.domain,
            Some(Domain(
                DomainBound::Value(0.0),
                DomainBound::Keyword(BoundKeyword::Auto)
            ))
        );
    }

    #[test]
    fn test_frame_defaults_animate() {
        let frame: FrameConfig = serde_json::from_str("{}").unwrap();
        assert!(frame.animate);
        assert!(!frame.loading);
        let legend: LegendConfig = serde_json::from_str("{}").unwrap();
        assert!(legend.show);
    }

    #[test]
    fn test_dispatch_click_bounds() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let cb = PointCallback::new(move |v: &i32, i| sink.lock().unwrap().push((*v, i)));

        assert!(dispatch_click(Some(&cb), &[10, 20], 1));
        assert!(!dispatch_click(Some(&cb), &[10, 20], 5));
        assert!(!dispatch_click::<i32>(None, &[10], 0));
        assert_eq!(*seen.lock().unwrap(), vec![(20, 1)]);
    }
}

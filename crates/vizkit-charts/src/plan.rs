//! Renderer-facing output of every composer.
//!
//! A [`ChartPlan`] is plain data: axes with resolved domains and tick labels,
//! gradient definitions, and one [`Mark`] per visible series (or segment).
//! Any 2D renderer can paint it; `vizkit-components` paints it as SVG.

use serde::Serialize;

use vizkit_core::{
    CurveType, LegendAlign, LegendPosition, PointShape, ReferenceAxis, Value, ValueFormat,
};

use crate::stacking::{Segment, StackMode, StackTotal};
use crate::ChartMargin;

/// Chart family that produced a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartFamily {
    Line,
    Bar,
    Area,
    Pie,
    Scatter,
    Composed,
    RadialBar,
    Gauge,
}

impl ChartFamily {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Line => "Line chart",
            Self::Bar => "Bar chart",
            Self::Area => "Area chart",
            Self::Pie => "Pie chart",
            Self::Scatter => "Scatter chart",
            Self::Composed => "Composed chart",
            Self::RadialBar => "Radial bar chart",
            Self::Gauge => "Gauge",
        }
    }

    /// Short prefix used in gradient namespaces
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Composed => "composed",
            Self::RadialBar => "radial",
            Self::Gauge => "gauge",
        }
    }
}

/// Orientation of a cartesian chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
    /// Categories along the x axis, values grow upward
    #[default]
    Vertical,
    /// Categories along the y axis, values grow rightward
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub active: bool,
    pub duration_ms: u32,
    pub easing: String,
}

// ============================================================================
// AXES & GRID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisKind {
    Category,
    Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tick {
    pub value: Value,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    /// `x`, `y`, `left` or `right`; marks refer to value axes by id
    pub id: String,
    pub position: AxisPosition,
    pub kind: AxisKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Resolved numeric domain; `None` for category axes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<(f64, f64)>,
    pub ticks: Vec<Tick>,
    pub hide: bool,
    pub angle: f64,
    pub stroke: String,
    pub tick_color: String,
    pub tick_font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub stroke: String,
    pub stroke_dasharray: String,
    pub horizontal: bool,
    pub vertical: bool,
}

// ============================================================================
// FILLS & GRADIENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

/// Linear gradient definition referenced by id from a fill
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientDef {
    pub id: String,
    /// Direction as `(x1, y1, x2, y2)` in bounding-box units
    pub vector: (f64, f64, f64, f64),
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Fill {
    Solid { color: String, opacity: f64 },
    Gradient { id: String },
    None,
}

impl Fill {
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid {
            color: color.into(),
            opacity: 1.0,
        }
    }

    /// SVG `fill` attribute value
    pub fn paint(&self) -> String {
        match self {
            Self::Solid { color, .. } => color.clone(),
            Self::Gradient { id } => format!("url(#{})", id),
            Self::None => "none".to_string(),
        }
    }

    /// SVG `fill-opacity` attribute value
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Solid { opacity, .. } => *opacity,
            Self::Gradient { .. } => 1.0,
            Self::None => 0.0,
        }
    }
}

// ============================================================================
// MARKS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMark {
    pub data_key: String,
    pub name: String,
    pub color: String,
    pub stroke_width: f64,
    pub curve: CurveType,
    /// Dot radius when dots are shown
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_radius: Option<f64>,
    pub active_dot_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    pub connect_nulls: bool,
    pub y_axis_id: String,
    /// Optional faded fill under the line
    pub fill: Fill,
    /// One entry per category; `None` is a gap
    pub values: Vec<Option<f64>>,
}

/// Corner radii `[top-left, top-right, bottom-right, bottom-left]`
pub type CornerRadius = [f64; 4];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarMark {
    pub data_key: String,
    pub name: String,
    pub fill: Fill,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    pub radius: CornerRadius,
    pub y_axis_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_size: Option<f64>,
    pub max_bar_size: f64,
    /// Per-category `[base, top]`; `None` is a gap
    pub segments: Vec<Option<Segment>>,
    /// Per-category fill override (single-series charts colored by category)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaMark {
    pub data_key: String,
    pub name: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: Fill,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    pub curve: CurveType,
    pub connect_nulls: bool,
    pub y_axis_id: String,
    pub active_dot_radius: f64,
    pub segments: Vec<Option<Segment>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorMark {
    pub index: usize,
    pub name: String,
    pub value: f64,
    pub percentage: f64,
    pub fill: String,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Radii as a percentage of the largest radius that fits
    pub inner_radius_pct: f64,
    pub outer_radius_pct: f64,
    pub active: bool,
    /// Extra outer radius in pixels while active
    pub active_offset: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPointMark {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Symbol area in renderer units
    pub size: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterMark {
    pub name: String,
    pub color: String,
    pub shape: PointShape,
    pub points: Vec<ScatterPointMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialBarMark {
    pub index: usize,
    pub name: String,
    pub value: f64,
    pub fill: String,
    pub inner_radius_pct: f64,
    pub outer_radius_pct: f64,
    pub start_angle: f64,
    /// Angle reached by the value; the track spans to the full end angle
    pub end_angle: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<RadialTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialTrack {
    pub fill: String,
    pub end_angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeMark {
    pub value: f64,
    pub min: f64,
    pub max: f64,
    /// Clamped to `[0, 100]`
    pub percentage: f64,
    pub color: String,
    pub track_color: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub value_angle: f64,
    pub inner_radius_pct: f64,
    pub outer_radius_pct: f64,
    pub formatted_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mark", rename_all = "camelCase")]
pub enum Mark {
    Line(LineMark),
    Bar(BarMark),
    Area(AreaMark),
    Sector(SectorMark),
    Scatter(ScatterMark),
    RadialBar(RadialBarMark),
    Gauge(GaugeMark),
}

impl Mark {
    /// Data key of a series-bound mark
    pub fn data_key(&self) -> Option<&str> {
        match self {
            Self::Line(m) => Some(&m.data_key),
            Self::Bar(m) => Some(&m.data_key),
            Self::Area(m) => Some(&m.data_key),
            _ => None,
        }
    }
}

// ============================================================================
// OVERLAYS
// ============================================================================

/// Paint order of an overlay relative to the data marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayLayer {
    Behind,
    Above,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceLineMark {
    pub axis: ReferenceAxis,
    pub value: Value,
    pub axis_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub color: String,
    pub stroke_dasharray: String,
    pub layer: OverlayLayer,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceAreaMark {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x1: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x2: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    pub axis_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub color: String,
    pub fill_opacity: f64,
    pub layer: OverlayLayer,
}

// ============================================================================
// TOOLTIP, LEGEND, CENTER LABEL
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipSpec {
    pub show: bool,
    pub show_total: bool,
    pub total_label: String,
    #[serde(skip)]
    pub value_format: ValueFormat,
    #[serde(skip)]
    pub label_format: Option<ValueFormat>,
    pub background: String,
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendItem {
    pub value: String,
    pub color: String,
    pub data_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendSpec {
    pub show: bool,
    pub position: LegendPosition,
    pub align: LegendAlign,
    pub interactive: bool,
    pub payload: Vec<LegendItem>,
    pub text_color: String,
}

/// Text shown in the middle of a donut or gauge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterLabel {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Z axis of a bubble chart: maps `z` values to symbol areas
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZAxisSpec {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

// ============================================================================
// PLAN
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPlan {
    pub family: ChartFamily,
    pub layout: Layout,
    pub height: f64,
    pub margin: ChartMargin,
    /// Category labels in data order (cartesian families)
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_mode: Option<StackMode>,
    /// Gap between bars of one category, in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_gap: Option<f64>,
    /// Gap between categories, as a fraction of the band
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_category_gap: Option<f64>,
    pub axes: Vec<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridSpec>,
    pub defs: Vec<GradientDef>,
    pub marks: Vec<Mark>,
    pub reference_lines: Vec<ReferenceLineMark>,
    pub reference_areas: Vec<ReferenceAreaMark>,
    pub stack_totals: Vec<StackTotal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_axis: Option<ZAxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<CenterLabel>,
    pub tooltip: TooltipSpec,
    pub legend: LegendSpec,
    pub animation: Animation,
    pub aria_label: String,
    pub text_color: String,
}

impl ChartPlan {
    pub fn axis(&self, id: &str) -> Option<&AxisSpec> {
        self.axes.iter().find(|a| a.id == id)
    }

    pub fn gradient(&self, id: &str) -> Option<&GradientDef> {
        self.defs.iter().find(|d| d.id == id)
    }

    pub fn bars(&self) -> impl Iterator<Item = &BarMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Bar(b) => Some(b),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Line(l) => Some(l),
            _ => None,
        })
    }

    pub fn areas(&self) -> impl Iterator<Item = &AreaMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Area(a) => Some(a),
            _ => None,
        })
    }

    pub fn sectors(&self) -> impl Iterator<Item = &SectorMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Sector(s) => Some(s),
            _ => None,
        })
    }

    pub fn scatter_series(&self) -> impl Iterator<Item = &ScatterMark> {
        self.marks.iter().filter_map(|m| match m {
            Mark::Scatter(s) => Some(s),
            _ => None,
        })
    }

    /// Stack totals for one stack group
    pub fn totals(&self, stack_id: &str) -> Option<&[f64]> {
        self.stack_totals
            .iter()
            .find(|t| t.stack_id == stack_id)
            .map(|t| t.totals.as_slice())
    }

    /// Plan as JSON, for renderers outside Rust and for snapshots
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

//! Plan to pixel geometry.
//!
//! Turns a [`ChartPlan`] plus a surface width into scales and SVG path data.
//! Everything is in inner-area coordinates except [`PolarGeometry`], which
//! works in outer coordinates around the chart center.

use vizkit_charts::chartkit::{
    BandScale, LinearScale, Scale, band_area_path, curve_generator, polar_to_cartesian,
    rounded_rect_path, sector_path, split_runs, symbol_path,
};
use vizkit_charts::core::Value;
use vizkit_charts::{
    AreaMark, AxisKind, AxisPosition, AxisSpec, BarMark, ChartDimensions, ChartPlan, GaugeMark,
    Layout, LineMark, RadialBarMark, ReferenceAreaMark, ReferenceLineMark, ScatterMark, SectorMark,
};

/// Surface width when the host does not give one
pub const DEFAULT_WIDTH: f64 = 800.0;

/// Gap between bars of one category when the plan sets none
pub const DEFAULT_BAR_GAP: f64 = 4.0;

/// Band padding for bar categories when the plan sets none
pub const DEFAULT_CATEGORY_GAP: f64 = 0.2;

/// Outer dimensions of a plan drawn `width` pixels wide
pub fn dimensions(plan: &ChartPlan, width: f64) -> ChartDimensions {
    ChartDimensions::new(width, plan.height).with_margin(plan.margin)
}

fn is_horizontal(position: AxisPosition) -> bool {
    matches!(position, AxisPosition::Bottom | AxisPosition::Top)
}

// ============================================================================
// SHAPES
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BarShape {
    pub data_key: String,
    pub index: usize,
    /// Bounding box `(x, y, width, height)`
    pub rect: (f64, f64, f64, f64),
    pub path: String,
    pub fill: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub data_key: String,
    pub path: String,
    pub color: String,
    pub stroke_width: f64,
    pub dasharray: Option<String>,
    /// Dot centres, when the mark shows dots
    pub dots: Vec<(f64, f64)>,
    pub dot_radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaShape {
    pub data_key: String,
    pub fill_path: String,
    pub stroke_path: String,
    pub fill: String,
    pub opacity: f64,
    pub stroke: String,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolShape {
    pub series: usize,
    pub index: usize,
    pub path: String,
    pub color: String,
}

/// Hover target for one category band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRect {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

// ============================================================================
// CARTESIAN GEOMETRY
// ============================================================================

#[derive(Debug, Clone)]
enum AxisScale {
    Category,
    Linear(LinearScale),
}

#[derive(Debug, Clone)]
struct PlacedAxis {
    id: String,
    horizontal: bool,
    scale: AxisScale,
}

/// Scales for one cartesian plan at one surface size
#[derive(Debug, Clone)]
pub struct CartesianGeometry {
    dims: ChartDimensions,
    layout: Layout,
    band: BandScale,
    categories: Vec<String>,
    axes: Vec<PlacedAxis>,
}

impl CartesianGeometry {
    pub fn new(plan: &ChartPlan, dims: ChartDimensions) -> Self {
        let (w, h) = (dims.inner_width(), dims.inner_height());
        let count = plan.categories.len();

        let band = {
            let band = match plan.layout {
                Layout::Vertical => BandScale::new(count).range(0.0, w),
                Layout::Horizontal => BandScale::new(count).range(0.0, h),
            };
            if plan.bars().next().is_some() {
                let gap = plan.bar_category_gap.unwrap_or(DEFAULT_CATEGORY_GAP);
                band.padding(gap, gap / 2.0)
            } else {
                band.padding(0.0, 0.0)
            }
        };

        let axes = plan
            .axes
            .iter()
            .map(|axis| {
                let horizontal = is_horizontal(axis.position);
                let scale = match (axis.kind, axis.domain) {
                    (AxisKind::Number, Some((lo, hi))) => {
                        let scale = LinearScale::new().domain(lo, hi);
                        AxisScale::Linear(if horizontal { scale.range(0.0, w) } else { scale.range(h, 0.0) })
                    }
                    _ => AxisScale::Category,
                };
                PlacedAxis {
                    id: axis.id.clone(),
                    horizontal,
                    scale,
                }
            })
            .collect();

        Self {
            dims,
            layout: plan.layout,
            band,
            categories: plan.categories.clone(),
            axes,
        }
    }

    pub fn dimensions(&self) -> ChartDimensions {
        self.dims
    }

    fn axis(&self, id: &str) -> Option<&PlacedAxis> {
        self.axes.iter().find(|a| a.id == id)
    }

    /// Value scale for `axis_id`, falling back to the first numeric axis
    pub fn value_scale(&self, axis_id: &str) -> Option<&LinearScale> {
        fn linear(a: &PlacedAxis) -> Option<&LinearScale> {
            match &a.scale {
                AxisScale::Linear(s) => Some(s),
                AxisScale::Category => None,
            }
        }
        self.axis(axis_id)
            .and_then(linear)
            .or_else(|| self.axes.iter().find_map(linear))
    }

    /// Centre of category `index` along the category dimension
    pub fn category_center(&self, index: usize) -> f64 {
        self.band.scale_center(index)
    }

    /// Pixel position of `value` at category `index` on value axis `axis_id`
    pub fn point(&self, axis_id: &str, index: usize, value: f64) -> Option<(f64, f64)> {
        let v = self.value_scale(axis_id)?.scale(value);
        let c = self.category_center(index);
        Some(match self.layout {
            Layout::Vertical => (c, v),
            Layout::Horizontal => (v, c),
        })
    }

    /// Category under an inner-area position
    pub fn category_at(&self, x: f64, y: f64) -> Option<usize> {
        match self.layout {
            Layout::Vertical => self.band.index_at(x),
            Layout::Horizontal => self.band.index_at(y),
        }
    }

    /// One hover rectangle per category, spanning the full step
    pub fn bands(&self) -> Vec<BandRect> {
        let step = self.band.step();
        let inset = (step - self.band.bandwidth()) / 2.0;
        (0..self.categories.len())
            .map(|index| {
                let start = self.band.scale(index) - inset;
                match self.layout {
                    Layout::Vertical => BandRect {
                        index,
                        x: start,
                        y: 0.0,
                        width: step,
                        height: self.dims.inner_height(),
                    },
                    Layout::Horizontal => BandRect {
                        index,
                        x: 0.0,
                        y: start,
                        width: self.dims.inner_width(),
                        height: step,
                    },
                }
            })
            .collect()
    }

    /// Tick offsets along `axis`, paired with their labels
    pub fn ticks(&self, axis: &AxisSpec) -> Vec<(f64, String)> {
        let Some(placed) = self.axis(&axis.id) else {
            return Vec::new();
        };
        match &placed.scale {
            AxisScale::Category => axis
                .ticks
                .iter()
                .enumerate()
                .map(|(i, t)| (self.category_center(i), t.label.clone()))
                .collect(),
            AxisScale::Linear(scale) => axis
                .ticks
                .iter()
                .filter_map(|t| t.value.as_f64().map(|v| (scale.scale(v), t.label.clone())))
                .collect(),
        }
    }

    /// Grid lines at the ticks of the first axis in each orientation
    pub fn grid_lines(&self, plan: &ChartPlan) -> Vec<LineSegment> {
        let Some(grid) = &plan.grid else {
            return Vec::new();
        };
        let (w, h) = (self.dims.inner_width(), self.dims.inner_height());
        let first = |horizontal: bool| plan.axes.iter().find(|a| is_horizontal(a.position) == horizontal);

        let mut lines = Vec::new();
        if grid.vertical {
            if let Some(axis) = first(true) {
                lines.extend(self.ticks(axis).into_iter().map(|(x, _)| LineSegment {
                    x1: x,
                    y1: 0.0,
                    x2: x,
                    y2: h,
                }));
            }
        }
        if grid.horizontal {
            if let Some(axis) = first(false) {
                lines.extend(self.ticks(axis).into_iter().map(|(y, _)| LineSegment {
                    x1: 0.0,
                    y1: y,
                    x2: w,
                    y2: y,
                }));
            }
        }
        lines
    }

    /// SVG transform placing `axis` on its edge of the inner area
    pub fn axis_transform(&self, axis: &AxisSpec) -> String {
        let (x, y) = match axis.position {
            AxisPosition::Bottom => (0.0, self.dims.inner_height()),
            AxisPosition::Right => (self.dims.inner_width(), 0.0),
            AxisPosition::Top | AxisPosition::Left => (0.0, 0.0),
        };
        format!("translate({}, {})", x, y)
    }

    /// Offset of an arbitrary axis value; categories are matched by label
    fn offset(&self, axis_id: &str, value: &Value) -> Option<f64> {
        let placed = self.axis(axis_id)?;
        match &placed.scale {
            AxisScale::Linear(scale) => value.as_f64().map(|v| scale.scale(v)),
            AxisScale::Category => {
                let label = value.to_string();
                self.categories
                    .iter()
                    .position(|c| *c == label)
                    .map(|i| self.category_center(i))
            }
        }
    }

    // ------------------------------------------------------------------------
    // Marks
    // ------------------------------------------------------------------------

    /// Bar rectangles; bars sharing a stack id share a slot in the band
    pub fn bar_shapes(&self, plan: &ChartPlan) -> Vec<BarShape> {
        let bars: Vec<&BarMark> = plan.bars().collect();

        let mut slot_keys: Vec<Option<&str>> = Vec::new();
        let slots: Vec<usize> = bars
            .iter()
            .map(|bar| {
                let key = bar.stack_id.as_deref();
                match key.and_then(|k| slot_keys.iter().position(|s| *s == Some(k))) {
                    Some(slot) => slot,
                    None => {
                        slot_keys.push(key);
                        slot_keys.len() - 1
                    }
                }
            })
            .collect();

        let n = slot_keys.len().max(1) as f64;
        let gap = plan.bar_gap.unwrap_or(DEFAULT_BAR_GAP);
        let bandwidth = self.band.bandwidth();
        let slot_width = ((bandwidth - gap * (n - 1.0)) / n).max(1.0);

        let mut shapes = Vec::new();
        for (bar, slot) in bars.iter().zip(slots) {
            let Some(scale) = self.value_scale(&bar.y_axis_id) else {
                continue;
            };
            let thickness = bar.bar_size.unwrap_or(slot_width).min(bar.max_bar_size).min(slot_width);
            let slot_start = slot as f64 * (slot_width + gap) + (slot_width - thickness) / 2.0;

            for (index, segment) in bar.segments.iter().enumerate() {
                let Some(segment) = segment else { continue };
                let start = self.band.scale(index) + slot_start;
                let (base, top) = (scale.scale(segment.base), scale.scale(segment.top));
                let rect = match self.layout {
                    Layout::Vertical => (start, top.min(base), thickness, (base - top).abs()),
                    Layout::Horizontal => (base.min(top), start, (top - base).abs(), thickness),
                };
                let path = rounded_rect_path(rect.0, rect.1, rect.2, rect.3, bar.radius);
                let fill = bar
                    .cell_colors
                    .as_ref()
                    .and_then(|cells| cells.get(index).cloned())
                    .unwrap_or_else(|| bar.fill.paint());
                shapes.push(BarShape {
                    data_key: bar.data_key.clone(),
                    index,
                    rect,
                    path,
                    fill,
                    opacity: bar.fill.opacity(),
                });
            }
        }
        shapes
    }

    pub fn line_shape(&self, mark: &LineMark) -> LineShape {
        let points: Vec<Option<(f64, f64)>> = mark
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| v.and_then(|v| self.point(&mark.y_axis_id, i, v)))
            .collect();
        let curve = curve_generator(mark.curve);
        let path = split_runs(&points, mark.connect_nulls)
            .iter()
            .map(|run| curve.generate(run))
            .collect::<Vec<_>>()
            .join(" ");

        LineShape {
            data_key: mark.data_key.clone(),
            path,
            color: mark.color.clone(),
            stroke_width: mark.stroke_width,
            dasharray: mark.stroke_dasharray.clone(),
            dots: match mark.dot_radius {
                Some(_) => points.iter().flatten().copied().collect(),
                None => Vec::new(),
            },
            dot_radius: mark.dot_radius.unwrap_or(0.0),
        }
    }

    pub fn area_shape(&self, mark: &AreaMark) -> AreaShape {
        let edges: Vec<Option<((f64, f64), (f64, f64))>> = mark
            .segments
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let s = (*s)?;
                Some((self.point(&mark.y_axis_id, i, s.top)?, self.point(&mark.y_axis_id, i, s.base)?))
            })
            .collect();

        // Runs of consecutive defined points; gaps split the shape
        let mut runs: Vec<Vec<((f64, f64), (f64, f64))>> = Vec::new();
        let mut current = Vec::new();
        for edge in &edges {
            match edge {
                Some(e) => current.push(*e),
                None if mark.connect_nulls => {}
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }

        let curve = curve_generator(mark.curve);
        let mut fill_path = Vec::new();
        let mut stroke_path = Vec::new();
        for run in &runs {
            let upper: Vec<(f64, f64)> = run.iter().map(|(top, _)| *top).collect();
            let lower: Vec<(f64, f64)> = run.iter().map(|(_, base)| *base).collect();
            fill_path.push(band_area_path(&upper, &lower, curve.as_ref()));
            stroke_path.push(curve.generate(&upper));
        }

        AreaShape {
            data_key: mark.data_key.clone(),
            fill_path: fill_path.join(" "),
            stroke_path: stroke_path.join(" "),
            fill: mark.fill.paint(),
            opacity: mark.fill.opacity(),
            stroke: mark.stroke.clone(),
            stroke_width: mark.stroke_width,
        }
    }

    /// Symbols for a scatter series on the `x` and `y` axes
    pub fn scatter_shapes(&self, series: usize, mark: &ScatterMark) -> Vec<SymbolShape> {
        let (Some(x), Some(y)) = (self.value_scale("x"), self.value_scale("y")) else {
            return Vec::new();
        };
        mark.points
            .iter()
            .enumerate()
            .map(|(index, p)| SymbolShape {
                series,
                index,
                path: symbol_path(mark.shape, x.scale(p.x), y.scale(p.y), p.size),
                color: mark.color.clone(),
            })
            .collect()
    }

    // ------------------------------------------------------------------------
    // Overlays
    // ------------------------------------------------------------------------

    /// Overlay segment; a value on a horizontal axis is drawn as a vertical line
    pub fn reference_line(&self, mark: &ReferenceLineMark) -> Option<LineSegment> {
        let offset = self.offset(&mark.axis_id, &mark.value)?;
        let (w, h) = (self.dims.inner_width(), self.dims.inner_height());
        Some(if self.axis(&mark.axis_id)?.horizontal {
            LineSegment {
                x1: offset,
                y1: 0.0,
                x2: offset,
                y2: h,
            }
        } else {
            LineSegment {
                x1: 0.0,
                y1: offset,
                x2: w,
                y2: offset,
            }
        })
    }

    /// Rectangle `(x, y, width, height)`; open sides span the plot
    pub fn reference_area(&self, mark: &ReferenceAreaMark) -> Option<(f64, f64, f64, f64)> {
        let (w, h) = (self.dims.inner_width(), self.dims.inner_height());
        let category_id = self
            .axes
            .iter()
            .find(|a| a.horizontal)
            .map(|a| a.id.clone())
            .unwrap_or_else(|| "x".to_string());

        let x1 = match &mark.x1 {
            Some(v) => self.offset(&category_id, v)?,
            None => 0.0,
        };
        let x2 = match &mark.x2 {
            Some(v) => self.offset(&category_id, v)?,
            None => w,
        };
        let scale = self.value_scale(&mark.axis_id)?;
        let y1 = mark.y1.map(|v| scale.scale(v)).unwrap_or(h);
        let y2 = mark.y2.map(|v| scale.scale(v)).unwrap_or(0.0);

        Some((x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs()))
    }
}

// ============================================================================
// POLAR GEOMETRY
// ============================================================================

/// Center and radius for pie, radial-bar and gauge plans
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarGeometry {
    pub cx: f64,
    pub cy: f64,
    pub max_radius: f64,
}

impl PolarGeometry {
    pub fn new(dims: ChartDimensions) -> Self {
        let (cx, cy) = dims.center();
        Self {
            cx,
            cy,
            max_radius: dims.max_radius(),
        }
    }

    /// Pixel radius for a percentage of the fitting radius
    pub fn radius(&self, pct: f64) -> f64 {
        self.max_radius * pct / 100.0
    }

    pub fn sector(&self, mark: &SectorMark) -> String {
        let offset = if mark.active { mark.active_offset } else { 0.0 };
        sector_path(
            self.cx,
            self.cy,
            self.radius(mark.inner_radius_pct),
            self.radius(mark.outer_radius_pct) + offset,
            mark.start_angle,
            mark.end_angle,
        )
    }

    /// Anchor for a sector label, just outside the outer edge
    pub fn sector_label_anchor(&self, mark: &SectorMark) -> (f64, f64) {
        let mid = (mark.start_angle + mark.end_angle) / 2.0;
        polar_to_cartesian(self.cx, self.cy, self.radius(mark.outer_radius_pct) + 14.0, mid)
    }

    /// `(track, bar)` paths for one radial bar
    pub fn radial_bar(&self, mark: &RadialBarMark) -> (Option<String>, String) {
        let inner = self.radius(mark.inner_radius_pct);
        let outer = self.radius(mark.outer_radius_pct);
        let track = mark
            .track
            .as_ref()
            .map(|t| sector_path(self.cx, self.cy, inner, outer, mark.start_angle, t.end_angle));
        let bar = sector_path(self.cx, self.cy, inner, outer, mark.start_angle, mark.end_angle);
        (track, bar)
    }

    /// `(track, value)` arcs for a gauge; the value arc is absent at zero
    pub fn gauge(&self, mark: &GaugeMark) -> (String, Option<String>) {
        let inner = self.radius(mark.inner_radius_pct);
        let outer = self.radius(mark.outer_radius_pct);
        let track = sector_path(self.cx, self.cy, inner, outer, mark.start_angle, mark.end_angle);
        let value = (mark.value_angle != mark.start_angle)
            .then(|| sector_path(self.cx, self.cy, inner, outer, mark.start_angle, mark.value_angle));
        (track, value)
    }
}

//! # chartkit
//!
//! Geometry primitives: scales, curve generators, and SVG path builders for
//! bars, areas, sectors and point symbols. Implements Strategy pattern for
//! scale and curve behaviors.

use std::f64::consts::PI;
use std::fmt::Write;

use vizkit_core::{CurveType, PointShape};

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;

    /// Inverse scale (range to domain)
    fn invert(&self, value: f64) -> f64;

    /// Generate tick values
    fn ticks(&self, count: usize) -> Vec<f64>;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Extend the domain outward to multiples of a nice step
    pub fn nice(mut self, count: usize) -> Self {
        let (min, max) = self.domain;
        if let Some(step) = nice_step(min, max, count) {
            self.domain = ((min / step).floor() * step, (max / step).ceil() * step);
        }
        self
    }

    /// Generate "nice" tick values (rounded to clean numbers)
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let Some(step) = nice_step(min, max, count) else {
            return vec![min];
        };

        let start = (min / step).ceil() as i64;
        let end = (max / step).floor() as i64;

        // Multiplying the integer index avoids accumulated float drift
        (start..=end)
            .map(|i| {
                let tick = i as f64 * step;
                if tick.abs() < step * 1e-9 { 0.0 } else { tick }
            })
            .collect()
    }
}

/// Step of 1, 2 or 5 times a power of ten that splits the range into about `count` parts
fn nice_step(min: f64, max: f64, count: usize) -> Option<f64> {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 || count == 0 {
        return None;
    }

    let rough_step = range / count as f64;
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    let nice = if residual <= 1.0 {
        magnitude
    } else if residual <= 2.0 {
        2.0 * magnitude
    } else if residual <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };
    Some(nice)
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let mut normalized = (value - d_min) / (d_max - d_min);

        if self.clamp {
            normalized = normalized.clamp(0.0, 1.0);
        }

        r_min + normalized * (r_max - r_min)
    }

    fn invert(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2.0;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        d_min + normalized * (d_max - d_min)
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        if count <= 1 {
            return vec![min];
        }

        let step = (max - min) / (count - 1) as f64;
        (0..count).map(|i| min + step * i as f64).collect()
    }
}

// ============================================================================
// BAND SCALE (categories)
// ============================================================================

/// Band scale for categorical data (bar columns, category x positions)
#[derive(Debug, Clone)]
pub struct BandScale {
    domain_count: usize,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(count: usize) -> Self {
        Self {
            domain_count: count,
            range: (0.0, 1.0),
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.clamp(0.0, 1.0);
        self
    }

    /// Distance between the starts of neighbouring bands
    pub fn step(&self) -> f64 {
        if self.domain_count == 0 {
            return 0.0;
        }
        let (r_min, r_max) = self.range;
        let n = self.domain_count as f64;
        (r_max - r_min) / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Width of each band
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start position of band `index`
    pub fn scale(&self, index: usize) -> f64 {
        if self.domain_count == 0 {
            return self.range.0;
        }
        let step = self.step();
        self.range.0 + self.padding_outer * step + index as f64 * step
    }

    pub fn scale_center(&self, index: usize) -> f64 {
        self.scale(index) + self.bandwidth() / 2.0
    }

    /// Band index under a range position, if any
    pub fn index_at(&self, position: f64) -> Option<usize> {
        let step = self.step();
        if step <= 0.0 {
            return None;
        }
        let offset = position - self.range.0 - self.padding_outer * step;
        if offset < 0.0 {
            return None;
        }
        let index = (offset / step).floor() as usize;
        (index < self.domain_count).then_some(index)
    }
}

impl Default for BandScale {
    fn default() -> Self {
        Self::new(10)
    }
}

// ============================================================================
// STRATEGY PATTERN: Curve Generators
// ============================================================================

/// Strategy trait for turning a run of points into path commands
pub trait PathGenerator: Send + Sync {
    fn generate(&self, points: &[(f64, f64)]) -> String;
}

/// Straight segments
#[derive(Debug, Clone, Default)]
pub struct LinePath;

impl PathGenerator for LinePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), rest)) = points.split_first() else {
            return String::new();
        };

        let mut builder = PathBuilder::new().move_to(x, y);
        for &(x, y) in rest {
            builder = builder.line_to(x, y);
        }
        builder.build()
    }
}

/// Step interpolation, changing value at the segment midpoint
#[derive(Debug, Clone, Default)]
pub struct StepPath;

impl PathGenerator for StepPath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        let Some((&(x, y), _)) = points.split_first() else {
            return String::new();
        };

        let mut builder = PathBuilder::new().move_to(x, y);
        for pair in points.windows(2) {
            let (x0, _) = pair[0];
            let (x1, y1) = pair[1];
            let mid_x = (x0 + x1) / 2.0;
            builder = builder.horizontal_to(mid_x).vertical_to(y1).horizontal_to(x1);
        }
        builder.build()
    }
}

/// Monotone cubic interpolation in x (no overshoot between points)
#[derive(Debug, Clone, Default)]
pub struct MonotonePath;

impl PathGenerator for MonotonePath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        if points.len() < 3 {
            return LinePath.generate(points);
        }

        let n = points.len();
        let secants: Vec<f64> = points
            .windows(2)
            .map(|p| {
                let dx = p[1].0 - p[0].0;
                if dx == 0.0 { 0.0 } else { (p[1].1 - p[0].1) / dx }
            })
            .collect();

        let mut tangents = vec![0.0; n];
        tangents[0] = secants[0];
        tangents[n - 1] = secants[n - 2];
        for i in 1..n - 1 {
            let (m0, m1) = (secants[i - 1], secants[i]);
            if m0 * m1 <= 0.0 {
                continue;
            }
            let h0 = points[i].0 - points[i - 1].0;
            let h1 = points[i + 1].0 - points[i].0;
            tangents[i] = 3.0 * (h0 + h1) / ((2.0 * h1 + h0) / m0 + (h1 + 2.0 * h0) / m1);
        }

        let mut builder = PathBuilder::new().move_to(points[0].0, points[0].1);
        for i in 0..n - 1 {
            let (x0, y0) = points[i];
            let (x1, y1) = points[i + 1];
            let third = (x1 - x0) / 3.0;
            builder = builder.cubic_to(
                x0 + third,
                y0 + tangents[i] * third,
                x1 - third,
                y1 - tangents[i + 1] * third,
                x1,
                y1,
            );
        }
        builder.build()
    }
}

/// Natural cubic spline through every point
#[derive(Debug, Clone, Default)]
pub struct NaturalPath;

impl NaturalPath {
    /// Bezier control points for one coordinate (tridiagonal solve)
    fn control_points(v: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let n = v.len() - 1;
        let mut a = vec![0.0; n];
        let mut b = vec![0.0; n];
        let mut r = vec![0.0; n];

        b[0] = 2.0;
        r[0] = v[0] + 2.0 * v[1];
        for i in 1..n - 1 {
            a[i] = 1.0;
            b[i] = 4.0;
            r[i] = 4.0 * v[i] + 2.0 * v[i + 1];
        }
        a[n - 1] = 2.0;
        b[n - 1] = 7.0;
        r[n - 1] = 8.0 * v[n - 1] + v[n];

        for i in 1..n {
            let m = a[i] / b[i - 1];
            b[i] -= m;
            r[i] -= m * r[i - 1];
        }

        a[n - 1] = r[n - 1] / b[n - 1];
        for i in (0..n - 1).rev() {
            a[i] = (r[i] - a[i + 1]) / b[i];
        }
        b[n - 1] = (v[n] + a[n - 1]) / 2.0;
        for i in 0..n - 1 {
            b[i] = 2.0 * v[i + 1] - a[i + 1];
        }
        (a, b)
    }
}

impl PathGenerator for NaturalPath {
    fn generate(&self, points: &[(f64, f64)]) -> String {
        if points.len() < 3 {
            return LinePath.generate(points);
        }

        let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
        let (ax, bx) = Self::control_points(&xs);
        let (ay, by) = Self::control_points(&ys);

        let mut builder = PathBuilder::new().move_to(xs[0], ys[0]);
        for i in 0..points.len() - 1 {
            builder = builder.cubic_to(ax[i], ay[i], bx[i], by[i], xs[i + 1], ys[i + 1]);
        }
        builder.build()
    }
}

/// Pick the curve generator for a curve type
pub fn curve_generator(curve: CurveType) -> Box<dyn PathGenerator> {
    match curve {
        CurveType::Linear => Box::new(LinePath),
        CurveType::Step => Box::new(StepPath),
        CurveType::Monotone => Box::new(MonotonePath),
        CurveType::Natural => Box::new(NaturalPath),
    }
}

/// Split a gappy point sequence into drawable runs
///
/// With `connect_nulls` the gaps are skipped and one run is returned.
pub fn split_runs(points: &[Option<(f64, f64)>], connect_nulls: bool) -> Vec<Vec<(f64, f64)>> {
    if connect_nulls {
        let run: Vec<_> = points.iter().flatten().copied().collect();
        return if run.is_empty() { Vec::new() } else { vec![run] };
    }

    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point {
            Some(p) => current.push(*p),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

// ============================================================================
// PATH BUILDER (fluent API)
// ============================================================================

/// SVG path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: String,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: String::with_capacity(256),
        }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "M{:.2},{:.2}", x, y);
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        let _ = write!(self.commands, "L{:.2},{:.2}", x, y);
        self
    }

    pub fn horizontal_to(mut self, x: f64) -> Self {
        let _ = write!(self.commands, "H{:.2}", x);
        self
    }

    pub fn vertical_to(mut self, y: f64) -> Self {
        let _ = write!(self.commands, "V{:.2}", y);
        self
    }

    pub fn cubic_to(mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        let _ = write!(
            self.commands,
            "C{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            x1, y1, x2, y2, x, y
        );
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn arc_to(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        let _ = write!(
            self.commands,
            "A{:.2},{:.2},{:.2},{},{},{:.2},{:.2}",
            rx, ry, rotation, large_arc as u8, sweep as u8, x, y
        );
        self
    }

    /// Append raw commands from another generator (e.g. a curve continuation)
    pub fn append(mut self, commands: &str) -> Self {
        self.commands.push_str(commands);
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push('Z');
        self
    }

    pub fn build(self) -> String {
        self.commands
    }
}

// ============================================================================
// AREA / BAR PATHS
// ============================================================================

/// Closed area between a curve and a flat baseline
pub fn area_path(points: &[(f64, f64)], baseline_y: f64) -> String {
    let baseline: Vec<(f64, f64)> = points.iter().map(|&(x, _)| (x, baseline_y)).collect();
    band_area_path(points, &baseline, &LinePath)
}

/// Closed area between an upper curve and a per-point lower edge (stacked areas)
pub fn band_area_path(
    upper: &[(f64, f64)],
    lower: &[(f64, f64)],
    curve: &dyn PathGenerator,
) -> String {
    if upper.is_empty() {
        return String::new();
    }

    let top = curve.generate(upper);
    let reversed: Vec<(f64, f64)> = lower.iter().rev().copied().collect();
    let bottom = curve.generate(&reversed);

    // Continue along the lower edge, dropping its leading move-to
    let mut builder = PathBuilder::new().append(&top);
    if let Some(&(x, y)) = reversed.first() {
        builder = builder.line_to(x, y);
    }
    if let Some(idx) = bottom.get(1..).and_then(|b| b.find(|c: char| c.is_ascii_alphabetic())) {
        builder = builder.append(&bottom[idx + 1..]);
    }
    builder.close().build()
}

/// Rectangle with individual corner radii `[top-left, top-right, bottom-right, bottom-left]`
pub fn rounded_rect_path(x: f64, y: f64, width: f64, height: f64, radius: [f64; 4]) -> String {
    let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
    let (y, height) = if height < 0.0 { (y + height, -height) } else { (y, height) };
    let max_r = width.min(height) / 2.0;
    let [tl, tr, br, bl] = radius.map(|r| r.clamp(0.0, max_r));

    PathBuilder::new()
        .move_to(x + tl, y)
        .horizontal_to(x + width - tr)
        .arc_to(tr, tr, 0.0, false, true, x + width, y + tr)
        .vertical_to(y + height - br)
        .arc_to(br, br, 0.0, false, true, x + width - br, y + height)
        .horizontal_to(x + bl)
        .arc_to(bl, bl, 0.0, false, true, x, y + height - bl)
        .vertical_to(y + tl)
        .arc_to(tl, tl, 0.0, false, true, x + tl, y)
        .close()
        .build()
}

// ============================================================================
// POLAR GEOMETRY
// ============================================================================

/// Point at `angle_deg` (counter-clockwise from 3 o'clock) on a circle
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let rad = -angle_deg.to_radians();
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

/// Annular sector from `start_deg` to `end_deg`; `inner == 0` draws a pie wedge
pub fn sector_path(cx: f64, cy: f64, inner: f64, outer: f64, start_deg: f64, end_deg: f64) -> String {
    let delta = (end_deg - start_deg).clamp(-359.999, 359.999);
    let end_deg = start_deg + delta;
    let large_arc = delta.abs() > 180.0;
    let clockwise = delta < 0.0;

    let (ox0, oy0) = polar_to_cartesian(cx, cy, outer, start_deg);
    let (ox1, oy1) = polar_to_cartesian(cx, cy, outer, end_deg);

    let builder = PathBuilder::new()
        .move_to(ox0, oy0)
        .arc_to(outer, outer, 0.0, large_arc, clockwise, ox1, oy1);

    let builder = if inner > 0.0 {
        let (ix1, iy1) = polar_to_cartesian(cx, cy, inner, end_deg);
        let (ix0, iy0) = polar_to_cartesian(cx, cy, inner, start_deg);
        builder
            .line_to(ix1, iy1)
            .arc_to(inner, inner, 0.0, large_arc, !clockwise, ix0, iy0)
    } else {
        builder.line_to(cx, cy)
    };

    builder.close().build()
}

// ============================================================================
// POINT SYMBOLS
// ============================================================================

/// Symbol path centred on `(cx, cy)` covering roughly `size` square pixels
pub fn symbol_path(shape: PointShape, cx: f64, cy: f64, size: f64) -> String {
    let size = size.max(0.0);
    match shape {
        PointShape::Circle => {
            let r = (size / PI).sqrt();
            PathBuilder::new()
                .move_to(cx + r, cy)
                .arc_to(r, r, 0.0, false, true, cx - r, cy)
                .arc_to(r, r, 0.0, false, true, cx + r, cy)
                .close()
                .build()
        }
        PointShape::Square => {
            let h = size.sqrt() / 2.0;
            rounded_rect_path(cx - h, cy - h, 2.0 * h, 2.0 * h, [0.0; 4])
        }
        PointShape::Triangle => {
            // Equilateral: area = sqrt(3)/4 * side^2
            let side = (size * 4.0 / 3.0_f64.sqrt()).sqrt();
            let h = side * 3.0_f64.sqrt() / 2.0;
            PathBuilder::new()
                .move_to(cx, cy - 2.0 * h / 3.0)
                .line_to(cx + side / 2.0, cy + h / 3.0)
                .line_to(cx - side / 2.0, cy + h / 3.0)
                .close()
                .build()
        }
        PointShape::Diamond => {
            let a = (size / 2.0).sqrt();
            PathBuilder::new()
                .move_to(cx, cy - a)
                .line_to(cx + a, cy)
                .line_to(cx, cy + a)
                .line_to(cx - a, cy)
                .close()
                .build()
        }
        PointShape::Cross => {
            let r = (size / 5.0).sqrt() / 2.0;
            PathBuilder::new()
                .move_to(cx - 3.0 * r, cy - r)
                .horizontal_to(cx - r)
                .vertical_to(cy - 3.0 * r)
                .horizontal_to(cx + r)
                .vertical_to(cy - r)
                .horizontal_to(cx + 3.0 * r)
                .vertical_to(cy + r)
                .horizontal_to(cx + r)
                .vertical_to(cy + 3.0 * r)
                .horizontal_to(cx - r)
                .vertical_to(cy + r)
                .horizontal_to(cx - 3.0 * r)
                .close()
                .build()
        }
        PointShape::Star => {
            let outer = (size / 1.1227).sqrt();
            let inner = outer * 0.382;
            let mut builder = PathBuilder::new();
            for i in 0..10 {
                let r = if i % 2 == 0 { outer } else { inner };
                let (x, y) = polar_to_cartesian(cx, cy, r, 90.0 - i as f64 * 36.0);
                builder = if i == 0 { builder.move_to(x, y) } else { builder.line_to(x, y) };
            }
            builder.close().build()
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
        assert_eq!(scale.invert(250.0), 50.0);
    }

    #[test]
    fn test_nice_domain_and_ticks() {
        let scale = LinearScale::new().domain(0.0, 87.0).nice(5);
        assert_eq!(scale.domain_bounds(), (0.0, 100.0));
        assert_eq!(
            scale.nice_ticks(5),
            vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
        );

        let degenerate = LinearScale::new().domain(3.0, 3.0).nice(5);
        assert_eq!(degenerate.domain_bounds(), (3.0, 3.0));
        assert_eq!(degenerate.nice_ticks(5), vec![3.0]);
    }

    #[test]
    fn test_band_scale() {
        let scale = BandScale::new(5).range(0.0, 100.0).padding(0.2, 0.1);
        let bw = scale.bandwidth();
        assert!(bw > 0.0);
        assert!(bw < 20.0);
        assert_eq!(scale.index_at(scale.scale_center(3)), Some(3));
        assert_eq!(scale.index_at(-1.0), None);
    }

    #[test]
    fn test_path_builder() {
        let path = PathBuilder::new()
            .move_to(0.0, 0.0)
            .line_to(100.0, 100.0)
            .close()
            .build();

        assert!(path.contains("M0.00,0.00"));
        assert!(path.contains("L100.00,100.00"));
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn test_monotone_passes_through_points() {
        let pts = [(0.0, 0.0), (10.0, 10.0), (20.0, 5.0), (30.0, 5.0)];
        let path = MonotonePath.generate(&pts);
        assert!(path.starts_with("M0.00,0.00"));
        assert!(path.contains(",10.00,10.00C"));
        assert!(path.ends_with("30.00,5.00"));
        assert_eq!(path.matches('C').count(), 3);
    }

    #[test]
    fn test_natural_spline_segment_count() {
        let pts = [(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, 10.0)];
        let path = NaturalPath.generate(&pts);
        assert_eq!(path.matches('C').count(), 3);
        assert!(path.ends_with("30.00,10.00"));
    }

    #[test]
    fn test_split_runs() {
        let pts = [Some((0.0, 1.0)), None, Some((2.0, 3.0)), Some((3.0, 4.0)), None];
        assert_eq!(split_runs(&pts, false).len(), 2);
        assert_eq!(split_runs(&pts, true), vec![vec![(0.0, 1.0), (2.0, 3.0), (3.0, 4.0)]]);
        assert!(split_runs(&[None, None], false).is_empty());
    }

    #[test]
    fn test_area_path_closes_on_baseline() {
        let path = area_path(&[(0.0, 10.0), (10.0, 20.0)], 50.0);
        assert!(path.starts_with("M0.00,10.00"));
        assert!(path.contains("L10.00,50.00"));
        assert!(path.contains("L0.00,50.00"));
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn test_rounded_rect_clamps_radius() {
        let path = rounded_rect_path(0.0, 0.0, 10.0, 100.0, [20.0, 20.0, 0.0, 0.0]);
        // radius clamps to half the width
        assert!(path.starts_with("M5.00,0.00"));
        assert!(path.contains("A5.00,5.00"));
        assert!(path.contains("A0.00,0.00"));
    }

    #[test]
    fn test_polar_geometry() {
        let (x, y) = polar_to_cartesian(100.0, 100.0, 50.0, 90.0);
        assert!((x - 100.0).abs() < 1e-9);
        assert!((y - 50.0).abs() < 1e-9);

        let wedge = sector_path(0.0, 0.0, 0.0, 10.0, 90.0, -90.0);
        assert!(wedge.contains("L0.00,0.00"));
        let ring = sector_path(0.0, 0.0, 5.0, 10.0, 90.0, 0.0);
        assert_eq!(ring.matches('A').count(), 2);
    }

    #[test]
    fn test_symbol_paths_are_closed() {
        for shape in [
            PointShape::Circle,
            PointShape::Square,
            PointShape::Triangle,
            PointShape::Diamond,
            PointShape::Cross,
            PointShape::Star,
        ] {
            let path = symbol_path(shape, 10.0, 10.0, 64.0);
            assert!(path.starts_with('M'), "{:?}", shape);
            assert!(path.ends_with('Z'), "{:?}", shape);
        }
    }
}

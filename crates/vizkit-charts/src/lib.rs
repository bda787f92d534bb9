//! # vizkit-charts
//!
//! Declarative chart composition. Each composer turns a data set plus series,
//! axis, legend and tooltip configuration into a [`ChartPlan`]: a renderer-ready
//! list of axes, gradient definitions and marks. No drawing happens here.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Chart families (`Composer` implementations)
//! - Scale computation and curve interpolation (`chartkit`)
//! - Value formatting (re-exported from `vizkit-core`)
//!
//! ## Modules
//!
//! - `chartkit` - Scales, curve generators, path builders
//! - `color` - Series color resolution
//! - `stacking` - Grouped / stacked / stacked-percent layout
//! - `gradient` - Per-instance gradient ids and definitions
//! - `axis` - Domain resolution and axis specs
//! - `tooltip`, `legend` - Hover aggregation and legend entries
//! - `shell` - Loading / error / empty gating and chart instances
//! - `line`, `bar`, `area`, `pie`, `scatter`, `composed`, `radial` - Composers
//! - `description` - JSON chart descriptions

pub mod area;
pub mod axis;
pub mod bar;
pub mod cartesian;
pub mod chartkit;
pub mod color;
pub mod composed;
pub mod description;
pub mod gradient;
pub mod legend;
pub mod line;
pub mod pie;
pub mod plan;
pub mod radial;
pub mod scatter;
pub mod shell;
pub mod stacking;
pub mod tooltip;

pub use area::*;
pub use bar::*;
pub use composed::*;
pub use description::*;
pub use gradient::*;
pub use line::*;
pub use pie::*;
pub use plan::*;
pub use radial::*;
pub use scatter::*;
pub use shell::*;
pub use stacking::*;

// Re-export the shared vocabulary for convenience
pub use vizkit_core as core;

use serde::{Deserialize, Serialize};

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Cartesian charts with a single value axis
    pub const fn standard() -> Self {
        Self::new(10.0, 30.0, 30.0, 50.0)
    }

    /// Composed charts with a right-hand value axis
    pub const fn dual_axis() -> Self {
        Self::new(10.0, 50.0, 30.0, 50.0)
    }

    /// Polar charts (pie, radial, gauge)
    pub const fn polar() -> Self {
        Self::uniform(10.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Largest radius that fits the inner area
    pub fn max_radius(&self) -> f64 {
        self.inner_width().min(self.inner_height()) / 2.0
    }

    /// Center of the inner area, in outer coordinates
    pub fn center(&self) -> (f64, f64) {
        (
            self.margin.left + self.inner_width() / 2.0,
            self.margin.top + self.inner_height() / 2.0,
        )
    }

    /// SVG transform for inner chart area
    pub fn inner_transform(&self) -> String {
        format!("translate({}, {})", self.margin.left, self.margin.top)
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(800.0, 300.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_inner_area() {
        let dims = ChartDimensions::new(400.0, 300.0).with_margin(ChartMargin::uniform(10.0));
        assert_eq!(dims.inner_width(), 380.0);
        assert_eq!(dims.inner_height(), 280.0);
        assert_eq!(dims.max_radius(), 140.0);
        assert_eq!(dims.center(), (200.0, 150.0));
        assert_eq!(dims.viewbox(), "0 0 400 300");
    }

    #[test]
    fn test_dimensions_never_negative() {
        let dims = ChartDimensions::new(20.0, 20.0).with_margin(ChartMargin::uniform(50.0));
        assert_eq!(dims.inner_width(), 0.0);
        assert_eq!(dims.inner_height(), 0.0);
    }
}

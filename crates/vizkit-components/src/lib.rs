//! # vizkit-components
//!
//! Leptos SVG components that paint [`vizkit_charts::ChartPlan`]s.
//! All resolution happens in `vizkit-charts`; this crate only maps plans to
//! pixels and wires hover, selection and legend toggling back to the props.
//!
//! ## Modules
//!
//! - `geometry` - Plan to pixel scales and path data
//! - `surface` - SVG surface for cartesian and polar plans
//! - `container` - Title block and loading / error / empty placeholders
//! - `legend`, `tooltip` - Legend lists and the hover panel
//! - `chart` - `Chart`, a mounted chart of any family

pub mod chart;
pub mod container;
pub mod geometry;
pub mod legend;
pub mod surface;
pub mod tooltip;

pub use chart::*;
pub use container::*;
pub use legend::*;
pub use surface::*;
pub use tooltip::*;

pub use geometry::DEFAULT_WIDTH;

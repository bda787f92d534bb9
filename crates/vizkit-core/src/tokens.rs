//! Design tokens: palettes, typography, sizing and per-element style constants.
//!
//! Everything here is immutable. Light/dark aware values are looked up through
//! [`Theme::resolve`], which callers pass down explicitly instead of reading
//! an ambient theme.

use serde::{Deserialize, Serialize};

// ============================================================================
// PALETTES
// ============================================================================

pub mod palettes {
    /// Brand-anchored default series palette
    pub const PRIMARY: &[&str] = &[
        "#6366f1", "#22c55e", "#f59e0b", "#ef4444", "#06b6d4", "#a855f7", "#ec4899", "#14b8a6",
    ];

    /// High-contrast palette for unordered categories
    pub const CATEGORICAL: &[&str] = &[
        "#2563eb", "#f97316", "#16a34a", "#dc2626", "#9333ea", "#0891b2", "#ca8a04", "#db2777",
        "#4b5563", "#65a30d",
    ];

    /// Single-hue steps, light to dark
    pub const SEQUENTIAL: &[&str] = &[
        "#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca",
        "#3730a3",
    ];

    /// Two hues around a neutral midpoint
    pub const DIVERGING: &[&str] = &[
        "#b91c1c", "#ef4444", "#f87171", "#fca5a5", "#e5e7eb", "#93c5fd", "#60a5fa", "#3b82f6",
        "#1d4ed8",
    ];

    /// Semantic colors: success, warning, error, info, neutral
    pub const STATUS: &[&str] = &["#22c55e", "#f59e0b", "#ef4444", "#3b82f6", "#6b7280"];
}

/// Named built-in palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaletteName {
    #[default]
    Primary,
    Categorical,
    Sequential,
    Diverging,
    Status,
}

impl PaletteName {
    pub fn colors(&self) -> &'static [&'static str] {
        match self {
            Self::Primary => palettes::PRIMARY,
            Self::Categorical => palettes::CATEGORICAL,
            Self::Sequential => palettes::SEQUENTIAL,
            Self::Diverging => palettes::DIVERGING,
            Self::Status => palettes::STATUS,
        }
    }

    /// Owned copy, for use as a `colors` override
    pub fn to_vec(&self) -> Vec<String> {
        self.colors().iter().map(|c| c.to_string()).collect()
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Primary,
            Self::Categorical,
            Self::Sequential,
            Self::Diverging,
            Self::Status,
        ]
    }
}

impl std::str::FromStr for PaletteName {
    type Err = crate::ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "categorical" => Ok(Self::Categorical),
            "sequential" => Ok(Self::Sequential),
            "diverging" => Ok(Self::Diverging),
            "status" => Ok(Self::Status),
            other => Err(crate::ChartError::UnknownPalette(other.to_string())),
        }
    }
}

/// Default series color for `index`, wrapping around the primary palette
pub fn color(index: usize) -> &'static str {
    palettes::PRIMARY[index % palettes::PRIMARY.len()]
}

/// Semantic status colors
pub mod status {
    pub const SUCCESS: &str = "#22c55e";
    pub const WARNING: &str = "#f59e0b";
    pub const ERROR: &str = "#ef4444";
    pub const INFO: &str = "#3b82f6";
    pub const NEUTRAL: &str = "#6b7280";
}

// ============================================================================
// TYPOGRAPHY & SIZING
// ============================================================================

pub mod typography {
    pub const FONT_FAMILY: &str = "Inter, system-ui, -apple-system, sans-serif";
    pub const FONT_FAMILY_MONO: &str = "JetBrains Mono, monospace";

    pub const SIZE_XS: f64 = 10.0;
    pub const SIZE_SM: f64 = 12.0;
    pub const SIZE_MD: f64 = 14.0;
    pub const SIZE_LG: f64 = 16.0;
    pub const SIZE_XL: f64 = 20.0;

    pub const WEIGHT_NORMAL: u16 = 400;
    pub const WEIGHT_MEDIUM: u16 = 500;
    pub const WEIGHT_SEMIBOLD: u16 = 600;
}

pub mod sizing {
    pub const HEIGHT_SM: f64 = 200.0;
    pub const HEIGHT_MD: f64 = 300.0;
    pub const HEIGHT_LG: f64 = 400.0;
    pub const HEIGHT_XL: f64 = 500.0;

    pub const BAR_RADIUS: f64 = 4.0;
    pub const BAR_MAX_SIZE: f64 = 60.0;
    pub const STROKE_WIDTH: f64 = 2.0;
    pub const DOT_RADIUS: f64 = 4.0;
    pub const ACTIVE_DOT_RADIUS: f64 = 6.0;
}

// ============================================================================
// ELEMENT STYLES
// ============================================================================

pub mod grid {
    pub const STROKE_DASHARRAY: &str = "3 3";
    pub const VERTICAL: bool = false;
    pub const HORIZONTAL: bool = true;
}

pub mod axis {
    pub const TICK_FONT_SIZE: f64 = 12.0;
    pub const TICK_LINE: bool = false;
    pub const AXIS_LINE: bool = true;
    pub const TICK_MARGIN: f64 = 8.0;
}

pub mod tooltip {
    pub const BORDER_RADIUS: f64 = 8.0;
    pub const PADDING: f64 = 12.0;
    pub const SHADOW: &str = "0 4px 12px rgba(0, 0, 0, 0.15)";
    pub const TOTAL_LABEL: &str = "Total";
}

pub mod legend {
    pub const ICON_SIZE: f64 = 10.0;
    pub const ITEM_GAP: f64 = 16.0;
    pub const HIDDEN_OPACITY: f64 = 0.4;
}

// ============================================================================
// THEME
// ============================================================================

/// Light or dark rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
        }
    }
}

/// Semantic style keys resolved per theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    Text,
    MutedText,
    Grid,
    Axis,
    Background,
    TooltipBackground,
    TooltipBorder,
    LegendText,
    TrackBackground,
}

/// Resolved theme, passed explicitly through each render context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
}

impl Theme {
    pub const fn light() -> Self {
        Self { mode: ThemeMode::Light }
    }

    pub const fn dark() -> Self {
        Self { mode: ThemeMode::Dark }
    }

    pub fn resolve(&self, token: StyleToken) -> &'static str {
        use StyleToken::*;
        match (self.mode, token) {
            (ThemeMode::Light, Text) => "#111827",
            (ThemeMode::Dark, Text) => "#f9fafb",
            (ThemeMode::Light, MutedText | LegendText) => "#6b7280",
            (ThemeMode::Dark, MutedText | LegendText) => "#9ca3af",
            (ThemeMode::Light, Grid) => "#e5e7eb",
            (ThemeMode::Dark, Grid) => "#374151",
            (ThemeMode::Light, Axis) => "#d1d5db",
            (ThemeMode::Dark, Axis) => "#4b5563",
            (ThemeMode::Light, Background) => "#ffffff",
            (ThemeMode::Dark, Background) => "#111827",
            (ThemeMode::Light, TooltipBackground) => "#ffffff",
            (ThemeMode::Dark, TooltipBackground) => "#1f2937",
            (ThemeMode::Light, TooltipBorder) => "#e5e7eb",
            (ThemeMode::Dark, TooltipBorder) => "#374151",
            (ThemeMode::Light, TrackBackground) => "#f3f4f6",
            (ThemeMode::Dark, TrackBackground) => "#1f2937",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_wraps_around() {
        let n = palettes::PRIMARY.len();
        assert_eq!(color(0), palettes::PRIMARY[0]);
        assert_eq!(color(n), palettes::PRIMARY[0]);
        assert_eq!(color(n + 3), palettes::PRIMARY[3]);
        assert_eq!(color(usize::MAX), palettes::PRIMARY[usize::MAX % n]);
    }

    #[test]
    fn test_palette_name_parsing() {
        assert_eq!("diverging".parse::<PaletteName>().unwrap(), PaletteName::Diverging);
        assert!("rainbow".parse::<PaletteName>().is_err());
        for name in PaletteName::all() {
            assert!(!name.colors().is_empty());
        }
    }

    #[test]
    fn test_theme_resolution_differs_by_mode() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_ne!(light.resolve(StyleToken::Text), dark.resolve(StyleToken::Text));
        assert_eq!(light.resolve(StyleToken::Grid), "#e5e7eb");
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
    }
}

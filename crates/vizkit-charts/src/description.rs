//! JSON chart descriptions.
//!
//! A description is a document like
//! `{"type":"bar","variant":"stacked","data":[...],"series":[...]}` plus an
//! optional built-in `palette` name and `theme` mode. Parsing validates the
//! series list; everything after that goes through the usual composers.

use serde::Deserialize;

use vizkit_core::{ChartError, FrameConfig, PaletteName, Result, Theme, ThemeMode, validate_series};

use crate::area::{AreaChart, AreaChartProps};
use crate::bar::{BarChart, BarChartProps};
use crate::composed::{ComposedChart, ComposedChartProps};
use crate::line::{LineChart, LineChartProps};
use crate::pie::{PieChart, PieChartProps};
use crate::plan::ChartFamily;
use crate::radial::{GaugeChart, GaugeChartProps, RadialBarChart, RadialBarChartProps};
use crate::scatter::{ScatterChart, ScatterChartProps};
use crate::shell::{ChartInstance, ChartOutput, Composer};

/// Props of any chart family, tagged by `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartProps {
    Line(LineChartProps),
    Bar(BarChartProps),
    Area(AreaChartProps),
    Pie(PieChartProps),
    Scatter(ScatterChartProps),
    Composed(ComposedChartProps),
    RadialBar(RadialBarChartProps),
    Gauge(GaugeChartProps),
}

impl ChartProps {
    pub fn family(&self) -> ChartFamily {
        match self {
            Self::Line(_) => ChartFamily::Line,
            Self::Bar(_) => ChartFamily::Bar,
            Self::Area(_) => ChartFamily::Area,
            Self::Pie(_) => ChartFamily::Pie,
            Self::Scatter(_) => ChartFamily::Scatter,
            Self::Composed(_) => ChartFamily::Composed,
            Self::RadialBar(_) => ChartFamily::RadialBar,
            Self::Gauge(_) => ChartFamily::Gauge,
        }
    }

    pub fn frame(&self) -> &FrameConfig {
        match self {
            Self::Line(p) => &p.frame,
            Self::Bar(p) => &p.frame,
            Self::Area(p) => &p.frame,
            Self::Pie(p) => &p.frame,
            Self::Scatter(p) => &p.frame,
            Self::Composed(p) => &p.frame,
            Self::RadialBar(p) => &p.frame,
            Self::Gauge(p) => &p.frame,
        }
    }

    pub fn frame_mut(&mut self) -> &mut FrameConfig {
        match self {
            Self::Line(p) => &mut p.frame,
            Self::Bar(p) => &mut p.frame,
            Self::Area(p) => &mut p.frame,
            Self::Pie(p) => &mut p.frame,
            Self::Scatter(p) => &mut p.frame,
            Self::Composed(p) => &mut p.frame,
            Self::RadialBar(p) => &mut p.frame,
            Self::Gauge(p) => &mut p.frame,
        }
    }

    /// Reject series lists with empty or duplicate data keys
    pub fn validate(&self) -> Result<()> {
        let result = match self {
            Self::Line(p) => validate_series(p.series.iter().map(|s| s.data_key.as_str())),
            Self::Bar(p) => validate_series(p.series.iter().map(|s| s.data_key.as_str())),
            Self::Area(p) => validate_series(p.series.iter().map(|s| s.data_key.as_str())),
            Self::Composed(p) => validate_series(p.series.iter().map(|s| s.series.data_key.as_str())),
            Self::Pie(_) | Self::Scatter(_) | Self::RadialBar(_) | Self::Gauge(_) => Ok(()),
        };
        if let Err(e) = &result {
            tracing::warn!(family = ?self.family(), error = %e, "Rejected series list");
        }
        result
    }

    /// Invoke the family's click callback for record `index`
    ///
    /// Scatter charts address points of their first visible series.
    pub fn click(&self, index: usize) -> bool {
        match self {
            Self::Line(p) => p.click(index),
            Self::Bar(p) => p.click(index),
            Self::Area(p) => p.click(index),
            Self::Pie(p) => p.click(index),
            Self::Scatter(p) => p.click(0, index),
            Self::Composed(p) => p.click(index),
            Self::RadialBar(p) => p.click(index),
            Self::Gauge(_) => false,
        }
    }

    /// Replace the hidden-series set; families without a legend toggle ignore it
    pub fn set_hidden_series<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        let hidden = match self {
            Self::Line(p) => &mut p.hidden_series,
            Self::Bar(p) => &mut p.hidden_series,
            Self::Area(p) => &mut p.hidden_series,
            Self::Scatter(p) => &mut p.hidden_series,
            Self::Composed(p) => &mut p.hidden_series,
            Self::Pie(_) | Self::RadialBar(_) | Self::Gauge(_) => return,
        };
        *hidden = keys.into_iter().collect();
        hidden.sort();
    }
}

/// A parsed chart document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDescription {
    #[serde(flatten)]
    pub chart: ChartProps,
    /// Built-in palette name, applied when `colors` is not given
    #[serde(default)]
    pub palette: Option<String>,
    #[serde(default)]
    pub theme: ThemeMode,
}

impl ChartDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut description: Self = serde_json::from_str(json)?;

        if let Some(name) = &description.palette {
            let palette: PaletteName = name.parse()?;
            let frame = description.chart.frame_mut();
            if frame.colors.is_none() {
                frame.colors = Some(palette.to_vec());
            }
        }

        description.chart.validate()?;
        tracing::debug!(family = ?description.chart.family(), "Parsed chart description");
        Ok(description)
    }

    /// Mount the described chart
    pub fn mount(self) -> MountedChart {
        MountedChart::new(self.chart, Theme { mode: self.theme })
    }
}

impl std::str::FromStr for ChartDescription {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

// ============================================================================
// MOUNTED CHART (any family)
// ============================================================================

#[derive(Debug)]
enum Mounted {
    Line(ChartInstance<LineChart>, LineChartProps),
    Bar(ChartInstance<BarChart>, BarChartProps),
    Area(ChartInstance<AreaChart>, AreaChartProps),
    Pie(ChartInstance<PieChart>, PieChartProps),
    Scatter(ChartInstance<ScatterChart>, ScatterChartProps),
    Composed(ChartInstance<ComposedChart>, ComposedChartProps),
    RadialBar(ChartInstance<RadialBarChart>, RadialBarChartProps),
    Gauge(ChartInstance<GaugeChart>, GaugeChartProps),
}

macro_rules! each_family {
    ($value:expr, $instance:ident, $props:ident => $body:expr) => {
        match $value {
            Mounted::Line($instance, $props) => $body,
            Mounted::Bar($instance, $props) => $body,
            Mounted::Area($instance, $props) => $body,
            Mounted::Pie($instance, $props) => $body,
            Mounted::Scatter($instance, $props) => $body,
            Mounted::Composed($instance, $props) => $body,
            Mounted::RadialBar($instance, $props) => $body,
            Mounted::Gauge($instance, $props) => $body,
        }
    };
}

impl Mounted {
    fn mount(props: ChartProps, theme: Theme) -> Self {
        match props {
            ChartProps::Line(p) => Self::Line(ChartInstance::mount(LineChart).with_theme(theme), p),
            ChartProps::Bar(p) => Self::Bar(ChartInstance::mount(BarChart).with_theme(theme), p),
            ChartProps::Area(p) => Self::Area(ChartInstance::mount(AreaChart).with_theme(theme), p),
            ChartProps::Pie(p) => Self::Pie(ChartInstance::mount(PieChart).with_theme(theme), p),
            ChartProps::Scatter(p) => Self::Scatter(ChartInstance::mount(ScatterChart).with_theme(theme), p),
            ChartProps::Composed(p) => Self::Composed(ChartInstance::mount(ComposedChart).with_theme(theme), p),
            ChartProps::RadialBar(p) => Self::RadialBar(ChartInstance::mount(RadialBarChart).with_theme(theme), p),
            ChartProps::Gauge(p) => Self::Gauge(ChartInstance::mount(GaugeChart).with_theme(theme), p),
        }
    }
}

/// A chart of any family, mounted once and re-rendered as its props change
#[derive(Debug)]
pub struct MountedChart {
    inner: Mounted,
    theme: Theme,
}

impl MountedChart {
    pub fn new(props: ChartProps, theme: Theme) -> Self {
        Self {
            inner: Mounted::mount(props, theme),
            theme,
        }
    }

    pub fn family(&self) -> ChartFamily {
        each_family!(&self.inner, instance, _props => instance.composer().family())
    }

    pub fn namespace(&self) -> &str {
        each_family!(&self.inner, instance, _props => instance.namespace())
    }

    pub fn render(&mut self) -> ChartOutput {
        each_family!(&mut self.inner, instance, props => instance.render(props))
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        each_family!(&mut self.inner, instance, _props => instance.set_theme(theme))
    }

    /// Replace the props; gradient ids survive unless the family changes
    pub fn update(&mut self, props: ChartProps) {
        let remount = match (&mut self.inner, props) {
            (Mounted::Line(_, p), ChartProps::Line(next)) => { *p = next; None }
            (Mounted::Bar(_, p), ChartProps::Bar(next)) => { *p = next; None }
            (Mounted::Area(_, p), ChartProps::Area(next)) => { *p = next; None }
            (Mounted::Pie(_, p), ChartProps::Pie(next)) => { *p = next; None }
            (Mounted::Scatter(_, p), ChartProps::Scatter(next)) => { *p = next; None }
            (Mounted::Composed(_, p), ChartProps::Composed(next)) => { *p = next; None }
            (Mounted::RadialBar(_, p), ChartProps::RadialBar(next)) => { *p = next; None }
            (Mounted::Gauge(_, p), ChartProps::Gauge(next)) => { *p = next; None }
            (_, other) => Some(other),
        };
        if let Some(props) = remount {
            tracing::debug!(from = ?self.family(), to = ?props.family(), "Chart family changed, remounting");
            self.inner = Mounted::mount(props, self.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizkit_core::tokens::palettes;

    const STACKED: &str = r#"{
        "type": "bar",
        "variant": "stacked",
        "title": "Signups",
        "xAxis": {"dataKey": "m"},
        "data": [{"m": "Jan", "a": 10, "b": 20}, {"m": "Feb", "a": 15, "b": 5}],
        "series": [{"dataKey": "a", "stackId": "s"}, {"dataKey": "b", "stackId": "s"}]
    }"#;

    #[test]
    fn test_parse_bar_description() {
        let description = ChartDescription::from_json(STACKED).unwrap();
        let ChartProps::Bar(props) = &description.chart else {
            panic!("expected bar props");
        };
        assert_eq!(props.series.len(), 2);
        assert_eq!(props.frame.title.as_deref(), Some("Signups"));
        assert!(props.frame.animate);
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let json = r#"{"type":"line","data":[],"series":[{"dataKey":"a"},{"dataKey":"a"}]}"#;
        assert!(matches!(
            ChartDescription::from_json(json),
            Err(ChartError::DuplicateDataKey(k)) if k == "a"
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = ChartDescription::from_json(r#"{"type":"donut"}"#).unwrap_err();
        assert_eq!(err.kind(), "Parse");
    }

    #[test]
    fn test_palette_name_applies() {
        let json = r#"{"type":"pie","palette":"status","data":[{"name":"ok","value":3}]}"#;
        let description = ChartDescription::from_json(json).unwrap();
        let colors = description.chart.frame().colors.clone().unwrap();
        assert_eq!(colors[0], palettes::STATUS[0]);

        let bad = r#"{"type":"pie","palette":"neon","data":[]}"#;
        assert!(matches!(ChartDescription::from_json(bad), Err(ChartError::UnknownPalette(_))));
    }

    #[test]
    fn test_update_keeps_namespace_until_family_changes() {
        let mut chart = ChartDescription::from_json(STACKED).unwrap().mount();
        let ns = chart.namespace().to_string();

        let next = ChartDescription::from_json(STACKED).unwrap();
        chart.update(next.chart);
        assert_eq!(chart.namespace(), ns);
        assert!(chart.render().state.is_ready());

        let gauge = ChartDescription::from_json(r#"{"type":"gauge","value":42}"#).unwrap();
        chart.update(gauge.chart);
        assert_eq!(chart.family(), ChartFamily::Gauge);
        assert_ne!(chart.namespace(), ns);
    }

    #[test]
    fn test_set_hidden_series() {
        let mut description = ChartDescription::from_json(STACKED).unwrap();
        description.chart.set_hidden_series(["b".to_string()]);
        let mut chart = description.mount();
        let output = chart.render();
        let plan = output.plan().unwrap();
        assert_eq!(plan.bars().count(), 1);
        assert_eq!(plan.legend.payload.len(), 2);
    }
}

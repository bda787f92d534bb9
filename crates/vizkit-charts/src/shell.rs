//! Container shell: display-state gating and mounted chart instances.
//!
//! Every family goes through the same gate. Loading wins over error, error
//! over empty, and only a ready chart is composed.

use serde::Serialize;

use vizkit_core::{ChartDefaults, FrameConfig, Theme};

use crate::cartesian::chart_height;
use crate::gradient::GradientRegistry;
use crate::plan::{ChartFamily, ChartPlan};

/// Placeholder text when a chart has no rows and no custom message
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data available";

// ============================================================================
// DISPLAY STATE
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "camelCase")]
pub enum DisplayState {
    Loading,
    Error(String),
    Empty(String),
    Ready(Box<ChartPlan>),
}

impl DisplayState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn plan(&self) -> Option<&ChartPlan> {
        match self {
            Self::Ready(plan) => Some(plan),
            _ => None,
        }
    }
}

/// Host chrome inputs: title block and reserved height
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOutput {
    pub frame: Frame,
    pub state: DisplayState,
}

impl ChartOutput {
    pub fn plan(&self) -> Option<&ChartPlan> {
        self.state.plan()
    }
}

/// Non-ready state for `frame`, or `None` when the chart should be composed
pub fn resolve_state(frame: &FrameConfig, is_empty: bool) -> Option<DisplayState> {
    if frame.loading {
        return Some(DisplayState::Loading);
    }
    if let Some(error) = &frame.error {
        return Some(DisplayState::Error(error.clone()));
    }
    if is_empty {
        let message = frame
            .empty_message
            .clone()
            .unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string());
        return Some(DisplayState::Empty(message));
    }
    None
}

// ============================================================================
// STRATEGY PATTERN: Composer Trait
// ============================================================================

/// Per-render inputs that are not part of the props
pub struct RenderContext<'a> {
    pub theme: Theme,
    pub defaults: &'a ChartDefaults,
    pub gradients: &'a mut GradientRegistry,
}

/// One chart family: props in, plan out
pub trait Composer {
    type Props;

    fn family(&self) -> ChartFamily;

    fn frame<'a>(&self, props: &'a Self::Props) -> &'a FrameConfig;

    /// True when there is nothing to plot
    fn is_empty(&self, props: &Self::Props) -> bool;

    /// Resolve props into a plan; only called for non-empty, ready charts
    fn compose(&self, props: &Self::Props, ctx: &mut RenderContext<'_>) -> ChartPlan;
}

// ============================================================================
// CHART INSTANCE
// ============================================================================

/// One mounted chart: owns its gradient table for its whole lifetime
#[derive(Debug)]
pub struct ChartInstance<C: Composer> {
    composer: C,
    gradients: GradientRegistry,
    defaults: ChartDefaults,
    theme: Theme,
}

impl<C: Composer> ChartInstance<C> {
    /// Mount a new instance with a fresh gradient namespace
    pub fn mount(composer: C) -> Self {
        let gradients = GradientRegistry::mount(composer.family().slug());
        Self {
            composer,
            gradients,
            defaults: ChartDefaults::default(),
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_defaults(mut self, defaults: ChartDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn namespace(&self) -> &str {
        self.gradients.namespace()
    }

    pub fn composer(&self) -> &C {
        &self.composer
    }

    /// Render the current props; gradient ids carry over from earlier renders
    pub fn render(&mut self, props: &C::Props) -> ChartOutput {
        let frame_config = self.composer.frame(props);
        let frame = Frame {
            title: frame_config.title.clone(),
            subtitle: frame_config.subtitle.clone(),
            height: chart_height(frame_config, &self.defaults),
        };

        let is_empty = self.composer.is_empty(props);
        if let Some(state) = resolve_state(frame_config, is_empty) {
            if matches!(state, DisplayState::Empty(_)) {
                tracing::debug!(family = ?self.composer.family(), "No rows to plot, showing empty state");
            }
            return ChartOutput { frame, state };
        }

        let mut ctx = RenderContext {
            theme: self.theme,
            defaults: &self.defaults,
            gradients: &mut self.gradients,
        };
        let plan = self.composer.compose(props, &mut ctx);
        ChartOutput {
            frame,
            state: DisplayState::Ready(Box::new(plan)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_beats_empty() {
        let frame = FrameConfig {
            loading: true,
            ..Default::default()
        };
        assert!(matches!(resolve_state(&frame, true), Some(DisplayState::Loading)));
    }

    #[test]
    fn test_error_beats_data() {
        let frame = FrameConfig {
            error: Some("Upstream timeout".to_string()),
            ..Default::default()
        };
        match resolve_state(&frame, false) {
            Some(DisplayState::Error(msg)) => assert_eq!(msg, "Upstream timeout"),
            other => panic!("expected error state, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_message() {
        match resolve_state(&FrameConfig::default(), true) {
            Some(DisplayState::Empty(msg)) => assert_eq!(msg, DEFAULT_EMPTY_MESSAGE),
            other => panic!("expected empty state, got {:?}", other),
        }
        let frame = FrameConfig {
            empty_message: Some("Nothing yet".to_string()),
            ..Default::default()
        };
        assert!(matches!(resolve_state(&frame, true), Some(DisplayState::Empty(m)) if m == "Nothing yet"));
        assert!(resolve_state(&FrameConfig::default(), false).is_none());
    }
}

//! Chart panel: title block plus loading, error and empty placeholders.

use leptos::prelude::*;

use vizkit_charts::{DisplayState, Frame};

/// Display state without the plan, cheap to compare between renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellStatus {
    Loading,
    Error(String),
    Empty(String),
    Ready,
}

impl From<&DisplayState> for ShellStatus {
    fn from(state: &DisplayState) -> Self {
        match state {
            DisplayState::Loading => Self::Loading,
            DisplayState::Error(message) => Self::Error(message.clone()),
            DisplayState::Empty(message) => Self::Empty(message.clone()),
            DisplayState::Ready(_) => Self::Ready,
        }
    }
}

/// Panel around a chart; `children` render only in the ready state
#[component]
pub fn ChartContainer(
    #[prop(into)] frame: Signal<Frame>,
    #[prop(into)] status: Signal<ShellStatus>,
    #[prop(optional)] class: Option<&'static str>,
    children: ChildrenFn,
) -> impl IntoView {
    let height = move || frame.with(|f| format!("height: {}px;", f.height));

    view! {
        <div class=format!("panel chart-container {}", class.unwrap_or_default())>
            {move || {
                frame.with(|f| {
                    f.title.clone().map(|title| {
                        let subtitle = f.subtitle.clone();
                        view! {
                            <div class="panel-header">
                                <span class="panel-title">{title}</span>
                                {subtitle.map(|s| view! { <span class="panel-subtitle">{s}</span> })}
                            </div>
                        }
                    })
                })
            }}

            <div class="panel-content" style=height>
                {move || match status.get() {
                    ShellStatus::Loading => view! {
                        <div class="chart-skeleton" aria-busy="true">
                            <div class="skeleton-block"></div>
                        </div>
                    }
                    .into_any(),
                    ShellStatus::Error(message) => view! {
                        <div class="chart-error" role="alert">
                            <span class="error-icon">"⚠"</span>
                            <span class="error-msg">{message}</span>
                        </div>
                    }
                    .into_any(),
                    ShellStatus::Empty(message) => view! {
                        <div class="chart-empty">
                            <span>{message}</span>
                        </div>
                    }
                    .into_any(),
                    ShellStatus::Ready => children().into_any(),
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_drops_plan() {
        assert_eq!(ShellStatus::from(&DisplayState::Loading), ShellStatus::Loading);
        assert_eq!(
            ShellStatus::from(&DisplayState::Empty("none".to_string())),
            ShellStatus::Empty("none".to_string())
        );
    }
}

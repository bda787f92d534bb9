//! Hover tooltip panel.

use leptos::prelude::*;

use vizkit_charts::tooltip::{TooltipContent, TooltipRow};

/// Tooltip panel; renders nothing while `content` is `None`
#[component]
pub fn ChartTooltip(
    #[prop(into)] content: Signal<Option<TooltipContent>>,
    #[prop(into)] background: Signal<String>,
    #[prop(into)] border: Signal<String>,
) -> impl IntoView {
    move || {
        content.get().map(|content| {
            let style = format!(
                "background: {}; border: 1px solid {};",
                background.get(),
                border.get()
            );
            view! {
                <div class="vizkit-tooltip" role="tooltip" style=style>
                    <div class="tt-label">{content.label}</div>
                    <ul class="tt-rows">
                        {content.rows.into_iter().map(row_view).collect_view()}
                    </ul>
                    {content.total.map(|total| view! {
                        <div class="tt-total">
                            <span class="tt-name">{total.name}</span>
                            <span class="tt-value">{total.formatted}</span>
                        </div>
                    })}
                </div>
            }
        })
    }
}

fn row_view(row: TooltipRow) -> impl IntoView {
    view! {
        <li class="tt-row">
            <span class="tt-swatch" style=format!("background: {}", row.color)></span>
            <span class="tt-name">{row.name}</span>
            <span class="tt-value">{row.formatted}</span>
            {row.percentage.map(|pct| view! {
                <span class="tt-pct">{format!("({:.1}%)", pct)}</span>
            })}
        </li>
    }
}

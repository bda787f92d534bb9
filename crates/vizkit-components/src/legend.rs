//! Series and pie legends.

use std::collections::HashSet;

use leptos::prelude::*;
use web_sys::MouseEvent;

use vizkit_charts::LegendSpec;
use vizkit_charts::core::LegendPosition;
use vizkit_charts::legend::{LegendEntry, PieLegendEntry, legend_entries};

fn position_class(position: LegendPosition) -> &'static str {
    match position {
        LegendPosition::Top => "legend-top",
        LegendPosition::Bottom => "legend-bottom",
        LegendPosition::Left => "legend-left",
        LegendPosition::Right => "legend-right",
    }
}

/// Series legend; interactive legends toggle series through `on_toggle`
#[component]
pub fn ChartLegend(
    #[prop(into)] spec: Signal<LegendSpec>,
    #[prop(into)] hidden: Signal<HashSet<String>>,
    #[prop(into)] on_toggle: Callback<String>,
) -> impl IntoView {
    let class = move || spec.with(|s| format!("vizkit-legend {}", position_class(s.position)));
    let style = move || spec.with(|s| format!("color: {}", s.text_color));

    view! {
        <ul class=class style=style>
            {move || {
                let interactive = spec.with(|s| s.interactive);
                let entries = hidden.with(|h| spec.with(|s| legend_entries(&s.payload, h)));
                entries
                    .into_iter()
                    .map(|entry| entry_view(entry, interactive, on_toggle))
                    .collect_view()
            }}
        </ul>
    }
}

fn entry_view(entry: LegendEntry, interactive: bool, on_toggle: Callback<String>) -> impl IntoView {
    let key = entry.data_key.clone();
    let label_style = if entry.strikethrough { "text-decoration: line-through;" } else { "" };
    let swatch = view! {
        <span
            class="legend-swatch"
            style=format!("background: {}; opacity: {};", entry.color, entry.swatch_opacity)
        ></span>
    };

    if interactive {
        view! {
            <li class="legend-item">
                <button
                    type="button"
                    class="legend-toggle"
                    aria-pressed=(!entry.hidden).to_string()
                    on:click=move |_: MouseEvent| on_toggle.run(key.clone())
                >
                    {swatch}
                    <span class="legend-label" style=label_style>{entry.value}</span>
                </button>
            </li>
        }
        .into_any()
    } else {
        view! {
            <li class="legend-item">
                {swatch}
                <span class="legend-label" style=label_style>{entry.value}</span>
            </li>
        }
        .into_any()
    }
}

/// Pie legend listing each segment's value and share
#[component]
pub fn PieLegend(#[prop(into)] entries: Signal<Vec<PieLegendEntry>>) -> impl IntoView {
    view! {
        <ul class="vizkit-legend pie-legend">
            {move || entries.get().into_iter().map(|entry| view! {
                <li class="legend-item">
                    <span class="legend-swatch" style=format!("background: {}", entry.color)></span>
                    <span class="legend-label">{entry.name}</span>
                    <span class="legend-value">{entry.formatted}</span>
                    <span class="legend-pct">{format!("{:.1}%", entry.percentage)}</span>
                </li>
            }).collect_view()}
        </ul>
    }
}

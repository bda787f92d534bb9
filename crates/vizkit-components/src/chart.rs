//! `Chart`: one mounted chart of any family, wired to legend and tooltip.

use std::collections::HashSet;

use leptos::prelude::*;

use vizkit_charts::core::Theme;
use vizkit_charts::legend::{pie_legend, toggle};
use vizkit_charts::tooltip::{TooltipContent, category_tooltip, pie_tooltip, scatter_tooltip};
use vizkit_charts::{ChartFamily, ChartOutput, ChartPlan, ChartProps as AnyChartProps, MountedChart};

use crate::container::{ChartContainer, ShellStatus};
use crate::legend::{ChartLegend, PieLegend};
use crate::surface::{ChartSurface, Hover};
use crate::tooltip::ChartTooltip;

/// Tooltip for whatever the pointer is over
fn hover_tooltip(props: &AnyChartProps, plan: &ChartPlan, hover: Hover) -> Option<TooltipContent> {
    if !plan.tooltip.show {
        return None;
    }
    match (hover, props) {
        (Hover::Category(index), _) => category_tooltip(plan, index),
        (Hover::Sector(index), AnyChartProps::Pie(pie)) => {
            let color = plan.sectors().find(|s| s.index == index)?.fill.clone();
            pie_tooltip(&pie.data, index, &color, &plan.tooltip)
        }
        (Hover::Point { series, index }, _) => {
            scatter_tooltip(plan.scatter_series().nth(series)?, index, &plan.tooltip)
        }
        (Hover::Sector(_), _) => None,
    }
}

/// Invoke the props' click callback for a selected target
fn dispatch_select(props: &AnyChartProps, target: Hover) -> bool {
    match (props, target) {
        (AnyChartProps::Scatter(scatter), Hover::Point { series, index }) => scatter.click(series, index),
        (props, target) => props.click(target.index()),
    }
}

/// A chart of any family, re-rendered as `props` change
///
/// Gradient ids stay stable across prop updates and change only when the
/// chart family changes.
#[component]
pub fn Chart(
    #[prop(into)] props: Signal<AnyChartProps>,
    #[prop(into, optional)] theme: Option<Signal<Theme>>,
    #[prop(default = crate::DEFAULT_WIDTH)] width: f64,
) -> impl IntoView {
    let initial_theme = theme.map(|t| t.get_untracked()).unwrap_or_default();
    let mut chart = MountedChart::new(props.get_untracked(), initial_theme);
    let output = RwSignal::new(chart.render());
    let mounted = StoredValue::new(chart);

    let hidden = RwSignal::new(HashSet::<String>::new());
    let hover = RwSignal::new(None::<Hover>);

    Effect::new(move |_| {
        let mut next = props.get();
        next.set_hidden_series(hidden.get());
        let theme = theme.map(|t| t.get());
        mounted.update_value(|chart| {
            if let Some(theme) = theme {
                chart.set_theme(theme);
            }
            chart.update(next);
            output.set(chart.render());
        });
    });

    let frame = Memo::new(move |_| output.with(|o: &ChartOutput| o.frame.clone()));
    let status = Memo::new(move |_| output.with(|o| ShellStatus::from(&o.state)));
    let plan = Signal::derive(move || output.with(|o| o.plan().cloned()));
    let family = Memo::new(move |_| props.with(|p| p.family()));

    let legend = Memo::new(move |_| output.with(|o| o.plan().map(|p| p.legend.clone())));
    let pie_entries = Memo::new(move |_| {
        output.with(|o| {
            o.plan()
                .map(|p| pie_legend(p, &p.tooltip.value_format))
                .unwrap_or_default()
        })
    });

    let tooltip = Signal::derive(move || {
        let target = hover.get()?;
        output.with(|o| {
            let plan = o.plan()?;
            props.with(|p| hover_tooltip(p, plan, target))
        })
    });
    let tooltip_colors = Memo::new(move |_| {
        output.with(|o| {
            o.plan()
                .map(|p| (p.tooltip.background.clone(), p.tooltip.border.clone()))
                .unwrap_or_default()
        })
    });

    let on_hover = Callback::new(move |target: Option<Hover>| hover.set(target));
    let on_select = Callback::new(move |target: Hover| {
        let handled = props.with_untracked(|p| dispatch_select(p, target));
        tracing::trace!(?target, handled, "Chart selection");
    });
    let on_toggle = Callback::new(move |key: String| {
        hidden.update(|h| *h = toggle(h, &key));
        tracing::debug!(data_key = %key, "Toggled series visibility");
    });

    let theme_class = move || {
        let mode = theme.map(|t| t.get()).unwrap_or_default().mode;
        mode.css_class()
    };

    view! {
        <div class=move || format!("vizkit-chart {}", theme_class())>
            <ChartContainer frame=frame status=status>
                <div class="chart-body">
                    <ChartSurface
                        plan=plan
                        width=width
                        on_hover=on_hover
                        on_select=on_select
                    />
                    <ChartTooltip
                        content=tooltip
                        background=Signal::derive(move || tooltip_colors.get().0)
                        border=Signal::derive(move || tooltip_colors.get().1)
                    />
                    {move || match (family.get(), legend.get()) {
                        (ChartFamily::Pie, Some(spec)) if spec.show => {
                            Some(view! { <PieLegend entries=pie_entries /> }.into_any())
                        }
                        (ChartFamily::Gauge, _) => None,
                        (_, Some(spec)) if spec.show => Some(
                            view! {
                                <ChartLegend
                                    spec=spec
                                    hidden=hidden
                                    on_toggle=on_toggle
                                />
                            }
                            .into_any(),
                        ),
                        _ => None,
                    }}
                </div>
            </ChartContainer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vizkit_charts::ChartDescription;

    fn pie() -> AnyChartProps {
        ChartDescription::from_json(
            r#"{"type":"pie","data":[{"name":"a","value":1},{"name":"b","value":3}]}"#,
        )
        .unwrap()
        .chart
    }

    #[test]
    fn test_pie_hover_tooltip_has_share() {
        let props = pie();
        let mut chart = MountedChart::new(props.clone(), Theme::default());
        let output = chart.render();
        let content = hover_tooltip(&props, output.plan().unwrap(), Hover::Sector(1)).unwrap();
        assert_eq!(content.label, "b");
        assert_eq!(content.rows[0].percentage, Some(75.0));
    }

    #[test]
    fn test_sector_hover_outside_pie_is_ignored() {
        let props = ChartDescription::from_json(r#"{"type":"radialBar","data":[{"name":"a","value":1}]}"#)
            .unwrap()
            .chart;
        let mut chart = MountedChart::new(props.clone(), Theme::default());
        let output = chart.render();
        assert!(hover_tooltip(&props, output.plan().unwrap(), Hover::Sector(0)).is_none());
    }

    #[test]
    fn test_select_without_callback_is_unhandled() {
        assert!(!dispatch_select(&pie(), Hover::Sector(0)));
    }
}

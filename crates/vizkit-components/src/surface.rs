//! SVG surface painting a resolved [`ChartPlan`].

use leptos::prelude::*;
use web_sys::MouseEvent;

use vizkit_charts::core::tokens::typography;
use vizkit_charts::{
    AxisPosition, AxisSpec, ChartFamily, ChartPlan, GradientDef, Mark, OverlayLayer,
};

use crate::geometry::{CartesianGeometry, PolarGeometry, dimensions};

/// What the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hover {
    Category(usize),
    Sector(usize),
    Point { series: usize, index: usize },
}

impl Hover {
    /// Record index handed to click callbacks
    pub fn index(&self) -> usize {
        match self {
            Self::Category(i) | Self::Sector(i) => *i,
            Self::Point { index, .. } => *index,
        }
    }
}

/// Chart drawing surface
#[component]
pub fn ChartSurface(
    #[prop(into)] plan: Signal<Option<ChartPlan>>,
    #[prop(default = crate::DEFAULT_WIDTH)] width: f64,
    #[prop(into)] on_hover: Callback<Option<Hover>>,
    #[prop(into)] on_select: Callback<Hover>,
) -> impl IntoView {
    move || {
        plan.get().map(|plan| match plan.family {
            ChartFamily::Pie | ChartFamily::RadialBar | ChartFamily::Gauge => {
                polar_view(plan, width, on_hover, on_select)
            }
            _ => cartesian_view(plan, width, on_hover, on_select),
        })
    }
}

fn gradient_view(def: &GradientDef) -> impl IntoView + use<> {
    let (x1, y1, x2, y2) = def.vector;
    view! {
        <linearGradient id=def.id.clone() x1=x1 y1=y1 x2=x2 y2=y2>
            {def.stops.iter().map(|stop| view! {
                <stop
                    offset=format!("{}%", stop.offset * 100.0)
                    stop-color=stop.color.clone()
                    stop-opacity=stop.opacity
                />
            }).collect_view()}
        </linearGradient>
    }
}

// ============================================================================
// CARTESIAN
// ============================================================================

fn cartesian_view(
    plan: ChartPlan,
    width: f64,
    on_hover: Callback<Option<Hover>>,
    on_select: Callback<Hover>,
) -> AnyView {
    let dims = dimensions(&plan, width);
    let geometry = CartesianGeometry::new(&plan, dims);
    let bars = geometry.bar_shapes(&plan);
    let grid_stroke = plan.grid.as_ref().map(|g| (g.stroke.clone(), g.stroke_dasharray.clone()));
    let is_scatter = plan.family == ChartFamily::Scatter;

    let overlays_behind = plan
        .reference_areas
        .iter()
        .filter(|a| a.layer == OverlayLayer::Behind)
        .filter_map(|area| {
            let (x, y, w, h) = geometry.reference_area(area)?;
            Some(view! {
                <rect
                    class="reference-area"
                    x=x y=y width=w height=h
                    fill=area.color.clone()
                    fill-opacity=area.fill_opacity
                />
            })
        })
        .collect_view();

    let mut scatter_index = 0;
    let marks = plan
        .marks
        .iter()
        .map(|mark| match mark {
            Mark::Bar(bar) => bars
                .iter()
                .filter(|s| s.data_key == bar.data_key)
                .map(|shape| {
                    let index = shape.index;
                    view! {
                        <path
                            class="bar"
                            d=shape.path.clone()
                            fill=shape.fill.clone()
                            fill-opacity=shape.opacity
                            on:click=move |_: MouseEvent| on_select.run(Hover::Category(index))
                        />
                    }
                })
                .collect_view()
                .into_any(),
            Mark::Line(line) => {
                let shape = geometry.line_shape(line);
                let dot_color = shape.color.clone();
                let dot_radius = shape.dot_radius;
                view! {
                    <g class="line">
                        <path
                            d=shape.path
                            fill="none"
                            stroke=shape.color
                            stroke-width=shape.stroke_width
                            stroke-dasharray=shape.dasharray
                            stroke-linecap="round"
                            stroke-linejoin="round"
                        />
                        {shape.dots.into_iter().map(|(cx, cy)| view! {
                            <circle cx=cx cy=cy r=dot_radius fill=dot_color.clone() />
                        }).collect_view()}
                    </g>
                }
                .into_any()
            }
            Mark::Area(area) => {
                let shape = geometry.area_shape(area);
                view! {
                    <g class="area">
                        <path d=shape.fill_path fill=shape.fill fill-opacity=shape.opacity />
                        <path
                            d=shape.stroke_path
                            fill="none"
                            stroke=shape.stroke
                            stroke-width=shape.stroke_width
                        />
                    </g>
                }
                .into_any()
            }
            Mark::Scatter(series) => {
                let series_index = scatter_index;
                scatter_index += 1;
                geometry
                    .scatter_shapes(series_index, series)
                    .into_iter()
                    .map(|symbol| {
                        let target = Hover::Point {
                            series: symbol.series,
                            index: symbol.index,
                        };
                        view! {
                            <path
                                class="symbol"
                                d=symbol.path
                                fill=symbol.color
                                fill-opacity="0.8"
                                on:mouseenter=move |_: MouseEvent| on_hover.run(Some(target))
                                on:mouseleave=move |_: MouseEvent| on_hover.run(None)
                                on:click=move |_: MouseEvent| on_select.run(target)
                            />
                        }
                    })
                    .collect_view()
                    .into_any()
            }
            _ => ().into_any(),
        })
        .collect_view();

    let overlays_above = plan
        .reference_lines
        .iter()
        .filter(|l| l.layer == OverlayLayer::Above)
        .filter_map(|line| {
            let seg = geometry.reference_line(line)?;
            let label = line.label.clone().map(|text| view! {
                <text
                    x=seg.x2 - 4.0
                    y=seg.y1 - 4.0
                    text-anchor="end"
                    fill=line.color.clone()
                    font-size=typography::SIZE_XS
                >
                    {text}
                </text>
            });
            Some(view! {
                <g class="reference-line">
                    <line
                        x1=seg.x1 y1=seg.y1
                        x2=seg.x2 y2=seg.y2
                        stroke=line.color.clone()
                        stroke-dasharray=line.stroke_dasharray.clone()
                    />
                    {label}
                </g>
            })
        })
        .collect_view();

    let grid = grid_stroke.map(|(stroke, dash)| {
        geometry
            .grid_lines(&plan)
            .into_iter()
            .map(|seg| view! {
                <line
                    x1=seg.x1 y1=seg.y1
                    x2=seg.x2 y2=seg.y2
                    stroke=stroke.clone()
                    stroke-dasharray=dash.clone()
                />
            })
            .collect_view()
    });

    let axes = plan
        .axes
        .iter()
        .filter(|a| !a.hide)
        .map(|axis| axis_view(&geometry, axis))
        .collect_view();

    // Category charts hover by band, scatter charts by symbol
    let bands = (!is_scatter).then(|| {
        geometry
            .bands()
            .into_iter()
            .map(|band| {
                let target = Hover::Category(band.index);
                view! {
                    <rect
                        class="hover-band"
                        x=band.x y=band.y width=band.width height=band.height
                        fill="transparent"
                        on:mouseenter=move |_: MouseEvent| on_hover.run(Some(target))
                        on:click=move |_: MouseEvent| on_select.run(target)
                    />
                }
            })
            .collect_view()
    });

    view! {
        <svg
            class="vizkit-surface"
            viewBox=dims.viewbox()
            preserveAspectRatio="xMidYMid meet"
            role="img"
            aria-label=plan.aria_label.clone()
            style="width: 100%; height: 100%;"
            on:mouseleave=move |_: MouseEvent| on_hover.run(None)
        >
            <defs>{plan.defs.iter().map(gradient_view).collect_view()}</defs>
            <g transform=dims.inner_transform()>
                <g class="chart-grid">{grid}</g>
                {overlays_behind}
                {bands}
                <g class="marks">{marks}</g>
                {overlays_above}
                {axes}
            </g>
        </svg>
    }
    .into_any()
}

fn axis_view(geometry: &CartesianGeometry, axis: &AxisSpec) -> impl IntoView + use<> {
    let dims = geometry.dimensions();
    let (w, h) = (dims.inner_width(), dims.inner_height());
    let horizontal = matches!(axis.position, AxisPosition::Bottom | AxisPosition::Top);
    let (x2, y2) = if horizontal { (w, 0.0) } else { (0.0, h) };
    let (anchor, dx, dy) = match axis.position {
        AxisPosition::Bottom => ("middle", 0.0, axis.tick_font_size + 8.0),
        AxisPosition::Top => ("middle", 0.0, -8.0),
        AxisPosition::Left => ("end", -8.0, 0.0),
        AxisPosition::Right => ("start", 8.0, 0.0),
    };
    let tick_color = axis.tick_color.clone();
    let font_size = axis.tick_font_size;
    let angle = axis.angle;

    let ticks = geometry
        .ticks(axis)
        .into_iter()
        .map(|(offset, label)| {
            let (x, y) = if horizontal { (offset + dx, dy) } else { (dx, offset) };
            view! {
                <text
                    x=x
                    y=y
                    dy=if horizontal { "0" } else { "0.32em" }
                    text-anchor=anchor
                    transform=format!("rotate({}, {}, {})", angle, x, y)
                    fill=tick_color.clone()
                    font-size=font_size
                    font-family=typography::FONT_FAMILY
                >
                    {label}
                </text>
            }
        })
        .collect_view();

    view! {
        <g class="chart-axis" transform=geometry.axis_transform(axis)>
            <line x1="0" y1="0" x2=x2 y2=y2 stroke=axis.stroke.clone() stroke-width="1" />
            {ticks}
        </g>
    }
}

// ============================================================================
// POLAR
// ============================================================================

fn polar_view(
    plan: ChartPlan,
    width: f64,
    on_hover: Callback<Option<Hover>>,
    on_select: Callback<Hover>,
) -> AnyView {
    let dims = dimensions(&plan, width);
    let polar = PolarGeometry::new(dims);
    let text_color = plan.text_color.clone();

    let marks = plan
        .marks
        .iter()
        .map(|mark| match mark {
            Mark::Sector(sector) => {
                let target = Hover::Sector(sector.index);
                let label = sector.label.clone().map(|text| {
                    let (x, y) = polar.sector_label_anchor(sector);
                    view! {
                        <text
                            x=x y=y
                            text-anchor={if x >= polar.cx { "start" } else { "end" }}
                            dy="0.32em"
                            fill=text_color.clone()
                            font-size=typography::SIZE_SM
                        >
                            {text}
                        </text>
                    }
                });
                view! {
                    <g class="sector">
                        <path
                            d=polar.sector(sector)
                            fill=sector.fill.clone()
                            on:mouseenter=move |_: MouseEvent| on_hover.run(Some(target))
                            on:click=move |_: MouseEvent| on_select.run(target)
                        />
                        {label}
                    </g>
                }
                .into_any()
            }
            Mark::RadialBar(bar) => {
                let target = Hover::Sector(bar.index);
                let (track, path) = polar.radial_bar(bar);
                let track_fill = bar.track.as_ref().map(|t| t.fill.clone());
                view! {
                    <g class="radial-bar">
                        {track.map(|d| view! { <path d=d fill=track_fill.clone() /> })}
                        <path
                            d=path
                            fill=bar.fill.clone()
                            on:mouseenter=move |_: MouseEvent| on_hover.run(Some(target))
                            on:click=move |_: MouseEvent| on_select.run(target)
                        />
                    </g>
                }
                .into_any()
            }
            Mark::Gauge(gauge) => {
                let (track, value) = polar.gauge(gauge);
                let caption = gauge.label.clone().map(|text| view! {
                    <text
                        x=polar.cx
                        y=polar.cy + typography::SIZE_MD + 4.0
                        text-anchor="middle"
                        fill=text_color.clone()
                        font-size=typography::SIZE_SM
                    >
                        {text}
                    </text>
                });
                view! {
                    <g class="gauge">
                        <path d=track fill=gauge.track_color.clone() />
                        {value.map(|d| view! { <path d=d fill=gauge.color.clone() /> })}
                        <text
                            x=polar.cx
                            y=polar.cy
                            text-anchor="middle"
                            fill=text_color.clone()
                            font-size=typography::SIZE_XL
                            font-weight=typography::WEIGHT_SEMIBOLD
                        >
                            {gauge.formatted_value.clone()}
                        </text>
                        {caption}
                    </g>
                }
                .into_any()
            }
            _ => ().into_any(),
        })
        .collect_view();

    let center = plan.center.clone().map(|center| view! {
        <g class="center-label">
            <text
                x=polar.cx
                y=polar.cy
                text-anchor="middle"
                dy="0.1em"
                fill=text_color.clone()
                font-size=typography::SIZE_XL
                font-weight=typography::WEIGHT_SEMIBOLD
            >
                {center.value}
            </text>
            {center.caption.map(|caption| view! {
                <text
                    x=polar.cx
                    y=polar.cy + typography::SIZE_XL
                    text-anchor="middle"
                    fill=text_color.clone()
                    font-size=typography::SIZE_SM
                >
                    {caption}
                </text>
            })}
        </g>
    });

    view! {
        <svg
            class="vizkit-surface polar"
            viewBox=dims.viewbox()
            preserveAspectRatio="xMidYMid meet"
            role="img"
            aria-label=plan.aria_label.clone()
            style="width: 100%; height: 100%;"
            on:mouseleave=move |_: MouseEvent| on_hover.run(None)
        >
            {marks}
            {center}
        </svg>
    }
    .into_any()
}

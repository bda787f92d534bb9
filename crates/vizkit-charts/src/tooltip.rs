//! Hover aggregation: formatted rows, stacked totals and pie percentages.
//!
//! Everything here is recomputed per hover event from the current plan or
//! dataset; nothing is cached between events.

use serde::Serialize;

use vizkit_core::{PieDataPoint, Value, ValueFormatter, pie_total};

use crate::plan::{ChartPlan, Fill, Mark, ScatterMark, TooltipSpec};

/// One series' contribution to the hovered category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipEntry {
    pub name: String,
    pub data_key: String,
    /// `None` when the row has no value for this series
    pub value: Option<f64>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipRow {
    pub name: String,
    pub color: String,
    pub value: f64,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipContent {
    pub label: String,
    pub rows: Vec<TooltipRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<TooltipRow>,
}

/// `value / total * 100` rounded to one decimal; zero when the total is not positive
pub fn percentage(value: f64, total: f64) -> f64 {
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    (value / total * 1000.0).round() / 10.0
}

/// Hover payload for category `index` of a cartesian plan
///
/// One entry per series-bound mark, in paint order. Bars colored by category
/// report the hovered cell's color.
pub fn hover_payload(plan: &ChartPlan, index: usize) -> Vec<TooltipEntry> {
    plan.marks
        .iter()
        .filter_map(|mark| match mark {
            Mark::Line(m) => Some(TooltipEntry {
                name: m.name.clone(),
                data_key: m.data_key.clone(),
                value: m.values.get(index).copied().flatten(),
                color: m.color.clone(),
            }),
            Mark::Bar(m) => {
                let color = m
                    .cell_colors
                    .as_ref()
                    .and_then(|cells| cells.get(index).cloned())
                    .unwrap_or_else(|| fill_color(&m.fill));
                Some(TooltipEntry {
                    name: m.name.clone(),
                    data_key: m.data_key.clone(),
                    value: m.segments.get(index).copied().flatten().map(|s| s.value),
                    color,
                })
            }
            Mark::Area(m) => Some(TooltipEntry {
                name: m.name.clone(),
                data_key: m.data_key.clone(),
                value: m.segments.get(index).copied().flatten().map(|s| s.value),
                color: m.stroke.clone(),
            }),
            _ => None,
        })
        .collect()
}

fn fill_color(fill: &Fill) -> String {
    match fill {
        Fill::Solid { color, .. } => color.clone(),
        Fill::Gradient { id } => format!("url(#{})", id),
        Fill::None => String::new(),
    }
}

/// Format a payload into tooltip rows, plus a "Total" row when `show_total` is set
///
/// Entries without a value are omitted and contribute nothing to the total.
pub fn aggregate(label: &str, payload: &[TooltipEntry], spec: &TooltipSpec) -> TooltipContent {
    let rows: Vec<TooltipRow> = payload
        .iter()
        .filter_map(|entry| {
            let value = entry.value?;
            Some(TooltipRow {
                name: entry.name.clone(),
                color: entry.color.clone(),
                value,
                formatted: spec.value_format.format(value),
                percentage: None,
            })
        })
        .collect();

    let total = spec.show_total.then(|| {
        let sum: f64 = rows.iter().map(|r| r.value).sum();
        TooltipRow {
            name: spec.total_label.clone(),
            color: String::new(),
            value: sum,
            formatted: spec.value_format.format(sum),
            percentage: None,
        }
    });

    let label = match &spec.label_format {
        Some(format) => format.format_value(&Value::from(label)),
        None => label.to_string(),
    };

    TooltipContent { label, rows, total }
}

/// Tooltip for category `index` of a cartesian plan
pub fn category_tooltip(plan: &ChartPlan, index: usize) -> Option<TooltipContent> {
    if !plan.tooltip.show {
        return None;
    }
    let label = plan.categories.get(index)?;
    let payload = hover_payload(plan, index);
    Some(aggregate(label, &payload, &plan.tooltip))
}

/// Tooltip for pie segment `index`; the percentage base is the current dataset's total
pub fn pie_tooltip(data: &[PieDataPoint], index: usize, color: &str, spec: &TooltipSpec) -> Option<TooltipContent> {
    let point = data.get(index)?;
    let total = pie_total(data);
    let value = point.value.max(0.0);
    Some(TooltipContent {
        label: point.name.clone(),
        rows: vec![TooltipRow {
            name: point.name.clone(),
            color: point.color.clone().unwrap_or_else(|| color.to_string()),
            value,
            formatted: spec.value_format.format(value),
            percentage: Some(percentage(value, total)),
        }],
        total: None,
    })
}

/// Tooltip for one scatter point: x, y and (for bubbles) z rows
pub fn scatter_tooltip(series: &ScatterMark, point: usize, spec: &TooltipSpec) -> Option<TooltipContent> {
    let p = series.points.get(point)?;
    let row = |name: &str, value: f64| TooltipRow {
        name: name.to_string(),
        color: series.color.clone(),
        value,
        formatted: spec.value_format.format(value),
        percentage: None,
    };
    let mut rows = vec![row("x", p.x), row("y", p.y)];
    if let Some(z) = p.z {
        rows.push(row("z", z));
    }
    Some(TooltipContent {
        label: p.name.clone().unwrap_or_else(|| series.name.clone()),
        rows,
        total: None,
    })
}

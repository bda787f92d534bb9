//! Legend entries for the static, toggle and pie legends.
//!
//! The toggle legend is controlled: hidden state lives in a caller-owned set
//! and every visual flag here is derived from membership in that set.

use std::collections::HashSet;

use serde::Serialize;

use vizkit_core::{ValueFormat, ValueFormatter, tokens};

use crate::plan::{ChartPlan, LegendItem};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub value: String,
    pub color: String,
    pub data_key: String,
    pub hidden: bool,
    pub strikethrough: bool,
    pub swatch_opacity: f64,
}

/// Entries for a legend payload against the caller's hidden set
pub fn legend_entries(payload: &[LegendItem], hidden: &HashSet<String>) -> Vec<LegendEntry> {
    payload
        .iter()
        .map(|item| {
            let is_hidden = hidden.contains(&item.data_key);
            LegendEntry {
                value: item.value.clone(),
                color: item.color.clone(),
                data_key: item.data_key.clone(),
                hidden: is_hidden,
                strikethrough: is_hidden,
                swatch_opacity: if is_hidden { tokens::legend::HIDDEN_OPACITY } else { 1.0 },
            }
        })
        .collect()
}

/// New hidden set with `data_key` flipped; the input set is left untouched
pub fn toggle(hidden: &HashSet<String>, data_key: &str) -> HashSet<String> {
    let mut next = hidden.clone();
    if !next.remove(data_key) {
        next.insert(data_key.to_string());
    }
    next
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieLegendEntry {
    pub name: String,
    pub color: String,
    pub value: f64,
    pub formatted: String,
    pub percentage: f64,
}

/// Value and share of every sector in a pie plan
pub fn pie_legend(plan: &ChartPlan, format: &ValueFormat) -> Vec<PieLegendEntry> {
    plan.sectors()
        .map(|s| PieLegendEntry {
            name: s.name.clone(),
            color: s.fill.clone(),
            value: s.value,
            formatted: format.format(s.value),
            percentage: s.percentage,
        })
        .collect()
}

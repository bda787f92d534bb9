//! Grouped, stacked and stacked-percent layout for bar and area series.
//!
//! Stacking runs in series order: within a stack group, each series starts
//! where the previous one ended for that category. Missing values are gaps and
//! contribute nothing to totals.

use serde::{Deserialize, Serialize};

use vizkit_core::{DataPoint, SeriesConfig};

/// Stack id used when a stacked chart's series carries none
pub const DEFAULT_STACK_ID: &str = "stack";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackMode {
    /// Independent columns side by side (or overlapping areas)
    #[default]
    Grouped,
    /// Values summed within each stack group
    Stacked,
    /// Stacked, each value drawn as a fraction of its category's stack total
    StackedPercent,
}

impl StackMode {
    pub fn is_stacked(&self) -> bool {
        !matches!(self, Self::Grouped)
    }
}

/// Drawn extent of one value: from `base` to `top` on the value axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub base: f64,
    pub top: f64,
    /// Raw value from the row
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedSeries {
    pub data_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    pub segments: Vec<Option<Segment>>,
}

/// Per-category sums of one stack group
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTotal {
    pub stack_id: String,
    pub totals: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackLayout {
    pub mode: StackMode,
    pub series: Vec<StackedSeries>,
    pub totals: Vec<StackTotal>,
}

impl StackLayout {
    pub fn series(&self, data_key: &str) -> Option<&StackedSeries> {
        self.series.iter().find(|s| s.data_key == data_key)
    }

    pub fn totals(&self, stack_id: &str) -> Option<&[f64]> {
        self.totals
            .iter()
            .find(|t| t.stack_id == stack_id)
            .map(|t| t.totals.as_slice())
    }

    /// Largest and smallest drawn extent across all segments
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.segments.iter().flatten())
            .flat_map(|seg| [seg.base, seg.top])
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Stack group a series belongs to under `mode`
///
/// Grouped charts keep every series independent. Stacked charts honor an
/// explicit `stackId` and put the rest in [`DEFAULT_STACK_ID`].
pub fn effective_stack_id(series: &SeriesConfig, mode: StackMode) -> Option<String> {
    match mode {
        StackMode::Grouped => None,
        StackMode::Stacked | StackMode::StackedPercent => Some(
            series
                .stack_id
                .clone()
                .unwrap_or_else(|| DEFAULT_STACK_ID.to_string()),
        ),
    }
}

/// Lay out `series` over `data` under `mode`
pub fn compute_stacks(data: &[DataPoint], series: &[&SeriesConfig], mode: StackMode) -> StackLayout {
    let n = data.len();
    let stack_ids: Vec<Option<String>> = series.iter().map(|s| effective_stack_id(s, mode)).collect();

    // Stack group order follows first appearance
    let mut totals: Vec<StackTotal> = Vec::new();
    for id in stack_ids.iter().flatten() {
        if !totals.iter().any(|t| &t.stack_id == id) {
            totals.push(StackTotal {
                stack_id: id.clone(),
                totals: vec![0.0; n],
            });
        }
    }
    for (s, id) in series.iter().zip(&stack_ids) {
        let Some(id) = id else { continue };
        if let Some(group) = totals.iter_mut().find(|t| &t.stack_id == id) {
            for (total, row) in group.totals.iter_mut().zip(data) {
                if let Some(v) = row.number(&s.data_key) {
                    *total += v;
                }
            }
        }
    }

    let mut running: Vec<(String, Vec<f64>)> =
        totals.iter().map(|t| (t.stack_id.clone(), vec![0.0; n])).collect();

    let stacked = series
        .iter()
        .zip(&stack_ids)
        .map(|(s, id)| {
            let segments = data
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    let value = row.number(&s.data_key)?;
                    let Some(id) = id else {
                        return Some(Segment { base: 0.0, top: value, value });
                    };
                    let offsets = &mut running.iter_mut().find(|(sid, _)| sid == id)?.1;
                    let base = offsets[i];
                    offsets[i] += value;
                    let top = offsets[i];

                    if mode == StackMode::StackedPercent {
                        let total = totals
                            .iter()
                            .find(|t| &t.stack_id == id)
                            .map_or(0.0, |t| t.totals[i]);
                        if total == 0.0 {
                            return Some(Segment { base: 0.0, top: 0.0, value });
                        }
                        return Some(Segment {
                            base: base / total,
                            top: top / total,
                            value,
                        });
                    }
                    Some(Segment { base, top, value })
                })
                .collect();

            StackedSeries {
                data_key: s.data_key.clone(),
                stack_id: id.clone(),
                segments,
            }
        })
        .collect();

    StackLayout {
        mode,
        series: stacked,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<DataPoint> {
        vec![
            DataPoint::new().with("m", "Jan").with("a", 10).with("b", 20),
            DataPoint::new().with("m", "Feb").with("a", 15).with("b", 5),
        ]
    }

    #[test]
    fn test_stacked_totals() {
        let a = SeriesConfig::new("a").stack("s");
        let b = SeriesConfig::new("b").stack("s");
        let layout = compute_stacks(&rows(), &[&a, &b], StackMode::Stacked);

        assert_eq!(layout.totals("s"), Some(&[30.0, 20.0][..]));
        let b_segs = &layout.series("b").unwrap().segments;
        assert_eq!(b_segs[0], Some(Segment { base: 10.0, top: 30.0, value: 20.0 }));
        assert_eq!(b_segs[1], Some(Segment { base: 15.0, top: 20.0, value: 5.0 }));
    }

    #[test]
    fn test_missing_values_skip_totals() {
        let mut data = rows();
        data[1] = DataPoint::new().with("m", "Feb").with("b", 5);
        let a = SeriesConfig::new("a");
        let b = SeriesConfig::new("b");
        let layout = compute_stacks(&data, &[&a, &b], StackMode::Stacked);

        assert_eq!(layout.totals(DEFAULT_STACK_ID), Some(&[30.0, 5.0][..]));
        assert_eq!(layout.series("a").unwrap().segments[1], None);
        assert_eq!(
            layout.series("b").unwrap().segments[1],
            Some(Segment { base: 0.0, top: 5.0, value: 5.0 })
        );
        assert!(layout.totals(DEFAULT_STACK_ID).unwrap().iter().all(|t| t.is_finite()));
    }

    #[test]
    fn test_percent_segments_fill_unit_interval() {
        let a = SeriesConfig::new("a");
        let b = SeriesConfig::new("b");
        let layout = compute_stacks(&rows(), &[&a, &b], StackMode::StackedPercent);

        let a0 = layout.series("a").unwrap().segments[0].unwrap();
        let b0 = layout.series("b").unwrap().segments[0].unwrap();
        assert!((a0.top - 1.0 / 3.0).abs() < 1e-12);
        assert!((b0.top - 1.0).abs() < 1e-12);
        assert_eq!(b0.value, 20.0);
        // totals stay in raw units for the tooltip
        assert_eq!(layout.totals(DEFAULT_STACK_ID), Some(&[30.0, 20.0][..]));
    }

    #[test]
    fn test_percent_with_zero_total() {
        let data = vec![DataPoint::new().with("a", 0).with("b", 0)];
        let a = SeriesConfig::new("a");
        let b = SeriesConfig::new("b");
        let layout = compute_stacks(&data, &[&a, &b], StackMode::StackedPercent);
        let seg = layout.series("b").unwrap().segments[0].unwrap();
        assert_eq!((seg.base, seg.top), (0.0, 0.0));
    }

    #[test]
    fn test_grouped_ignores_stack_ids() {
        let a = SeriesConfig::new("a").stack("s");
        let b = SeriesConfig::new("b").stack("s");
        let layout = compute_stacks(&rows(), &[&a, &b], StackMode::Grouped);

        assert!(layout.totals.is_empty());
        assert_eq!(
            layout.series("b").unwrap().segments[0],
            Some(Segment { base: 0.0, top: 20.0, value: 20.0 })
        );
    }

    #[test]
    fn test_separate_stack_groups() {
        let a = SeriesConfig::new("a").stack("left");
        let b = SeriesConfig::new("b").stack("right");
        let layout = compute_stacks(&rows(), &[&a, &b], StackMode::Stacked);
        assert_eq!(layout.totals("left"), Some(&[10.0, 15.0][..]));
        assert_eq!(layout.totals("right"), Some(&[20.0, 5.0][..]));
        assert_eq!(layout.extent(), Some((0.0, 20.0)));
    }
}

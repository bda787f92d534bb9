//! Chart-ready records: generic rows, pie segments and scatter points.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// SCALAR VALUES
// ============================================================================

/// A single field value inside a [`DataPoint`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    #[default]
    Null,
}

impl Value {
    /// Numeric view of the value; text, null and non-finite numbers are gaps
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Null => Ok(()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

// ============================================================================
// DATA POINT
// ============================================================================

/// One row of chart data keyed by field name
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPoint(BTreeMap<String, Value>);

impl DataPoint {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style field insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Numeric field value; missing or non-numeric fields read as `None`
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Display label for a category field
    pub fn label(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataPoint {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// PIE / RADIAL
// ============================================================================

/// Named non-negative value for pie, donut and radial bar charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieDataPoint {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl PieDataPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Radial bar rows share the pie row shape
pub type RadialDataPoint = PieDataPoint;

/// Sum of all segment values, negatives counted as zero
pub fn pie_total(data: &[PieDataPoint]) -> f64 {
    data.iter()
        .map(|p| if p.value.is_finite() { p.value.max(0.0) } else { 0.0 })
        .sum()
}

// ============================================================================
// SCATTER
// ============================================================================

/// A single scatter or bubble point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterDataPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ScatterDataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            name: None,
            category: None,
        }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }
}

/// A named group of scatter points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    #[serde(default)]
    pub name: String,
    pub data: Vec<ScatterDataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Scatter input as authored: either grouped series or a flat point list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScatterInput {
    Grouped(Vec<ScatterSeries>),
    Flat(Vec<ScatterDataPoint>),
}

impl Default for ScatterInput {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl ScatterInput {
    /// True when there is no point to plot in any series
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(points) => points.is_empty(),
            Self::Grouped(series) => series.iter().all(|s| s.data.is_empty()),
        }
    }
}

// ============================================================================
// GAUGE THRESHOLDS
// ============================================================================

/// Value cutoff paired with the color used at or below it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub value: f64,
    pub color: String,
}

impl Threshold {
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_text_fields_are_gaps() {
        let row = DataPoint::new()
            .with("month", "Jan")
            .with("a", 10)
            .with("b", Value::Null);

        assert_eq!(row.number("a"), Some(10.0));
        assert_eq!(row.number("b"), None);
        assert_eq!(row.number("month"), None);
        assert_eq!(row.number("missing"), None);
        assert_eq!(row.label("month").as_deref(), Some("Jan"));
    }

    #[test]
    fn test_nan_reads_as_gap() {
        let row = DataPoint::new().with("a", f64::NAN);
        assert_eq!(row.number("a"), None);
    }

    #[test]
    fn test_datapoint_from_json() {
        let row: DataPoint =
            serde_json::from_str(r#"{"m":"Feb","a":15,"b":null}"#).unwrap();
        assert_eq!(row.get("m"), Some(&Value::Text("Feb".into())));
        assert_eq!(row.number("a"), Some(15.0));
        assert!(row.get("b").unwrap().is_null());
    }

    #[test]
    fn test_scatter_input_shapes() {
        let flat: ScatterInput = serde_json::from_str(r#"[{"x":1,"y":2}]"#).unwrap();
        assert!(matches!(flat, ScatterInput::Flat(ref p) if p.len() == 1));

        let grouped: ScatterInput =
            serde_json::from_str(r#"[{"name":"A","data":[{"x":1,"y":2,"z":3}]}]"#).unwrap();
        assert!(matches!(grouped, ScatterInput::Grouped(ref s) if s[0].data[0].z == Some(3.0)));
    }

    #[test]
    fn test_pie_total_ignores_negatives() {
        let data = vec![PieDataPoint::new("a", 30.0), PieDataPoint::new("b", -5.0)];
        assert_eq!(pie_total(&data), 30.0);
    }
}

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One aggregated sustainability indicator: baseline, time series,
/// derived targets and the cross-region snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// Unique identifier. Falls back to the metric name when the source
    /// identifier is the literal sentinel "NA".
    pub id: String,

    /// Metric name, taken verbatim from the first row seen for this id
    pub name: String,

    /// Environmental dimension this metric belongs to
    pub category: String,

    /// Unit of measurement
    pub unit: String,

    /// Global value at the baseline year. Defaults to 0.0, which
    /// consumers must read as "unknown", not a true zero reading.
    pub baseline_value: f64,

    /// Global time series, ascending by year
    pub data_points: Vec<DataPoint>,

    /// Derived absolute targets keyed by target year
    pub targets: BTreeMap<i32, Target>,

    /// Regional values at the reference year
    pub regions: HashMap<String, f64>,
}

impl MetricRecord {
    /// Create an empty record seeded with the descriptive fields of the
    /// first row seen for this id
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            unit: unit.into(),
            baseline_value: 0.0,
            data_points: Vec::new(),
            targets: BTreeMap::new(),
            regions: HashMap::new(),
        }
    }
}

/// One global measurement for a metric in a given year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub year: i32,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// An absolute numeric goal derived from free-text target language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Absolute target value resolved against the baseline
    pub value: f64,

    /// Original free-text expression the value was derived from
    pub label: String,
}

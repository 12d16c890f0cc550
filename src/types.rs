//! Core data model types.
//!
//! Ingestion produces an ordered list of [`EquipmentRecord`]s which, together with their
//! [`Summary`], form an immutable [`Dataset`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::processing::{metric_stats, summarize};

/// Record field a header column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquipmentField {
    Name,
    Category,
    Flowrate,
    Pressure,
    Temperature,
}

/// Header label → field. Matching is exact and case-sensitive.
///
/// Adding an alias is a one-line change here.
pub const COLUMN_ALIASES: &[(&str, EquipmentField)] = &[
    ("Equipment Name", EquipmentField::Name),
    ("Name", EquipmentField::Name),
    ("Type", EquipmentField::Category),
    ("Flowrate", EquipmentField::Flowrate),
    ("Pressure", EquipmentField::Pressure),
    ("Temperature", EquipmentField::Temperature),
];

impl EquipmentField {
    /// Resolve a header cell through [`COLUMN_ALIASES`].
    pub fn from_header(label: &str) -> Option<Self> {
        COLUMN_ALIASES
            .iter()
            .find(|(alias, _)| *alias == label)
            .map(|&(_, field)| field)
    }

    /// Canonical header label, used in error messages and reports.
    pub fn label(self) -> &'static str {
        match self {
            EquipmentField::Name => "Equipment Name",
            EquipmentField::Category => "Type",
            EquipmentField::Flowrate => "Flowrate",
            EquipmentField::Pressure => "Pressure",
            EquipmentField::Temperature => "Temperature",
        }
    }
}

/// One of the three numeric readings carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Flowrate,
    Pressure,
    Temperature,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Metric; 3] = [Metric::Flowrate, Metric::Pressure, Metric::Temperature];

    /// Display unit, matching the report layout.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Flowrate => "m3/h",
            Metric::Pressure => "atm",
            Metric::Temperature => "C",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Metric::Flowrate => "flowrate",
            Metric::Pressure => "pressure",
            Metric::Temperature => "temperature",
        };
        f.write_str(s)
    }
}

/// One row of an equipment file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EquipmentRecord {
    #[serde(alias = "equipment_name")]
    pub name: String,
    #[serde(alias = "type", default)]
    pub category: String,
    #[serde(default)]
    pub flowrate: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub temperature: f64,
}

impl EquipmentRecord {
    /// Create a record.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        flowrate: f64,
        pressure: f64,
        temperature: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            flowrate,
            pressure,
            temperature,
        }
    }

    /// Reading for `metric`.
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Flowrate => self.flowrate,
            Metric::Pressure => self.pressure,
            Metric::Temperature => self.temperature,
        }
    }
}

/// Average, extrema and population standard deviation of one metric.
///
/// All fields are `0.0` for an empty input; use [`Summary::total_count`] to tell "no data"
/// apart from genuine zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl MetricStats {
    /// Stats over `values`. See [`crate::processing::metric_stats`].
    pub fn from_values(values: &[f64]) -> Self {
        metric_stats(values)
    }
}

/// Aggregate view over a record set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_count: usize,
    pub flowrate: MetricStats,
    pub pressure: MetricStats,
    pub temperature: MetricStats,
    /// Record count per category label (verbatim, empty label included).
    pub type_distribution: BTreeMap<String, usize>,
}

impl Summary {
    /// Compute the summary of `records`. See [`crate::processing::summarize`].
    pub fn from_records(records: &[EquipmentRecord]) -> Self {
        summarize(records)
    }

    /// Stats for `metric`.
    pub fn metric(&self, metric: Metric) -> &MetricStats {
        match metric {
            Metric::Flowrate => &self.flowrate,
            Metric::Pressure => &self.pressure,
            Metric::Temperature => &self.temperature,
        }
    }
}

/// Opaque dataset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(Uuid);

impl DatasetId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DatasetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One accepted upload: its records and their summary.
///
/// A `Dataset` is immutable once built and its summary always reflects its records. On
/// deserialization any incoming `summary` is ignored and recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DatasetWire")]
pub struct Dataset {
    id: DatasetId,
    filename: String,
    timestamp: DateTime<Utc>,
    summary: Summary,
    #[serde(rename = "data")]
    records: Vec<EquipmentRecord>,
}

#[derive(Deserialize)]
struct DatasetWire {
    id: DatasetId,
    filename: String,
    timestamp: DateTime<Utc>,
    #[serde(rename = "data")]
    records: Vec<EquipmentRecord>,
}

impl From<DatasetWire> for Dataset {
    fn from(w: DatasetWire) -> Self {
        Dataset::from_parts(w.id, w.filename, w.timestamp, w.records)
    }
}

impl Dataset {
    /// Build a dataset with a fresh id, stamped with the current time.
    pub fn new(filename: impl Into<String>, records: Vec<EquipmentRecord>) -> Self {
        Self::from_parts(DatasetId::new(), filename, Utc::now(), records)
    }

    /// Build a dataset from explicit parts. The summary is computed from `records`.
    pub fn from_parts(
        id: DatasetId,
        filename: impl Into<String>,
        timestamp: DateTime<Utc>,
        records: Vec<EquipmentRecord>,
    ) -> Self {
        let summary = summarize(&records);
        Self {
            id,
            filename: filename.into(),
            timestamp,
            summary,
            records,
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    /// Original upload file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Ingestion time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Records in original row order.
    pub fn records(&self) -> &[EquipmentRecord] {
        &self.records
    }

    /// Number of records in the dataset.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Descriptor handed to a report-export trigger.
    pub fn report_request(&self) -> ReportRequest {
        ReportRequest {
            dataset_id: self.id,
            filename: self.filename.clone(),
            record_count: self.records.len(),
        }
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// What a report generator needs to know about a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub dataset_id: DatasetId,
    pub filename: String,
    pub record_count: usize,
}

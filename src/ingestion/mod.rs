//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] or [`ingest_from_bytes`] (from [`unified`]),
//! which:
//!
//! - pick the format from the file extension (`.csv`, `.xls`, `.xlsx`) or [`IngestionOptions`]
//! - parse the file into ordered [`crate::types::EquipmentRecord`]s, all-or-nothing
//! - wrap them with their summary in a [`crate::types::Dataset`]
//! - optionally report success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
mod records;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{
    ingest_from_bytes, ingest_from_path, parse_records, ExcelSheetSelection, IngestionFormat, IngestionOptions,
    IngestionRequest,
};

//! `chem-equip` turns uploaded chemical-equipment parameter files into an immutable in-memory
//! [`types::Dataset`]: the ordered equipment records plus a computed [`types::Summary`].
//!
//! The primary entrypoints are [`ingestion::ingest_from_path`] and
//! [`ingestion::ingest_from_bytes`], which detect the format from the file extension (or you can
//! force one via [`ingestion::IngestionOptions`]).
//!
//! ## What you can ingest
//!
//! - **CSV**: `.csv`
//! - **Excel** (Cargo feature `excel`, on by default): `.xlsx`, `.xls` (first sheet)
//!
//! Header cells are matched exactly against a fixed alias table ([`types::COLUMN_ALIASES`]):
//!
//! | Header                      | Field         |
//! |-----------------------------|---------------|
//! | `Equipment Name`, `Name`    | `name`        |
//! | `Type`                      | `category`    |
//! | `Flowrate`                  | `flowrate`    |
//! | `Pressure`                  | `pressure`    |
//! | `Temperature`               | `temperature` |
//!
//! Unknown columns are ignored. Numeric cells keep their leading number (`"12.5 m3/h"` → `12.5`)
//! and cells without one become `0.0`. Every record must have a name; otherwise the whole file
//! is rejected (no partial datasets).
//!
//! ## Quick example
//!
//! ```rust
//! use chem_equip::ingestion::{ingest_from_bytes, IngestionOptions};
//!
//! let csv = "\
//! Equipment Name,Type,Flowrate,Pressure,Temperature
//! A,Pump,10,2,50
//! B,Valve,,3,60
//! ";
//! let ds = ingest_from_bytes("plant.csv", csv.as_bytes(), &IngestionOptions::default()).unwrap();
//!
//! let s = ds.summary();
//! assert_eq!(s.total_count, 2);
//! assert_eq!((s.flowrate.avg, s.flowrate.min, s.flowrate.max), (5.0, 0.0, 10.0));
//! assert_eq!(s.flowrate.std_dev, 5.0);
//! assert_eq!(s.type_distribution["Pump"], 1);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: unified ingestion entrypoints, format readers and observers
//! - [`types`]: records, summary and dataset types
//! - [`processing`]: summary statistics and threshold checks
//! - [`execution`]: parallel batch ingestion and live sync
//! - [`history`]: bounded list of recent datasets
//! - `report`: `.xlsx` report export (feature `report`)
//! - [`error`]: error types used across ingestion

pub mod error;
pub mod execution;
pub mod history;
pub mod ingestion;
pub mod processing;
#[cfg(feature = "report")]
pub mod report;
pub mod types;

pub use error::{ErrorKind, IngestionError, IngestionResult};

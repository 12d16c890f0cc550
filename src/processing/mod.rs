//! In-memory computations over ingested records.
//!
//! Everything here is pure: functions take record slices and return new values.
//!
//! Currently implemented:
//!
//! - [`summarize()`]: per-metric avg/min/max/population stdDev and the category histogram
//! - [`ThresholdSettings::check`]: readings above configured red-zone limits
//!
//! ## Example
//!
//! ```rust
//! use chem_equip::processing::{summarize, ThresholdSettings};
//! use chem_equip::types::{EquipmentRecord, Metric};
//!
//! let records = vec![
//!     EquipmentRecord::new("A", "Pump", 10.0, 2.0, 50.0),
//!     EquipmentRecord::new("B", "Valve", 0.0, 3.0, 60.0),
//! ];
//!
//! let summary = summarize(&records);
//! assert_eq!(summary.flowrate.avg, 5.0);
//! assert_eq!(summary.flowrate.std_dev, 5.0);
//!
//! let limits = ThresholdSettings {
//!     max_temperature: Some(55.0),
//!     ..Default::default()
//! };
//! let alerts = limits.check(&records);
//! assert_eq!(alerts.len(), 1);
//! assert_eq!(alerts[0].metric, Metric::Temperature);
//! ```

pub mod summary;
pub mod thresholds;

pub use summary::{metric_stats, metric_stats_for, summarize, type_distribution};
pub use thresholds::{CriticalAlert, ThresholdSettings};

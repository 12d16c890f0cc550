//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`] or [`ingest_from_bytes`], which turn one uploaded
//! file into an immutable [`crate::types::Dataset`].
//!
//! - If [`IngestionOptions::format`] is `None`, the format is inferred from the file extension.
//!   Unsupported extensions are rejected before the file is read.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{Dataset, EquipmentRecord};

use super::csv;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet workbooks (feature-gated behind `excel`).
    Excel,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// Which sheet to read from a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExcelSheetSelection {
    /// The first sheet in workbook order (default).
    #[default]
    First,
    /// A single named sheet.
    Sheet(String),
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<IngestionFormat>,
    /// Excel-specific options.
    pub excel_sheet: ExcelSheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("excel_sheet", &self.excel_sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            excel_sheet: ExcelSheetSelection::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest one file from disk into a [`Dataset`].
///
/// The dataset's filename is the final path component. On failure nothing is returned but the
/// error; there are no partial datasets.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and category counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use chem_equip::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), chem_equip::IngestionError> {
/// let ds = ingest_from_path("plant.csv", &IngestionOptions::default())?;
/// println!("rows={} avg flowrate={}", ds.record_count(), ds.summary().flowrate.avg);
/// # Ok(())
/// # }
/// ```
///
/// Force a format when the file has no useful extension:
///
/// ```no_run
/// use chem_equip::ingestion::{ingest_from_path, IngestionFormat, IngestionOptions};
///
/// # fn main() -> Result<(), chem_equip::IngestionError> {
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Csv),
///     ..Default::default()
/// };
/// let ds = ingest_from_path("upload_without_extension", &opts)?;
/// println!("rows={}", ds.record_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> IngestionResult<Dataset> {
    let path = path.as_ref();
    let source = path.display().to_string();
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.clone());

    let (format, result) = match resolve_format(path, options) {
        Ok(format) => {
            let result = std::fs::read(path)
                .map_err(IngestionError::from)
                .and_then(|bytes| parse_records(format, &bytes, options));
            (Some(format), result)
        }
        Err(e) => (None, Err(e)),
    };

    let result = result.map(|records| Dataset::new(filename, records));
    notify(options, &IngestionContext { source, format }, &result);
    result
}

/// Ingest an uploaded file held in memory.
///
/// `filename` selects the format (unless forced) and becomes the dataset's filename.
///
/// ```rust
/// use chem_equip::ingestion::{ingest_from_bytes, IngestionOptions};
///
/// let csv = "Equipment Name,Type,Flowrate,Pressure,Temperature\nP-1,Pump,10,2,50\n";
/// let ds = ingest_from_bytes("plant.csv", csv.as_bytes(), &IngestionOptions::default()).unwrap();
/// assert_eq!(ds.summary().total_count, 1);
/// assert_eq!(ds.records()[0].name, "P-1");
/// ```
pub fn ingest_from_bytes(
    filename: &str,
    bytes: &[u8],
    options: &IngestionOptions,
) -> IngestionResult<Dataset> {
    let (format, result) = match resolve_format(Path::new(filename), options) {
        Ok(format) => (Some(format), parse_records(format, bytes, options)),
        Err(e) => (None, Err(e)),
    };

    let result = result.map(|records| Dataset::new(filename, records));
    let ctx = IngestionContext {
        source: filename.to_string(),
        format,
    };
    notify(options, &ctx, &result);
    result
}

/// Parse raw content in a known format into ordered records.
pub fn parse_records(
    format: IngestionFormat,
    bytes: &[u8],
    options: &IngestionOptions,
) -> IngestionResult<Vec<EquipmentRecord>> {
    match format {
        IngestionFormat::Csv => csv::parse_csv_records(bytes),
        IngestionFormat::Excel => parse_excel_dispatch(bytes, &options.excel_sheet),
    }
}

fn notify(options: &IngestionOptions, ctx: &IngestionContext, result: &IngestionResult<Dataset>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(ds) => obs.on_success(
            ctx,
            IngestionStats {
                rows: ds.record_count(),
                categories: ds.summary().type_distribution.len(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        IngestionError::Excel(calamine::Error::Io(_)) => IngestionSeverity::Critical,
        #[cfg(feature = "excel")]
        IngestionError::Excel(_) => IngestionSeverity::Error,
        IngestionError::UnsupportedFormat { .. }
        | IngestionError::EmptyOrMissingDataRows
        | IngestionError::MissingRequiredColumn { .. }
        | IngestionError::MissingRequiredValue { .. } => IngestionSeverity::Error,
    }
}

fn resolve_format(path: &Path, options: &IngestionOptions) -> IngestionResult<IngestionFormat> {
    if let Some(format) = options.format {
        return Ok(format);
    }

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::UnsupportedFormat {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::UnsupportedFormat {
        message: format!(
            "extension '{ext}' is not one of csv, xls, xlsx ({})",
            path.display()
        ),
    })
}

fn parse_excel_dispatch(
    bytes: &[u8],
    sheet: &ExcelSheetSelection,
) -> IngestionResult<Vec<EquipmentRecord>> {
    // Avoid unused warnings when the feature is off.
    let _ = (bytes, sheet);

    #[cfg(feature = "excel")]
    {
        super::excel::parse_excel_records(bytes, sheet)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(IngestionError::UnsupportedFormat {
            message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

/// An owned ingestion job, e.g. for handing to a worker or [`crate::execution::ingest_batch`].
#[derive(Clone)]
pub struct IngestionRequest {
    /// Path to the uploaded file.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    pub fn new(path: impl Into<PathBuf>, options: IngestionOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self) -> IngestionResult<Dataset> {
        ingest_from_path(&self.path, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn extension_matching_is_case_insensitive() {
        assert_eq!(IngestionFormat::from_extension("CSV"), Some(IngestionFormat::Csv));
        assert_eq!(IngestionFormat::from_extension("Xlsx"), Some(IngestionFormat::Excel));
        assert_eq!(IngestionFormat::from_extension("xls"), Some(IngestionFormat::Excel));
        assert_eq!(IngestionFormat::from_extension("txt"), None);
        assert_eq!(IngestionFormat::from_extension("json"), None);
    }

    #[test]
    fn txt_is_rejected_before_parsing() {
        // Content would parse fine as CSV; the extension alone decides.
        let body = b"Name,Type\nA,Pump\n";
        let err = ingest_from_bytes("plant.txt", body, &IngestionOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn forced_format_overrides_extension() {
        let opts = IngestionOptions {
            format: Some(IngestionFormat::Csv),
            ..Default::default()
        };
        let ds = ingest_from_bytes("plant.txt", b"Name,Type\nA,Pump\n", &opts).unwrap();
        assert_eq!(ds.filename(), "plant.txt");
        assert_eq!(ds.record_count(), 1);
    }

    #[test]
    fn unsupported_format_is_error_severity() {
        let err = IngestionError::UnsupportedFormat {
            message: "x".to_string(),
        };
        assert_eq!(severity_for_error(&err), IngestionSeverity::Error);
        let io = IngestionError::from(std::io::Error::other("disk"));
        assert_eq!(severity_for_error(&io), IngestionSeverity::Critical);
    }
}

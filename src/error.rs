use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared across CSV and (optional) Excel ingestion. Use
/// [`IngestionError::kind`] when only the coarse failure class matters.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be opened or decoded (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Delimited-text reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The file extension (or forced format) is not one of the accepted upload formats.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// The file has a header row but no data rows, or no rows at all.
    #[error("file is empty or missing data rows")]
    EmptyOrMissingDataRows,

    /// No header cell maps to a required field.
    #[error("missing required column '{column}'. headers={headers:?}")]
    MissingRequiredColumn { column: String, headers: Vec<String> },

    /// A data row left a required field blank.
    #[error("missing required column '{column}' at row {row}")]
    MissingRequiredValue { row: usize, column: String },
}

/// Coarse classification of an [`IngestionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedFormat,
    EmptyOrMissingDataRows,
    MissingRequiredColumn,
    /// I/O-level failure reading or decoding the underlying file.
    FileRead,
}

impl IngestionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IngestionError::Io(_) | IngestionError::Csv(_) => ErrorKind::FileRead,
            #[cfg(feature = "excel")]
            IngestionError::Excel(_) => ErrorKind::FileRead,
            IngestionError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            IngestionError::EmptyOrMissingDataRows => ErrorKind::EmptyOrMissingDataRows,
            IngestionError::MissingRequiredColumn { .. }
            | IngestionError::MissingRequiredValue { .. } => ErrorKind::MissingRequiredColumn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, IngestionError};

    #[test]
    fn missing_value_is_classified_as_missing_column() {
        let err = IngestionError::MissingRequiredValue {
            row: 3,
            column: "Equipment Name".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::MissingRequiredColumn);
        assert!(err.to_string().contains("at row 3"));
    }

    #[test]
    fn io_errors_are_file_read() {
        let err = IngestionError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.kind(), ErrorKind::FileRead);
    }
}

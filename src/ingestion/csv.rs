//! Delimited-text (CSV) ingestion.

use std::path::Path;

use tracing::debug;

use crate::error::{IngestionError, IngestionResult};
use crate::types::EquipmentRecord;

use super::records::{finalize, HeaderProjection, RecordDraft};

/// Read and parse a CSV file into equipment records.
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> IngestionResult<Vec<EquipmentRecord>> {
    let bytes = std::fs::read(path)?;
    parse_csv_records(&bytes)
}

/// Parse CSV content into equipment records.
///
/// Rules:
///
/// - Lines end at CR, LF or CRLF; whitespace-only lines are skipped.
/// - The first remaining line is the header row; at least one data row must follow.
/// - Cells are split on every comma (quotes do not protect commas), trimmed, and one pair of
///   enclosing double quotes is removed.
/// - Data cells are matched to header cells by position. Missing trailing cells count as empty;
///   extra cells are ignored. When several headers map to one field, the last one wins.
/// - Numeric cells keep their leading number (`"12.5 m3/h"` → `12.5`); no number → `0.0`.
pub fn parse_csv_records(bytes: &[u8]) -> IngestionResult<Vec<EquipmentRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(bytes);
    parse_csv_from_reader(&mut rdr)
}

/// Parse records from an existing CSV reader.
///
/// The reader should be built with `has_headers(false)`: the header row is located here so that
/// leading blank lines are skipped consistently.
pub fn parse_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> IngestionResult<Vec<EquipmentRecord>> {
    let mut lines: Vec<(usize, Vec<String>)> = Vec::new();
    for result in rdr.byte_records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        let line_no = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(lines.len() + 1);
        let cells = record
            .iter()
            .map(|raw| clean_cell(&String::from_utf8_lossy(raw)))
            .collect();
        lines.push((line_no, cells));
    }

    if lines.len() < 2 {
        return Err(IngestionError::EmptyOrMissingDataRows);
    }

    let mut lines = lines.into_iter();
    let (_, header) = lines.next().ok_or(IngestionError::EmptyOrMissingDataRows)?;
    let projection = HeaderProjection::new(header)?;

    let mut rows: Vec<(usize, EquipmentRecord)> = Vec::new();
    for (line_no, cells) in lines {
        let mut draft = RecordDraft::default();
        for (idx, field) in projection.mapped() {
            draft.set_text(field, cells.get(idx).map_or("", String::as_str));
        }
        rows.push((line_no, draft.finish()));
    }

    debug!(rows = rows.len(), "parsed delimited rows");
    finalize(rows)
}

fn is_blank(record: &csv::ByteRecord) -> bool {
    match record.len() {
        0 => true,
        1 => record[0].trim_ascii().is_empty(),
        _ => false,
    }
}

fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    unquoted.to_owned()
}

#[cfg(test)]
mod tests {
    use super::clean_cell;

    #[test]
    fn clean_cell_strips_one_quote_pair() {
        assert_eq!(clean_cell("  \"Pump\" "), "Pump");
        assert_eq!(clean_cell("\"\"Pump\"\""), "\"Pump\"");
        assert_eq!(clean_cell("\"open"), "\"open");
        assert_eq!(clean_cell("\""), "\"");
        assert_eq!(clean_cell("plain"), "plain");
    }
}

#![cfg(feature = "excel")]

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use tracing::debug;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{EquipmentField, EquipmentRecord};

use super::records::{finalize, HeaderProjection, RecordDraft};
use super::unified::ExcelSheetSelection;

/// Ingest an Excel document (`.xlsx`, `.xls`) from disk into equipment records.
///
/// Behavior:
/// - Uses the first sheet unless `sheet` names one
/// - Treats the first non-empty row as the header row
/// - Reads every later non-blank row as one record, mapping headers through the alias table
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet: &ExcelSheetSelection,
) -> IngestionResult<Vec<EquipmentRecord>> {
    let mut workbook = open_workbook_auto(path)?;
    ingest_workbook(&mut workbook, sheet)
}

/// Parse an in-memory workbook. The container format is detected from the content.
pub fn parse_excel_records(
    bytes: &[u8],
    sheet: &ExcelSheetSelection,
) -> IngestionResult<Vec<EquipmentRecord>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    ingest_workbook(&mut workbook, sheet)
}

fn ingest_workbook<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet: &ExcelSheetSelection,
) -> IngestionResult<Vec<EquipmentRecord>> {
    let sheet_name = match sheet {
        ExcelSheetSelection::First => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or(IngestionError::EmptyOrMissingDataRows)?,
        ExcelSheetSelection::Sheet(name) => name.clone(),
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let records = ingest_sheet_range(&range)?;
    debug!(sheet = %sheet_name, rows = records.len(), "parsed worksheet rows");
    Ok(records)
}

fn ingest_sheet_range(range: &calamine::Range<Data>) -> IngestionResult<Vec<EquipmentRecord>> {
    // Row numbers reported to users are 1-based and relative to the sheet, not the used range.
    let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);

    let mut non_blank = range
        .rows()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|c| !is_blank_cell(c)));

    let (_, header_row) = non_blank
        .next()
        .ok_or(IngestionError::EmptyOrMissingDataRows)?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|c| cell_to_text(c).trim().to_string())
        .collect();

    let data_rows: Vec<(usize, &[Data])> = non_blank
        .map(|(idx0, row)| (first_row + idx0 + 1, row))
        .collect();
    if data_rows.is_empty() {
        return Err(IngestionError::EmptyOrMissingDataRows);
    }

    let projection = HeaderProjection::new(headers)?;

    let mut rows: Vec<(usize, EquipmentRecord)> = Vec::with_capacity(data_rows.len());
    for (user_row, cells) in data_rows {
        let mut draft = RecordDraft::default();
        for (idx, field) in projection.mapped() {
            match cells.get(idx) {
                Some(cell) => apply_cell(&mut draft, field, cell),
                None => draft.set_text(field, ""),
            }
        }
        rows.push((user_row, draft.finish()));
    }

    finalize(rows)
}

fn apply_cell(draft: &mut RecordDraft, field: EquipmentField, cell: &Data) {
    match cell {
        Data::Empty => draft.set_text(field, ""),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            draft.set_text(field, s.trim())
        }
        Data::Float(f) => draft.set_number(field, *f),
        Data::Int(i) => draft.set_number(field, *i as f64),
        Data::DateTime(dt) => draft.set_number(field, dt.as_f64()),
        Data::Bool(_) | Data::Error(_) => match field {
            EquipmentField::Name | EquipmentField::Category => {
                draft.set_text(field, cell_to_text(cell).trim())
            }
            _ => draft.set_number(field, 0.0),
        },
    }
}

fn is_blank_cell(c: &Data) -> bool {
    match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_to_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => "".to_string(),
    }
}

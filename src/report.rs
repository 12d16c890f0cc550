#![cfg(feature = "report")]

//! Spreadsheet report export (feature `report`).
//!
//! Layout of the single `Report` sheet:
//!
//! - title, file name and upload time
//! - summary table: total count and the three averages (2 decimals) with units
//! - the first [`REPORT_ROW_LIMIT`] equipment rows (1 decimal)

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::types::{Dataset, Metric};

/// Maximum number of equipment rows listed in a report.
pub const REPORT_ROW_LIMIT: usize = 20;

const SUMMARY_HEADER_ROW: u32 = 5;
const EQUIPMENT_TITLE_ROW: u32 = 11;

/// Render the report into an in-memory `.xlsx` file.
pub fn render_xlsx(dataset: &Dataset) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = build_workbook(dataset)?;
    workbook.save_to_buffer()
}

/// Render the report and write it to `path`.
pub fn write_xlsx(dataset: &Dataset, path: impl AsRef<Path>) -> Result<(), XlsxError> {
    let mut workbook = build_workbook(dataset)?;
    workbook.save(path.as_ref())
}

fn build_workbook(dataset: &Dataset) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Report")?;

    let bold = Format::new().set_bold();
    ws.set_column_width(0, 24)?;
    ws.set_column_width(1, 16)?;

    ws.write_string_with_format(0, 0, "Chemical Equipment Report", &bold)?;
    ws.write_string(1, 0, "File:")?;
    ws.write_string(1, 1, dataset.filename())?;
    ws.write_string(2, 0, "Uploaded:")?;
    ws.write_string(2, 1, dataset.timestamp().format("%Y-%m-%d %H:%M").to_string())?;

    if dataset.record_count() == 0 {
        ws.write_string(4, 0, "No equipment data found in this upload.")?;
        return Ok(workbook);
    }

    write_summary(ws, dataset, &bold)?;
    write_equipment(ws, dataset, &bold)?;
    Ok(workbook)
}

fn write_summary(ws: &mut Worksheet, dataset: &Dataset, bold: &Format) -> Result<(), XlsxError> {
    let two_dp = Format::new().set_num_format("0.00");
    let summary = dataset.summary();

    ws.write_string_with_format(SUMMARY_HEADER_ROW - 1, 0, "Summary Statistics", bold)?;
    for (col, label) in ["Metric", "Value", "Unit"].into_iter().enumerate() {
        ws.write_string_with_format(SUMMARY_HEADER_ROW, col as u16, label, bold)?;
    }

    let mut row = SUMMARY_HEADER_ROW + 1;
    ws.write_string(row, 0, "Total Count")?;
    ws.write_number(row, 1, summary.total_count as f64)?;

    for metric in Metric::ALL {
        row += 1;
        ws.write_string(row, 0, format!("Avg {}", capitalized(metric)))?;
        ws.write_number_with_format(row, 1, round2(summary.metric(metric).avg), &two_dp)?;
        ws.write_string(row, 2, metric.unit())?;
    }
    Ok(())
}

fn write_equipment(ws: &mut Worksheet, dataset: &Dataset, bold: &Format) -> Result<(), XlsxError> {
    let one_dp = Format::new().set_num_format("0.0");

    ws.write_string_with_format(EQUIPMENT_TITLE_ROW, 0, "Equipment Data (Top 20)", bold)?;
    let header_row = EQUIPMENT_TITLE_ROW + 1;
    for (col, label) in ["Name", "Type", "Flowrate", "Pressure", "Temp"].into_iter().enumerate() {
        ws.write_string_with_format(header_row, col as u16, label, bold)?;
    }

    for (i, rec) in dataset.records().iter().take(REPORT_ROW_LIMIT).enumerate() {
        let row = header_row + 1 + i as u32;
        ws.write_string(row, 0, &rec.name)?;
        ws.write_string(row, 1, &rec.category)?;
        ws.write_number_with_format(row, 2, rec.flowrate, &one_dp)?;
        ws.write_number_with_format(row, 3, rec.pressure, &one_dp)?;
        ws.write_number_with_format(row, 4, rec.temperature, &one_dp)?;
    }
    Ok(())
}

fn capitalized(metric: Metric) -> String {
    let name = metric.to_string();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

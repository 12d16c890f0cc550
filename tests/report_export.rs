#![cfg(feature = "excel_test_writer")]

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{TimeZone, Utc};

use chem_equip::report::{render_xlsx, REPORT_ROW_LIMIT};
use chem_equip::types::{Dataset, DatasetId, EquipmentRecord};

fn dataset(rows: usize) -> Dataset {
    let records = (0..rows)
        .map(|i| EquipmentRecord::new(format!("Unit-{i}"), "Pump", 10.0 + i as f64, 2.0, 50.0))
        .collect();
    Dataset::from_parts(
        DatasetId::new(),
        "plant.csv",
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
        records,
    )
}

fn report_sheet(ds: &Dataset) -> calamine::Range<Data> {
    let bytes = render_xlsx(ds).unwrap();
    let mut wb = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
    wb.worksheet_range("Report").unwrap()
}

fn text(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected text at ({row},{col}), got {other:?}"),
    }
}

fn number(range: &calamine::Range<Data>, row: u32, col: u32) -> f64 {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        other => panic!("expected number at ({row},{col}), got {other:?}"),
    }
}

#[test]
fn report_has_header_summary_and_rows() {
    let ds = dataset(3);
    let sheet = report_sheet(&ds);

    assert_eq!(text(&sheet, 0, 0), "Chemical Equipment Report");
    assert_eq!(text(&sheet, 1, 1), "plant.csv");
    assert_eq!(text(&sheet, 2, 1), "2026-03-14 09:30");

    assert_eq!(text(&sheet, 6, 0), "Total Count");
    assert_eq!(number(&sheet, 6, 1), 3.0);
    assert_eq!(text(&sheet, 7, 0), "Avg Flowrate");
    assert_eq!(number(&sheet, 7, 1), 11.0);
    assert_eq!(text(&sheet, 7, 2), "m3/h");
    assert_eq!(text(&sheet, 9, 0), "Avg Temperature");

    assert_eq!(text(&sheet, 12, 0), "Name");
    assert_eq!(text(&sheet, 13, 0), "Unit-0");
    assert_eq!(number(&sheet, 15, 2), 12.0);
}

#[test]
fn report_lists_at_most_twenty_rows() {
    let ds = dataset(REPORT_ROW_LIMIT + 5);
    let sheet = report_sheet(&ds);

    let last = 13 + REPORT_ROW_LIMIT as u32 - 1;
    assert_eq!(text(&sheet, last, 0), format!("Unit-{}", REPORT_ROW_LIMIT - 1));
    assert!(matches!(sheet.get_value((last + 1, 0)), None | Some(Data::Empty)));
}

#[test]
fn empty_dataset_report_says_so() {
    let ds = dataset(0);
    let sheet = report_sheet(&ds);
    assert_eq!(text(&sheet, 4, 0), "No equipment data found in this upload.");
}

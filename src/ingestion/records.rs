//! Format-independent record assembly shared by the CSV and Excel readers.
//!
//! Both readers resolve their header row into a [`HeaderProjection`], feed each row's cells
//! into a [`RecordDraft`], and hand the drafts to [`finalize`] for the all-or-nothing
//! validation pass.

use crate::error::{IngestionError, IngestionResult};
use crate::types::{EquipmentField, EquipmentRecord};

/// Header cell index → record field, resolved once per file.
#[derive(Debug, Clone)]
pub(crate) struct HeaderProjection {
    fields: Vec<Option<EquipmentField>>,
}

impl HeaderProjection {
    /// Resolve `headers` through the alias table.
    ///
    /// Fails if no header maps to the record name, since every row would then be rejected.
    pub(crate) fn new(headers: Vec<String>) -> IngestionResult<Self> {
        let fields: Vec<Option<EquipmentField>> = headers
            .iter()
            .map(|h| EquipmentField::from_header(h))
            .collect();

        if !fields.contains(&Some(EquipmentField::Name)) {
            return Err(IngestionError::MissingRequiredColumn {
                column: EquipmentField::Name.label().to_string(),
                headers,
            });
        }

        Ok(Self { fields })
    }

    /// Mapped columns as `(cell index, field)`, in column order.
    pub(crate) fn mapped(&self) -> impl Iterator<Item = (usize, EquipmentField)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .filter_map(|(idx, field)| field.map(|f| (idx, f)))
    }
}

/// A record under construction.
///
/// Cells are applied in column order and each one overwrites the field it maps to, so when
/// several columns map to the same field (e.g. both `Equipment Name` and `Name`), the last one
/// wins, even when its cell is empty.
#[derive(Debug, Default)]
pub(crate) struct RecordDraft {
    name: Option<String>,
    category: Option<String>,
    flowrate: Option<f64>,
    pressure: Option<f64>,
    temperature: Option<f64>,
}

impl RecordDraft {
    /// Apply a textual cell. Empty text resets the field to unset.
    pub(crate) fn set_text(&mut self, field: EquipmentField, raw: &str) {
        let present = !raw.is_empty();
        match field {
            EquipmentField::Name => self.name = present.then(|| raw.to_owned()),
            EquipmentField::Category => self.category = present.then(|| raw.to_owned()),
            EquipmentField::Flowrate => self.flowrate = present.then(|| coerce_number(raw)),
            EquipmentField::Pressure => self.pressure = present.then(|| coerce_number(raw)),
            EquipmentField::Temperature => self.temperature = present.then(|| coerce_number(raw)),
        }
    }

    /// Apply an already-numeric cell.
    #[cfg_attr(not(feature = "excel"), allow(dead_code))]
    pub(crate) fn set_number(&mut self, field: EquipmentField, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        match field {
            EquipmentField::Name | EquipmentField::Category => {
                self.set_text(field, &format_number(value))
            }
            EquipmentField::Flowrate => self.flowrate = Some(value),
            EquipmentField::Pressure => self.pressure = Some(value),
            EquipmentField::Temperature => self.temperature = Some(value),
        }
    }

    pub(crate) fn finish(self) -> EquipmentRecord {
        EquipmentRecord {
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            flowrate: self.flowrate.unwrap_or(0.0),
            pressure: self.pressure.unwrap_or(0.0),
            temperature: self.temperature.unwrap_or(0.0),
        }
    }
}

/// Text → number, reading the longest leading decimal literal (`"12.5 m3/h"` → `12.5`,
/// `"3atm"` → `3`). Leading whitespace is skipped; trailing text is ignored.
///
/// Input without a numeric prefix, and literals that overflow to infinity, silently become `0.0`.
pub(crate) fn coerce_number(raw: &str) -> f64 {
    let text = raw.trim_start();
    let len = float_prefix_len(text.as_bytes());
    text[..len]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Length of the `[+-]digits[.digits][(e|E)[+-]digits]` prefix of `b`, or 0 if there is none.
fn float_prefix_len(b: &[u8]) -> usize {
    let digits = |from: usize| b[from..].iter().take_while(|c| c.is_ascii_digit()).count();

    let mut i = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let int_digits = digits(i);
    i += int_digits;

    let mut frac_digits = 0;
    if b.get(i) == Some(&b'.') {
        frac_digits = digits(i + 1);
        i += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    // The exponent only counts when at least one digit follows it.
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits(j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

/// Render a numeric cell used as text (e.g. a numeric equipment tag).
#[cfg_attr(not(feature = "excel"), allow(dead_code))]
pub(crate) fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        (v as i64).to_string()
    } else {
        v.to_string()
    }
}

/// Validate the complete candidate set.
///
/// `rows` pairs each record with the 1-based row number it came from.
pub(crate) fn finalize(rows: Vec<(usize, EquipmentRecord)>) -> IngestionResult<Vec<EquipmentRecord>> {
    if rows.is_empty() {
        return Err(IngestionError::EmptyOrMissingDataRows);
    }

    if let Some((row, _)) = rows.iter().find(|(_, rec)| rec.name.is_empty()) {
        return Err(IngestionError::MissingRequiredValue {
            row: *row,
            column: EquipmentField::Name.label().to_string(),
        });
    }

    Ok(rows.into_iter().map(|(_, rec)| rec).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn headers(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn projection_ignores_unknown_headers() {
        let p = HeaderProjection::new(headers(&["Id", "Name", "Notes", "Flowrate"])).unwrap();
        let mapped: Vec<_> = p.mapped().collect();
        assert_eq!(
            mapped,
            vec![(1, EquipmentField::Name), (3, EquipmentField::Flowrate)]
        );
    }

    #[test]
    fn projection_requires_a_name_column() {
        let err = HeaderProjection::new(headers(&["Type", "Flowrate"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredColumn);
        assert!(err.to_string().contains("'Equipment Name'"));
    }

    #[test]
    fn last_mapped_column_wins() {
        let mut d = RecordDraft::default();
        d.set_text(EquipmentField::Name, "P-101");
        d.set_text(EquipmentField::Name, "P-102");
        d.set_text(EquipmentField::Flowrate, "4");
        d.set_number(EquipmentField::Flowrate, 9.0);
        let rec = d.finish();
        assert_eq!(rec.name, "P-102");
        assert_eq!(rec.flowrate, 9.0);
    }

    #[test]
    fn empty_later_cell_clears_the_field() {
        let mut d = RecordDraft::default();
        d.set_text(EquipmentField::Name, "P-101");
        d.set_text(EquipmentField::Name, "");
        d.set_text(EquipmentField::Pressure, "7");
        d.set_text(EquipmentField::Pressure, "");
        let rec = d.finish();
        assert_eq!(rec.name, "");
        assert_eq!(rec.pressure, 0.0);
    }

    #[test]
    fn coercion_reads_the_numeric_prefix() {
        assert_eq!(coerce_number("12.5 m3/h"), 12.5);
        assert_eq!(coerce_number("3atm"), 3.0);
        assert_eq!(coerce_number("  -4.25C"), -4.25);
        assert_eq!(coerce_number(".5bar"), 0.5);
        assert_eq!(coerce_number("5."), 5.0);
        assert_eq!(coerce_number("1e2"), 100.0);
        assert_eq!(coerce_number("2e"), 2.0);
        assert_eq!(coerce_number("2e+x"), 2.0);
        assert_eq!(coerce_number("1.5E-1kg"), 0.15);
        assert_eq!(coerce_number("0x10"), 0.0);
        assert_eq!(coerce_number("abc"), 0.0);
        assert_eq!(coerce_number("-"), 0.0);
        assert_eq!(coerce_number("."), 0.0);
    }

    #[test]
    fn coercion_maps_non_finite_to_zero() {
        assert_eq!(coerce_number("Infinity"), 0.0);
        assert_eq!(coerce_number("1e999"), 0.0);
    }

    #[test]
    fn numeric_name_cells_render_without_fraction() {
        let mut d = RecordDraft::default();
        d.set_number(EquipmentField::Name, 101.0);
        d.set_number(EquipmentField::Pressure, f64::NAN);
        let rec = d.finish();
        assert_eq!(rec.name, "101");
        assert_eq!(rec.pressure, 0.0);
    }

    #[test]
    fn finalize_rejects_empty_and_nameless() {
        assert!(matches!(
            finalize(Vec::new()),
            Err(IngestionError::EmptyOrMissingDataRows)
        ));

        let rows = vec![
            (2, EquipmentRecord::new("A", "Pump", 1.0, 1.0, 1.0)),
            (3, EquipmentRecord::new("", "Pump", 1.0, 1.0, 1.0)),
        ];
        match finalize(rows) {
            Err(IngestionError::MissingRequiredValue { row, .. }) => assert_eq!(row, 3),
            other => panic!("unexpected: {other:?}"),
        }
    }
}

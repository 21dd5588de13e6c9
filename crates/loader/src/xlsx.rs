// Excel import (xlsx, xls). Headers come from the first row of the first
// sheet; column types are inferred from the cells below them.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDate;
use tablechat_core::{Column, ColumnType, MAX_ROWS, MAX_UPLOAD_BYTES, Table, Value};

use crate::error::LoadError;

/// Result of loading one file out of an upload batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub name: String,
    pub result: Result<Table, LoadError>,
}

/// What a single cell contributes to its column's inferred type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Null,
    Int,
    Float,
    Date,
    Text,
}

/// Loads one uploaded spreadsheet into a [`Table`].
///
/// The first row of the first sheet is the header; every column's type is
/// inferred from its non-null cells (all integers → `Int`, all numeric →
/// `Float`, all spreadsheet dates → `Date`, anything mixed → `Text`).
/// Data rows past [`MAX_ROWS`] are dropped with a warning.
///
/// # Errors
/// Fails when the payload is oversized, has an unsupported extension, is not
/// a readable workbook, or has no header row. A failure concerns only this
/// file; batch callers keep going.
pub fn load_table(name: &str, bytes: &[u8]) -> Result<Table, LoadError> {
    if !has_supported_extension(name) {
        return Err(LoadError::UnsupportedExtension(name.to_owned()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(LoadError::TooLarge { bytes: bytes.len(), limit: MAX_UPLOAD_BYTES });
    }

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| LoadError::Open(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(LoadError::NoSheets)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::SheetRead { sheet: sheet_name.clone(), message: e.to_string() })?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| LoadError::EmptySheet(sheet_name.clone()))?;

    // Trailing empty header cells are layout noise, not columns.
    let mut names: Vec<String> = header.iter().map(header_text).collect();
    while names.last().is_some_and(String::is_empty) {
        names.pop();
    }
    if names.is_empty() {
        return Err(LoadError::EmptySheet(sheet_name));
    }
    let width = names.len();

    let mut data: Vec<&[Data]> = rows.collect();
    if data.len() > MAX_ROWS {
        tracing::warn!(
            file = name,
            rows = data.len(),
            limit = MAX_ROWS,
            "row limit exceeded, truncating"
        );
        data.truncate(MAX_ROWS);
    }

    let types: Vec<ColumnType> =
        (0..width).map(|col| infer_column_type(&data, col)).collect();
    let columns: Vec<Column> = names
        .into_iter()
        .zip(&types)
        .map(|(n, ty)| Column::new(n, *ty))
        .collect();

    let mut table = Table::new(columns)?;
    for row in &data {
        let cells: Vec<Value> = (0..width)
            .map(|col| convert_cell(row.get(col).unwrap_or(&Data::Empty), types[col]))
            .collect();
        table.push_row(cells)?;
    }

    tracing::info!(
        file = name,
        sheet = %sheet_name,
        rows = table.row_count(),
        columns = table.columns().len(),
        "loaded table"
    );
    Ok(table)
}

/// Loads every file of an upload batch independently.
///
/// One outcome per input, in input order. A malformed file yields an `Err`
/// outcome and never aborts the others.
pub fn load_batch<'a, I>(files: I) -> Vec<FileOutcome>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    files
        .into_iter()
        .map(|(name, bytes)| {
            let result = load_table(name, bytes);
            if let Err(ref e) = result {
                tracing::warn!(file = name, error = %e, "file load failed");
            }
            FileOutcome { name: name.to_owned(), result }
        })
        .collect()
}

fn has_supported_extension(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".xlsx") || lower.ends_with(".xls")
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_owned(),
        Data::Empty => String::new(),
        other => render_as_text(other),
    }
}

fn classify(cell: &Data) -> CellKind {
    match cell {
        Data::Empty => CellKind::Null,
        Data::Int(_) => CellKind::Int,
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                CellKind::Int
            } else {
                CellKind::Float
            }
        },
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellKind::Null
            } else if trimmed.parse::<i64>().is_ok() {
                CellKind::Int
            } else if trimmed.parse::<f64>().is_ok() {
                CellKind::Float
            } else {
                CellKind::Text
            }
        },
        Data::DateTime(_) => CellKind::Date,
        Data::DateTimeIso(s) => {
            if parse_iso_date(s).is_some() {
                CellKind::Date
            } else {
                CellKind::Text
            }
        },
        Data::Bool(_) | Data::Error(_) | Data::DurationIso(_) => CellKind::Text,
    }
}

fn infer_column_type(data: &[&[Data]], col: usize) -> ColumnType {
    let mut inferred: Option<ColumnType> = None;
    for row in data {
        let kind = classify(row.get(col).unwrap_or(&Data::Empty));
        let ty = match kind {
            CellKind::Null => continue,
            CellKind::Int => ColumnType::Int,
            CellKind::Float => ColumnType::Float,
            CellKind::Date => ColumnType::Date,
            CellKind::Text => ColumnType::Text,
        };
        inferred = Some(match inferred {
            Some(prev) => prev.widen(ty),
            None => ty,
        });
        if inferred == Some(ColumnType::Text) {
            break;
        }
    }
    // A column of only blanks carries no type evidence.
    inferred.unwrap_or(ColumnType::Text)
}

fn convert_cell(cell: &Data, ty: ColumnType) -> Value {
    if classify(cell) == CellKind::Null {
        return Value::Null;
    }
    match ty {
        ColumnType::Int => match cell {
            Data::Int(n) => Value::Int(*n),
            Data::Float(n) => Value::Int(*n as i64),
            Data::String(s) => s.trim().parse().map_or(Value::Null, Value::Int),
            _ => Value::Null,
        },
        ColumnType::Float => match cell {
            Data::Int(n) => Value::Float(*n as f64),
            Data::Float(n) => Value::Float(*n),
            Data::String(s) => s.trim().parse().map_or(Value::Null, Value::Float),
            _ => Value::Null,
        },
        ColumnType::Date => match cell {
            Data::DateTime(dt) => {
                dt.as_datetime().map_or(Value::Null, |ndt| Value::Date(ndt.date()))
            },
            Data::DateTimeIso(s) => parse_iso_date(s).map_or(Value::Null, Value::Date),
            _ => Value::Null,
        },
        ColumnType::Text => Value::Text(render_as_text(cell)),
    }
}

fn render_as_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_owned(),
        Data::Int(n) => n.to_string(),
        Data::Float(n) => {
            // Integral floats print without a trailing ".0".
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                n.to_string()
            }
        },
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_owned(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map_or_else(|| dt.as_f64().to_string(), |ndt| ndt.date().format("%Y-%m-%d").to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    fn sheet_bytes(build: impl FnOnce(&mut rust_xlsxwriter::Worksheet)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        build(workbook.add_worksheet());
        workbook.save_to_buffer().unwrap()
    }

    fn region_amount_bytes(rows: &[(&str, i64)]) -> Vec<u8> {
        sheet_bytes(|ws| {
            ws.write_string(0, 0, "Region").unwrap();
            ws.write_string(0, 1, "Amount").unwrap();
            for (i, (region, amount)) in rows.iter().enumerate() {
                let r = (i + 1) as u32;
                ws.write_string(r, 0, *region).unwrap();
                ws.write_number(r, 1, *amount as f64).unwrap();
            }
        })
    }

    #[test]
    fn test_load_basic_table() {
        let bytes = region_amount_bytes(&[("EMEA", 100), ("APAC", 250), ("AMER", 75)]);
        let table = load_table("fileA.xlsx", &bytes).unwrap();
        assert_eq!(table.column_names(), vec!["Region", "Amount"]);
        assert_eq!(table.columns()[0].ty, ColumnType::Text);
        assert_eq!(table.columns()[1].ty, ColumnType::Int);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows()[1][1], Value::Int(250));
    }

    #[test]
    fn test_float_column_inferred() {
        let bytes = sheet_bytes(|ws| {
            ws.write_string(0, 0, "Rate").unwrap();
            ws.write_number(1, 0, 0.5).unwrap();
            ws.write_number(2, 0, 2.0).unwrap();
        });
        let table = load_table("rates.xlsx", &bytes).unwrap();
        assert_eq!(table.columns()[0].ty, ColumnType::Float);
        assert_eq!(table.rows()[1][0], Value::Float(2.0));
    }

    #[test]
    fn test_mixed_column_falls_back_to_text() {
        let bytes = sheet_bytes(|ws| {
            ws.write_string(0, 0, "Grade").unwrap();
            ws.write_number(1, 0, 7.0).unwrap();
            ws.write_string(2, 0, "n/a").unwrap();
        });
        let table = load_table("grades.xlsx", &bytes).unwrap();
        assert_eq!(table.columns()[0].ty, ColumnType::Text);
        assert_eq!(table.rows()[0][0], Value::Text("7".into()));
        assert_eq!(table.rows()[1][0], Value::Text("n/a".into()));
    }

    #[test]
    fn test_numeric_strings_count_as_numbers() {
        let bytes = sheet_bytes(|ws| {
            ws.write_string(0, 0, "Count").unwrap();
            ws.write_string(1, 0, "12").unwrap();
            ws.write_string(2, 0, "34").unwrap();
        });
        let table = load_table("counts.xlsx", &bytes).unwrap();
        assert_eq!(table.columns()[0].ty, ColumnType::Int);
        assert_eq!(table.rows()[0][0], Value::Int(12));
    }

    #[test]
    fn test_date_column() {
        let fmt = Format::new().set_num_format("yyyy-mm-dd");
        let bytes = sheet_bytes(|ws| {
            ws.write_string(0, 0, "ReportDate").unwrap();
            let d1 = ExcelDateTime::from_ymd(2024, 3, 1).unwrap();
            let d2 = ExcelDateTime::from_ymd(2024, 4, 15).unwrap();
            ws.write_datetime_with_format(1, 0, &d1, &fmt).unwrap();
            ws.write_datetime_with_format(2, 0, &d2, &fmt).unwrap();
        });
        let table = load_table("dates.xlsx", &bytes).unwrap();
        assert_eq!(table.columns()[0].ty, ColumnType::Date);
        assert_eq!(
            table.rows()[1][0],
            Value::Date(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap())
        );
    }

    #[test]
    fn test_blank_cells_become_null() {
        let bytes = sheet_bytes(|ws| {
            ws.write_string(0, 0, "Region").unwrap();
            ws.write_string(0, 1, "Amount").unwrap();
            ws.write_string(1, 0, "EMEA").unwrap();
            ws.write_number(1, 1, 10.0).unwrap();
            ws.write_string(2, 0, "APAC").unwrap();
            // row 2 Amount left blank
        });
        let table = load_table("gaps.xlsx", &bytes).unwrap();
        assert_eq!(table.columns()[1].ty, ColumnType::Int);
        assert_eq!(table.rows()[1][1], Value::Null);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_table("data.csv", b"Region,Amount").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(_)));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let bytes = vec![0_u8; MAX_UPLOAD_BYTES + 1];
        let err = load_table("big.xlsx", &bytes).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { .. }));
    }

    #[test]
    fn test_corrupt_bytes_fail_to_open() {
        let err = load_table("broken.xlsx", b"this is not a zip container").unwrap_err();
        assert!(matches!(err, LoadError::Open(_)));
    }

    #[test]
    fn test_empty_sheet_rejected() {
        let bytes = sheet_bytes(|_ws| {});
        let err = load_table("empty.xlsx", &bytes).unwrap_err();
        assert!(matches!(err, LoadError::EmptySheet(_)));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let good_a = region_amount_bytes(&[("EMEA", 1)]);
        let good_b = region_amount_bytes(&[("APAC", 2)]);
        let bad = b"garbage".to_vec();
        let outcomes = load_batch(vec![
            ("a.xlsx", good_a.as_slice()),
            ("bad.xlsx", bad.as_slice()),
            ("b.xlsx", good_b.as_slice()),
        ]);
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        assert!(outcomes[2].result.is_ok());
        assert_eq!(outcomes[1].name, "bad.xlsx");
    }

    #[test]
    fn test_header_whitespace_trimmed() {
        let bytes = sheet_bytes(|ws| {
            ws.write_string(0, 0, " Region ").unwrap();
            ws.write_string(1, 0, "EMEA").unwrap();
        });
        let table = load_table("padded.xlsx", &bytes).unwrap();
        assert_eq!(table.column_names(), vec!["Region"]);
    }
}

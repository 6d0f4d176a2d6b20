// ============================================================
// SPREADSHEET DECODER
// ============================================================
// First sheet only, first row is the header, missing cells
// default to null

use std::fmt;
use std::io::{Cursor, Read, Seek};

use calamine::{Data, DataType, Range, Reader, Xls, Xlsx};

use super::{dedupe_columns, FormatHint};
use crate::domain::{DecodedTable, IngestError, Result, Row, Value};

/// Decode xlsx/xls bytes into rows and a column list
pub fn decode_spreadsheet(bytes: &[u8], hint: FormatHint) -> Result<DecodedTable> {
    let cursor = Cursor::new(bytes);
    let range = match hint {
        FormatHint::Xlsx => open_first_sheet::<_, Xlsx<_>>(cursor)?,
        FormatHint::Xls => open_first_sheet::<_, Xls<_>>(cursor)?,
        other => {
            return Err(IngestError::UnsupportedFormat(format!(
                "{:?} is not a spreadsheet format",
                other
            )));
        }
    };

    let mut row_iter = range.rows();
    let header_row = row_iter
        .next()
        .ok_or_else(|| IngestError::EmptyDataset("worksheet has no header row".to_string()))?;

    let columns = dedupe_columns(
        header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| header_name(cell, idx))
            .collect(),
    );

    let mut rows = Vec::new();
    for cells in row_iter {
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        let row: Row = columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let value = cells.get(idx).map(convert_cell).unwrap_or(Value::Null);
                (column.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(DecodedTable::new(rows, columns))
}

fn open_first_sheet<RS, R>(reader: RS) -> Result<Range<Data>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: fmt::Display,
{
    let mut workbook = R::new(reader)
        .map_err(|e| IngestError::Decode(format!("failed to open workbook: {}", e)))?;

    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IngestError::EmptyDataset("workbook has no worksheets".to_string()))?
        .map_err(|e| IngestError::Decode(format!("failed to read first worksheet: {}", e)))
}

fn header_name(cell: &Data, idx: usize) -> String {
    let name = cell
        .as_string()
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if name.is_empty() {
        format!("column_{}", idx + 1)
    } else {
        name
    }
}

fn convert_cell(cell: &Data) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Some(b) = cell.get_bool() {
        return Value::Bool(b);
    }
    if let Some(i) = cell.get_int() {
        return Value::Number(i as f64);
    }
    if let Some(f) = cell.get_float() {
        return Value::Number(f);
    }
    if let Some(s) = cell.get_string() {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        return Value::String(trimmed.to_string());
    }

    // Dates, durations, and error cells fall back to their text form
    cell.as_string()
        .map(Value::String)
        .unwrap_or_else(|| Value::String(format!("{}", cell)))
}

// ============================================================
// JSON DECODER
// ============================================================
// Accept a top-level array of flat objects; anything else is a
// shape error

use serde_json::Value as JsonValue;

use crate::domain::{DecodedTable, IngestError, Result, Row, Value};

/// Decode a JSON document into rows and a first-seen column list
pub fn decode_json(bytes: &[u8]) -> Result<DecodedTable> {
    let document: JsonValue = serde_json::from_slice(bytes)
        .map_err(|e| IngestError::Decode(format!("invalid JSON: {}", e)))?;

    let records = match document {
        JsonValue::Array(records) => records,
        other => {
            return Err(IngestError::Shape(format!(
                "expected a top-level array of objects, found {}",
                json_kind(&other)
            )));
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut rows: Vec<Row> = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let object = match record {
            JsonValue::Object(object) => object,
            other => {
                return Err(IngestError::Shape(format!(
                    "record {} is {}, expected an object",
                    index, // zero-based, matches the document order
                    json_kind(&other)
                )));
            }
        };

        let mut row = Row::with_capacity(object.len());
        for (key, value) in object {
            if !columns.contains(&key) {
                columns.push(key.clone());
            }
            row.insert(key, convert_scalar(value, index)?);
        }
        rows.push(row);
    }

    // Keys absent from a record are represented as null, never as a
    // different row shape
    for row in &mut rows {
        for column in &columns {
            row.entry(column.clone()).or_insert(Value::Null);
        }
    }

    Ok(DecodedTable::new(rows, columns))
}

fn convert_scalar(value: JsonValue, record_index: usize) -> Result<Value> {
    match value {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(b)),
        JsonValue::Number(n) => {
            let n = n.as_f64().ok_or_else(|| {
                IngestError::Decode(format!(
                    "record {}: number out of representable range",
                    record_index
                ))
            })?;
            Ok(Value::Number(n))
        }
        JsonValue::String(s) => Ok(Value::String(s)),
        nested => Err(IngestError::Shape(format!(
            "record {}: nested {} values are not supported",
            record_index,
            json_kind(&nested)
        ))),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

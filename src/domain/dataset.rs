// ============================================================
// DATASET TYPES
// ============================================================
// Data structures shared by the decoders, the inferencer, and
// the schema assembler

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::field::FieldDescriptor;

/// A single cell value.
///
/// Cells are a closed scalar union so every decoder produces the same
/// shape regardless of source format. Serializes transparently (a
/// `Number` holding a whole value is written as a JSON integer).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// Parse a string that fully reads as a numeric literal.
    ///
    /// Non-finite results ("nan", "inf") are rejected so free-text
    /// columns containing those words are not mistaken for numbers.
    pub fn parse_numeric_literal(raw: &str) -> Option<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => None,
        }
    }

    /// Convert a raw CSV cell into a typed value.
    ///
    /// Empty cells become `Null`; cells that parse cleanly as numeric
    /// literals become `Number`; everything else stays a string.
    pub fn from_csv_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Value::Null;
        }
        match Self::parse_numeric_literal(trimmed) {
            Some(n) => Value::Number(n),
            None => Value::String(trimmed.to_string()),
        }
    }

    /// Whether this cell carries no data (null or blank string)
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Whether the value is a number or a string that fully parses as one
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Number(_) => true,
            Value::String(s) => Self::parse_numeric_literal(s).is_some(),
            _ => false,
        }
    }

    /// The text form of the value, if it has one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            // Whole numbers round-trip as integers
            Value::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
        }
    }
}

/// A decoded record: column name to cell value
pub type Row = HashMap<String, Value>;

/// Output of the format decoders: rows plus the derived column list.
///
/// Invariant: `columns` is the union of keys observed across rows, in
/// first-seen order, with unique entries.
#[derive(Debug, Clone)]
pub struct DecodedTable {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
}

impl DecodedTable {
    pub fn new(rows: Vec<Row>, columns: Vec<String>) -> Self {
        Self { rows, columns }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// The assembled dataset handed to the visualization renderer.
///
/// Serializes to the renderer's expected input shape: a row array plus a
/// field-descriptor array. Built once per load and replaced wholesale by
/// the next load, never mutated in place.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetPayload {
    pub rows: Vec<Row>,
    pub fields: Vec<FieldDescriptor>,
}

// ============================================================
// SCHEMA ASSEMBLY
// ============================================================
// Zip decoded columns with inferred descriptors into the payload
// handed to the renderer

use crate::application::inference::TypeInferencer;
use crate::domain::{
    DatasetPayload, DecodedTable, FieldDescriptor, IngestConfig, IngestError, Result, Value,
};

/// Assembles the renderer payload from a decoded table
pub struct SchemaAssembler {
    inferencer: TypeInferencer,
}

impl SchemaAssembler {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            inferencer: TypeInferencer::new(config),
        }
    }

    /// Build the dataset payload: one descriptor per column, rows
    /// normalized to a shared key set.
    ///
    /// Pure over its input and deterministic given the same sample.
    /// Degenerate tables (no rows or no columns) are rejected before
    /// anything reaches the renderer.
    pub fn assemble(&self, table: &DecodedTable) -> Result<DatasetPayload> {
        if table.columns.is_empty() {
            return Err(IngestError::EmptyDataset(
                "no columns could be derived from the file".to_string(),
            ));
        }
        if table.rows.is_empty() {
            return Err(IngestError::EmptyDataset(
                "the file contains no data rows".to_string(),
            ));
        }

        let fields: Vec<FieldDescriptor> = table
            .columns
            .iter()
            .map(|column| {
                let (semantic_type, analytic_type) =
                    self.inferencer.classify(&table.rows, column);
                FieldDescriptor::new(
                    column.clone(),
                    display_name(column),
                    semantic_type,
                    analytic_type,
                )
            })
            .collect();

        let rows = table
            .rows
            .iter()
            .map(|row| {
                table
                    .columns
                    .iter()
                    .map(|column| {
                        let value = row.get(column).cloned().unwrap_or(Value::Null);
                        (column.clone(), value)
                    })
                    .collect()
            })
            .collect();

        Ok(DatasetPayload { rows, fields })
    }
}

/// Title-case a column name for display: underscores become spaces,
/// each word starts with a capital
pub fn display_name(column: &str) -> String {
    column
        .replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================
// FORMAT DECODERS
// ============================================================
// Turn raw file bytes into decoded rows, given a format hint

mod csv;
mod json;
mod xlsx;

pub use csv::CsvDecoder;
pub use json::decode_json;
pub use xlsx::decode_spreadsheet;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DecodedTable, IngestError, Result};

/// File format, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatHint {
    Csv,
    Json,
    Xlsx,
    Xls,
    Parquet,
}

impl FormatHint {
    /// Extensions accepted by the catalog and the loader
    pub fn supported_extensions() -> &'static [&'static str] {
        &["csv", "json", "xlsx", "xls", "parquet"]
    }

    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Ok(FormatHint::Csv),
            "json" => Ok(FormatHint::Json),
            "xlsx" => Ok(FormatHint::Xlsx),
            "xls" => Ok(FormatHint::Xls),
            "parquet" => Ok(FormatHint::Parquet),
            other => Err(IngestError::UnsupportedFormat(format!(
                "unsupported file extension '.{}' (supported: {})",
                other,
                Self::supported_extensions().join(", ")
            ))),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                IngestError::UnsupportedFormat(format!(
                    "file '{}' has no extension",
                    path.display()
                ))
            })?;
        Self::from_extension(ext)
    }
}

/// Decode raw file bytes into rows and a derived column list.
///
/// Rejects empty input before dispatching to a format decoder; every
/// failure is returned to the caller, never panicked.
pub fn decode(bytes: &[u8], hint: FormatHint) -> Result<DecodedTable> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyDataset("file is empty".to_string()));
    }

    let table = match hint {
        FormatHint::Csv => CsvDecoder::new().decode_auto_detect(bytes)?,
        FormatHint::Json => decode_json(bytes)?,
        FormatHint::Xlsx | FormatHint::Xls => decode_spreadsheet(bytes, hint)?,
        FormatHint::Parquet => {
            // Parquet loads are delegated to the pandas-backed host
            return Err(IngestError::UnsupportedFormat(
                "parquet decoding is not available in this build".to_string(),
            ));
        }
    };

    Ok(table)
}

/// Disambiguate repeated header names with a positional suffix so the
/// derived field ids stay unique.
///
/// The suffixed candidate is itself checked against every name taken so
/// far, so a literal `name_2` header can never collide with a generated
/// one.
pub(crate) fn dedupe_columns(raw: Vec<String>) -> Vec<String> {
    let mut seen: std::collections::HashSet<String> = std::collections::HashSet::new();
    let mut columns = Vec::with_capacity(raw.len());

    for name in raw {
        let mut candidate = name.clone();
        let mut suffix = 2;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{}_{}", name, suffix);
            suffix += 1;
        }
        columns.push(candidate);
    }

    columns
}

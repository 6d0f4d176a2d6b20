// ============================================================
// INGEST CONFIGURATION
// ============================================================
// Configuration values for decoding and type inference

use serde::{Deserialize, Serialize};

/// Configuration for dataset ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Number of leading rows sampled per column for type inference (default: 10)
    pub sample_rows: usize,

    /// Maximum accepted file size in megabytes (default: 100)
    pub max_file_size_mb: usize,

    /// Classify otherwise-nominal columns as temporal when the column
    /// name contains "date" or "time" (default: false).
    ///
    /// The upstream project shipped this as a second, independent
    /// heuristic that disagrees with value-pattern matching; it is
    /// opt-in here so deployments choose their behavior explicitly.
    pub use_name_hints: bool,

    /// Keyword set for ordinal detection (default: empty, disabled).
    ///
    /// When non-empty, a nominal column whose distinct sampled values
    /// all appear in this set (case-insensitive) is classified ordinal.
    pub ordinal_keywords: Vec<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            sample_rows: 10,
            max_file_size_mb: 100,
            use_name_hints: false,
            ordinal_keywords: Vec::new(),
        }
    }
}

impl IngestConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config matching the upstream name-hint code path
    pub fn with_name_hints() -> Self {
        Self {
            use_name_hints: true,
            ..Default::default()
        }
    }

    /// Config matching the upstream ordinal-keyword code path
    pub fn with_ordinal_keywords(keywords: Vec<String>) -> Self {
        Self {
            ordinal_keywords: keywords,
            ..Default::default()
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rows == 0 {
            return Err("sample_rows must be > 0".to_string());
        }
        if self.max_file_size_mb == 0 {
            return Err("max_file_size_mb must be > 0".to_string());
        }
        Ok(())
    }

    /// Size cap in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb as u64 * 1024 * 1024
    }
}

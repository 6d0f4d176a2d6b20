// ============================================================
// DATA CATALOG
// ============================================================
// Scan the data directory for loadable files and validate
// selections before they reach the decoders

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::decode::FormatHint;
use crate::domain::{IngestConfig, IngestError, Result};

/// One loadable file discovered in the data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,

    /// File name without the directory prefix
    pub name: String,

    pub format: FormatHint,

    pub size_bytes: u64,

    /// Human-readable size (e.g. "1.2 MB", "890.0 KB")
    pub size_display: String,

    pub modified: Option<DateTime<Utc>>,
}

/// Scan a directory for files with supported extensions, sorted by name.
///
/// Unsupported and hidden files are skipped, not errors; a missing or
/// unreadable directory is.
pub fn scan_data_directory(dir: &Path) -> Result<Vec<FileEntry>> {
    if !dir.is_dir() {
        return Err(IngestError::Io(format!(
            "data directory '{}' does not exist",
            dir.display()
        )));
    }

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(dir)? {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if !path.is_file() {
            continue;
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) if !name.starts_with('.') => name.to_string(),
            _ => continue,
        };

        let format = match FormatHint::from_path(&path) {
            Ok(format) => format,
            Err(_) => continue,
        };

        let metadata = dir_entry.metadata()?;
        let size_bytes = metadata.len();
        let modified = metadata
            .modified()
            .ok()
            .map(DateTime::<Utc>::from);

        entries.push(FileEntry {
            path,
            name,
            format,
            size_bytes,
            size_display: format_file_size(size_bytes),
            modified,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(dir = %dir.display(), count = entries.len(), "scanned data directory");

    Ok(entries)
}

/// Format a byte count in human-readable form
pub fn format_file_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} PB", size)
}

/// Check that a selected path exists, is a file, and has a supported
/// extension. Returns the format hint for the decode step.
pub fn validate_file_path(path: &Path) -> Result<FormatHint> {
    if !path.exists() {
        return Err(IngestError::Io(format!(
            "file '{}' does not exist",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(IngestError::Io(format!(
            "'{}' is not a regular file",
            path.display()
        )));
    }
    FormatHint::from_path(path)
}

/// Validate an uploaded file's name and size before decoding
pub fn validate_upload(
    filename: &str,
    size_bytes: u64,
    config: &IngestConfig,
) -> Result<FormatHint> {
    if filename.trim().is_empty() {
        return Err(IngestError::Validation("no file selected".to_string()));
    }

    let hint = FormatHint::from_path(Path::new(filename))?;

    if size_bytes == 0 {
        return Err(IngestError::EmptyDataset(format!(
            "uploaded file '{}' is empty",
            filename
        )));
    }
    if size_bytes > config.max_file_size_bytes() {
        return Err(IngestError::Validation(format!(
            "file '{}' is {} which exceeds the {} MB limit",
            filename,
            format_file_size(size_bytes),
            config.max_file_size_mb
        )));
    }

    Ok(hint)
}

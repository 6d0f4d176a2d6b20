use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IngestError {
    Internal(String),
    UnsupportedFormat(String),
    EmptyDataset(String),
    Decode(String),
    Shape(String),
    Validation(String),
    Io(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Internal(msg) => write!(f, "Internal error: {}", msg),
            IngestError::UnsupportedFormat(msg) => write!(f, "Unsupported format: {}", msg),
            IngestError::EmptyDataset(msg) => write!(f, "Empty dataset: {}", msg),
            IngestError::Decode(msg) => write!(f, "Decode error: {}", msg),
            IngestError::Shape(msg) => write!(f, "Shape error: {}", msg),
            IngestError::Validation(msg) => write!(f, "Validation error: {}", msg),
            IngestError::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

// Implement std::error::Error so the host can box and display the failure
impl std::error::Error for IngestError {}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

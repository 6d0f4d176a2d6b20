// ============================================================
// DOMAIN LAYER
// ============================================================
// Core types and value objects for dataset ingestion
// No I/O, no async, no external collaborators

pub mod config;
pub mod dataset;
pub mod error;
pub mod field;

pub use config::IngestConfig;
pub use dataset::{DatasetPayload, DecodedTable, Row, Value};
pub use error::{IngestError, Result};
pub use field::{AnalyticType, FieldDescriptor, SemanticType};

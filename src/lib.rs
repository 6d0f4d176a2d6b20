// ============================================================
// DATAWALKER
// ============================================================
// Dataset ingestion and schema inference for graphic-walker
// style renderers: decode a file, infer per-column semantic and
// analytic types, and hand the renderer `{rows, fields}`

mod application;
mod domain;
mod infrastructure;

pub use application::{DatasetLoader, LoadSession, LoadTicket, SchemaAssembler, TypeInferencer};
pub use domain::{
    AnalyticType, DatasetPayload, DecodedTable, FieldDescriptor, IngestConfig, IngestError,
    Result, Row, SemanticType, Value,
};
pub use infrastructure::catalog::{
    format_file_size, scan_data_directory, validate_file_path, validate_upload, FileEntry,
};
pub use infrastructure::config::ConfigService;
pub use infrastructure::decode::{decode, CsvDecoder, FormatHint};
pub use infrastructure::telemetry;

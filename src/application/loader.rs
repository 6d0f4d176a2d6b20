// ============================================================
// DATASET LOADER
// ============================================================
// Orchestrate validation, decoding, inference, and assembly for
// one file-selection event

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::application::schema::SchemaAssembler;
use crate::domain::{DatasetPayload, IngestConfig, IngestError, Result};
use crate::infrastructure::catalog::{validate_file_path, validate_upload};
use crate::infrastructure::decode::{decode, FormatHint};

/// Entry point the host UI calls when a user selects or uploads a file
pub struct DatasetLoader {
    config: IngestConfig,
    assembler: SchemaAssembler,
}

impl DatasetLoader {
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate().map_err(IngestError::Validation)?;
        let assembler = SchemaAssembler::new(config.clone());
        Ok(Self { config, assembler })
    }

    pub fn with_defaults() -> Self {
        Self {
            config: IngestConfig::default(),
            assembler: SchemaAssembler::new(IngestConfig::default()),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Decode and classify already-materialized bytes. Pure and
    /// synchronous; all failures come back as typed errors.
    pub fn load_bytes(&self, bytes: &[u8], hint: FormatHint) -> Result<DatasetPayload> {
        if bytes.len() as u64 > self.config.max_file_size_bytes() {
            return Err(IngestError::Validation(format!(
                "input of {} bytes exceeds the {} MB limit",
                bytes.len(),
                self.config.max_file_size_mb
            )));
        }

        let table = decode(bytes, hint)?;
        let payload = self.assembler.assemble(&table)?;

        debug!(
            rows = payload.rows.len(),
            fields = payload.fields.len(),
            format = ?hint,
            "dataset assembled"
        );
        Ok(payload)
    }

    /// Validate an upload's name and size, then decode its bytes
    pub fn load_upload(&self, filename: &str, bytes: &[u8]) -> Result<DatasetPayload> {
        let hint = validate_upload(filename, bytes.len() as u64, &self.config)?;
        self.load_bytes(bytes, hint)
    }

    /// Read and decode a file from disk. The read may suspend; the
    /// classification step stays synchronous.
    pub async fn load_path(&self, path: &Path) -> Result<DatasetPayload> {
        let hint = validate_file_path(path)?;
        let bytes = tokio::fs::read(path).await?;
        self.load_bytes(&bytes, hint)
    }
}

/// Ticket identifying one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Last-load-wins tracking across overlapping loads.
///
/// There is no cancellation: every started load runs to completion, but
/// only the most recently requested one may install its payload, so a
/// slow early decode never overwrites a newer selection.
#[derive(Default)]
pub struct LoadSession {
    next_ticket: AtomicU64,
    newest: AtomicU64,
    current: Mutex<Option<Arc<DatasetPayload>>>,
}

impl LoadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new load request, superseding all earlier ones
    pub fn begin(&self) -> LoadTicket {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        // fetch_max keeps `newest` monotonic under concurrent begins
        self.newest.fetch_max(ticket, Ordering::SeqCst);
        LoadTicket(ticket)
    }

    /// Install a completed payload if its ticket is still the newest.
    /// Stale results are discarded and `None` is returned.
    pub fn complete(
        &self,
        ticket: LoadTicket,
        payload: DatasetPayload,
    ) -> Option<Arc<DatasetPayload>> {
        // The staleness check must hold the install lock: checked before
        // it, a stale complete could pass and then overwrite a newer
        // payload installed in between
        let mut current = self.current.lock().expect("load session lock poisoned");
        if ticket.0 != self.newest.load(Ordering::SeqCst) {
            debug!(ticket = ticket.0, "discarding stale load result");
            return None;
        }

        let payload = Arc::new(payload);
        *current = Some(Arc::clone(&payload));
        Some(payload)
    }

    /// The most recently installed dataset, if any
    pub fn current(&self) -> Option<Arc<DatasetPayload>> {
        self.current
            .lock()
            .expect("load session lock poisoned")
            .clone()
    }
}

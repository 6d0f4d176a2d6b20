// ============================================================
// TELEMETRY
// ============================================================
// Subscriber setup is explicit and host-driven; the library never
// installs or patches a global logger on its own

use tracing_subscriber::EnvFilter;

use crate::domain::{IngestError, Result};

/// Install the tracing subscriber with the given filter directive
/// (e.g. "datawalker=debug"). Call once from the host at startup;
/// a second call reports the subscriber as already installed.
pub fn init(filter: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init()
        .map_err(|e| IngestError::Internal(format!("telemetry already initialized: {}", e)))
}

/// Install the subscriber honoring `RUST_LOG`, defaulting to warnings
pub fn init_from_env() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init()
        .map_err(|e| IngestError::Internal(format!("telemetry already initialized: {}", e)))
}

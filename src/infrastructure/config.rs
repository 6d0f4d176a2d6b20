// ============================================================
// CONFIG LOADING
// ============================================================
// Layer file and environment settings over the built-in defaults

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use crate::domain::{IngestConfig, IngestError, Result};

/// Environment variable prefix, e.g. `DATAWALKER_SAMPLE_ROWS=25`
const ENV_PREFIX: &str = "DATAWALKER_";

pub struct ConfigService;

impl ConfigService {
    /// Load config from `datawalker.toml` in the working directory plus
    /// the environment
    pub fn load() -> Result<IngestConfig> {
        Self::load_from(Path::new("datawalker.toml"))
    }

    /// Load config from a specific TOML file plus the environment.
    /// A missing file is fine; the defaults apply.
    pub fn load_from(path: &Path) -> Result<IngestConfig> {
        let config: IngestConfig = Figment::from(Serialized::defaults(IngestConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| IngestError::Validation(format!("invalid configuration: {}", e)))?;

        config.validate().map_err(IngestError::Validation)?;
        Ok(config)
    }
}

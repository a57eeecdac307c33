// Layered CredentialStore: optional config file, then environment

use async_trait::async_trait;
use config::{Config, Environment, File};
use relay_core::domain::AppCredentials;
use relay_core::error::{AppError, Result};
use relay_core::port::CredentialStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment prefix: `RELAY_APP_ID`, `RELAY_APP_SECRET`, `RELAY_GRAPH__API_BASE_URL`
pub const ENV_PREFIX: &str = "RELAY";

/// Build the layered settings source used by the whole process.
///
/// Later sources win: the file (if given, must exist) is overridden by
/// environment variables. Nested keys use `__` in variable names.
pub fn layered_config(file: Option<&Path>, env_prefix: &str) -> Result<Config> {
    let mut builder = Config::builder();
    if let Some(file) = file {
        debug!(path = %file.display(), "Loading configuration file");
        builder = builder.add_source(File::from(file).required(true));
    }
    builder
        .add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .map_err(|e| AppError::Config(format!("Failed to load configuration: {}", e)))
}

/// Expand `~` and environment variables in a configured path
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
    }
}

/// Reads `app_id` / `app_secret` from the layered configuration
pub struct LayeredCredentialStore {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl LayeredCredentialStore {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self::with_prefix(file, ENV_PREFIX)
    }

    pub fn with_prefix(file: Option<PathBuf>, env_prefix: impl Into<String>) -> Self {
        Self {
            file,
            env_prefix: env_prefix.into(),
        }
    }
}

#[async_trait]
impl CredentialStore for LayeredCredentialStore {
    async fn load(&self) -> Result<AppCredentials> {
        let settings = layered_config(self.file.as_deref(), &self.env_prefix)?;
        let credentials: AppCredentials = settings
            .try_deserialize()
            .map_err(|e| AppError::Config(format!("Invalid credentials configuration: {}", e)))?;

        info!(
            app_id = %credentials.app_id,
            has_secret = !credentials.app_secret.is_empty(),
            "Loaded app credentials"
        );
        Ok(credentials)
    }
}

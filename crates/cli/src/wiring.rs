//! Dependency wiring (composition root)

use anyhow::{Context, Result};
use relay_core::application::DistributionEngine;
use relay_core::port::time_provider::SystemTimeProvider;
use relay_core::port::BuiltinLocaleTable;
use relay_infra_graph::{GraphConfig, GraphDistributionApi};
use relay_infra_system::credential_store_impl::layered_config;
use relay_infra_system::{expand_path, LayeredCredentialStore, LocalContentRepository, ENV_PREFIX};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Read the optional `graph` section, falling back to defaults
pub fn load_graph_config(config_file: Option<&std::path::Path>) -> Result<GraphConfig> {
    let settings = layered_config(config_file, ENV_PREFIX)?;
    match settings.get::<GraphConfig>("graph") {
        Ok(graph) => Ok(graph),
        Err(config::ConfigError::NotFound(_)) => Ok(GraphConfig::default()),
        Err(e) => Err(e).context("Invalid [graph] configuration"),
    }
}

pub async fn build_engine(
    config_file: Option<PathBuf>,
    scratch_dir: &str,
) -> Result<DistributionEngine> {
    let graph_config = load_graph_config(config_file.as_deref())?;
    let scratch_dir = expand_path(scratch_dir);
    tokio::fs::create_dir_all(&scratch_dir)
        .await
        .with_context(|| format!("Failed to create scratch dir {}", scratch_dir.display()))?;

    info!(
        api_base_url = %graph_config.api_base_url,
        scratch_dir = %scratch_dir.display(),
        "Wiring distribution engine"
    );

    let api = GraphDistributionApi::new(graph_config)
        .map_err(|e| anyhow::anyhow!("HTTP client setup failed: {}", e))?;
    let credential_store = LayeredCredentialStore::new(config_file);

    let engine = DistributionEngine::configure(
        &credential_store,
        Arc::new(api),
        Arc::new(LocalContentRepository::new()),
        Arc::new(BuiltinLocaleTable),
        Arc::new(SystemTimeProvider),
        scratch_dir,
    )
    .await?;

    Ok(engine)
}

//! # Application State
//!
//! The shared application state (`AppState`) and the logic for building it
//! at startup: the resolved configuration plus the process-wide resource
//! store, synced once from disk before the server accepts requests.

use crate::config::AppConfig;
use promptsmith::ResourceStore;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml`.
    pub config: Arc<AppConfig>,
    /// The process-wide resource store over the authoritative directory.
    pub store: Arc<ResourceStore>,
}

/// Builds the shared application state from the configuration.
///
/// Ensures the resource directory exists and performs the initial sync so
/// the store reflects disk truth before the first request.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    std::fs::create_dir_all(&config.resources_dir)?;

    let store = ResourceStore::new(&config.resources_dir);
    let loaded = store.sync_from_disk().await?;
    info!(
        dir = %config.resources_dir,
        loaded, "Initialized resource store"
    );

    Ok(AppState {
        config: Arc::new(config),
        store: Arc::new(store),
    })
}

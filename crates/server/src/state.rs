//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::Credential;
use crate::store::{ProductStore, SettingsStore};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    products: ProductStore,
    settings: SettingsStore,
    credential: Credential,
}

impl AppState {
    /// Create the state from a loaded configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let products = ProductStore::new(config.products_path());
        let settings = SettingsStore::new(config.config_path());
        let credential = Credential::new(config.admin_pass.clone(), config.env_file.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                settings,
                credential,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// The product document.
    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    /// The config document.
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    /// The admin credential.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.inner.credential
    }
}

//! Config document storage (status, categories, theme).

use std::path::PathBuf;

use serde_json::Value;
use vending_kiosk_core::KioskConfig;

use super::{JsonFile, StoreError};

/// The persisted kiosk config.
#[derive(Debug)]
pub struct SettingsStore {
    file: JsonFile,
}

impl SettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Load the config with defaults applied.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file can't be read or isn't valid JSON.
    pub async fn load(&self) -> Result<KioskConfig, StoreError> {
        Ok(self
            .file
            .read()
            .await?
            .map_or_else(KioskConfig::default, |doc: Value| {
                KioskConfig::from_document(&doc)
            }))
    }

    /// Replace the whole config document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document can't be written.
    pub async fn replace(&self, config: &KioskConfig) -> Result<(), StoreError> {
        self.file.write(config).await?;
        tracing::info!(
            status = %config.status,
            categories = config.categories.len(),
            "kiosk config replaced"
        );
        Ok(())
    }
}

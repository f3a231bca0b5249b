//! The admin credential held in memory for the life of the process.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{Mutex, RwLock};
use vending_kiosk_core::{Pin, constant_time_eq};

use crate::store::env_file;

/// Shared admin PIN.
///
/// Replacing the PIN updates memory first and then writes it back to the
/// environment file. A failed write is logged and otherwise ignored, so the
/// new PIN is live but a restart may bring back the old one.
///
/// Replacements are serialized end to end, so the file always ends up
/// holding the PIN that is live in memory.
#[derive(Debug)]
pub struct Credential {
    pin: RwLock<SecretString>,
    env_file: PathBuf,
    replace_lock: Mutex<()>,
}

impl Credential {
    #[must_use]
    pub fn new(initial: SecretString, env_file: impl Into<PathBuf>) -> Self {
        Self {
            pin: RwLock::new(initial),
            env_file: env_file.into(),
            replace_lock: Mutex::new(()),
        }
    }

    /// Check a submitted PIN. An empty submission never matches.
    pub async fn verify(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let current = self.pin.read().await;
        constant_time_eq(candidate.as_bytes(), current.expose_secret().as_bytes())
    }

    /// Install a new PIN and persist it on a best-effort basis.
    pub async fn replace(&self, new_pin: Pin) {
        let _guard = self.replace_lock.lock().await;
        {
            let mut current = self.pin.write().await;
            *current = SecretString::from(new_pin.as_str());
        }
        tracing::info!("admin PIN changed");

        if let Err(e) = env_file::persist_admin_pass(&self.env_file, new_pin.as_str()).await {
            tracing::error!(
                error = %e,
                path = %self.env_file.display(),
                "failed to persist admin PIN; the change will not survive a restart"
            );
        }
    }
}

//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `KIOSK_HOST` - Bind address (default: 127.0.0.1)
//! - `KIOSK_PORT` - Listen port, falling back to `PORT` (default: 3000)
//! - `KIOSK_DATA_DIR` - Directory holding `products.json` and `config.json` (default: assets/data)
//! - `KIOSK_ENV_FILE` - Environment file the admin PIN is written back to (default: .env)
//! - `KIOSK_STATIC_DIR` - Directory served for non-API paths (default: none)
//! - `ADMIN_PASS` - Initial admin PIN (default: 000111)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use thiserror::Error;

/// PIN used when `ADMIN_PASS` is not set.
pub const DEFAULT_ADMIN_PASS: &str = "000111";

/// File name of the product document inside the data directory.
pub const PRODUCTS_FILE: &str = "products.json";

/// File name of the config document inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),

    #[error("Failed to load environment file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Kiosk server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the product and config documents
    pub data_dir: PathBuf,
    /// Environment file the admin PIN is persisted to
    pub env_file: PathBuf,
    /// Optional directory served for non-API paths
    pub static_dir: Option<PathBuf>,
    /// Admin PIN at startup
    pub admin_pass: SecretString,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present, then
    /// loads the file named by `KIOSK_ENV_FILE` so a PIN persisted there is
    /// picked up on restart. Variables already set in the process win.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that doesn't parse
    /// or the environment file exists but can't be read.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let env_file = PathBuf::from(get_env_or_default("KIOSK_ENV_FILE", ".env"));
        load_env_file(&env_file)?;

        let host = get_env_or_default("KIOSK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("KIOSK_HOST".to_string(), e.to_string()))?;
        let port = get_port()?;

        Ok(Self {
            host,
            port,
            data_dir: PathBuf::from(get_env_or_default("KIOSK_DATA_DIR", "assets/data")),
            env_file,
            static_dir: get_optional_env("KIOSK_STATIC_DIR").map(PathBuf::from),
            admin_pass: SecretString::from(get_env_or_default("ADMIN_PASS", DEFAULT_ADMIN_PASS)),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration rooted in `data_dir`, with every other setting at its default.
    ///
    /// The environment file lives next to the data documents. Used by tests
    /// and tools that run the API against a scratch directory.
    #[must_use]
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            env_file: data_dir.join(".env"),
            data_dir,
            static_dir: None,
            admin_pass: SecretString::from(DEFAULT_ADMIN_PASS),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the product document.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(PRODUCTS_FILE)
    }

    /// Path of the config document.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the listen port, preferring `KIOSK_PORT` over the generic `PORT`.
fn get_port() -> Result<u16, ConfigError> {
    let (key, value) = match std::env::var("KIOSK_PORT") {
        Ok(value) => ("KIOSK_PORT", value),
        Err(_) => ("PORT", get_env_or_default("PORT", "3000")),
    };
    value
        .parse::<u16>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Load `path` into the process environment; a missing file is not an error.
fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Err(e) if !e.not_found() => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            source: e,
        }),
        _ => Ok(()),
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

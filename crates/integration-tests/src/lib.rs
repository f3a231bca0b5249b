//! Integration tests for the vending kiosk.
//!
//! The server router runs in-process against a scratch data directory, so
//! no running server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vending-kiosk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog` - Public reads and defaults
//! - `admin` - Product and config saves
//! - `auth` - PIN checks and PIN changes
//! - `storefront` - Snapshots from the API driving a kiosk session

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use vending_kiosk_server::{AppState, ServerConfig, app};

/// PIN the harness starts with.
pub const TEST_PIN: &str = "000111";

/// A status code and the decoded body (`Value::String` for non-JSON bodies).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub request_id: Option<String>,
}

/// An in-process kiosk server over a temporary data directory.
pub struct TestKiosk {
    dir: TempDir,
    config: ServerConfig,
    router: Router,
}

impl TestKiosk {
    /// A kiosk with no data files.
    ///
    /// # Panics
    ///
    /// If the temporary directory can't be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = ServerConfig::for_data_dir(dir.path().join("data"));
        config.admin_pass = SecretString::from(TEST_PIN);
        Self::with_config(dir, config)
    }

    /// A kiosk built from `config`, which must point inside `dir`.
    #[must_use]
    pub fn with_config(dir: TempDir, config: ServerConfig) -> Self {
        let router = app(AppState::new(config.clone()));
        Self {
            dir,
            config,
            router,
        }
    }

    /// The scratch directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.config.products_path()
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config.config_path()
    }

    #[must_use]
    pub fn env_file(&self) -> &Path {
        &self.config.env_file
    }

    /// Write a raw data file.
    ///
    /// # Panics
    ///
    /// If the file can't be written.
    #[allow(clippy::expect_used)]
    pub fn seed(&self, path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create data dir");
        }
        std::fs::write(path, contents).expect("Failed to seed file");
    }

    /// Read a data file back as JSON; `None` if it doesn't exist.
    ///
    /// # Panics
    ///
    /// If the file exists but isn't JSON.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn read_json(path: &Path) -> Option<Value> {
        let raw = std::fs::read(path).ok()?;
        Some(serde_json::from_slice(&raw).expect("data file is not JSON"))
    }

    /// `GET path`.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(Request::get(path), Body::empty()).await
    }

    /// `POST path` with a JSON body and an optional admin PIN.
    pub async fn post(&self, path: &str, body: &Value, pin: Option<&str>) -> TestResponse {
        self.post_raw(path, &body.to_string(), pin).await
    }

    /// `POST path` with a raw body sent as JSON.
    pub async fn post_raw(&self, path: &str, body: &str, pin: Option<&str>) -> TestResponse {
        let mut builder = Request::post(path).header(header::CONTENT_TYPE, "application/json");
        if let Some(pin) = pin {
            builder = builder.header("X-Admin-Pass", pin);
        }
        self.send(builder, Body::from(body.to_owned())).await
    }

    #[allow(clippy::expect_used)]
    async fn send(&self, builder: axum::http::request::Builder, body: Body) -> TestResponse {
        let request = builder.body(body).expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse {
            status,
            body,
            request_id,
        }
    }
}

impl Default for TestKiosk {
    fn default() -> Self {
        Self::new()
    }
}

//! File-backed persistence for the kiosk.
//!
//! # Layout
//!
//! - `<data_dir>/products.json` - product list ([`products::ProductStore`])
//! - `<data_dir>/config.json` - status, categories and theme ([`settings::SettingsStore`])
//! - `<env_file>` - one `ADMIN_PASS=<pin>` line ([`env_file`])
//!
//! Documents are rewritten whole. Each write goes to a sibling temp file
//! that is then renamed over the target, and writes to one document are
//! serialized. Concurrent admins still race: the last write wins.

pub mod env_file;
pub mod products;
pub mod settings;

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

pub use products::ProductStore;
pub use settings::SettingsStore;

/// Errors reading or writing a backing file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A JSON document on disk.
#[derive(Debug)]
pub(crate) struct JsonFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFile {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document. A missing file is `Ok(None)`.
    pub(crate) async fn read(&self) -> Result<Option<Value>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Replace the document with `value`, pretty-printed.
    pub(crate) async fn write<T>(&self, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let mut body = serde_json::to_vec_pretty(value)?;
        body.push(b'\n');

        let _guard = self.write_lock.lock().await;
        write_atomically(&self.path, &body).await
    }
}

/// Write `contents` to a temp file next to `path`, then rename it into place.
pub(crate) async fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, contents).await.map_err(write_err)?;
    if let Err(source) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(source));
    }

    tracing::debug!(path = %path.display(), bytes = contents.len(), "document written");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("absent.json"));
        assert!(file.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("nested/doc.json"));

        file.write(&json!({"status": "live"})).await.unwrap();
        assert_eq!(file.read().await.unwrap(), Some(json!({"status": "live"})));

        let raw = std::fs::read_to_string(file.path()).unwrap();
        assert!(raw.contains("\n  \"status\""), "pretty-printed: {raw}");
        assert!(!dir.path().join("nested/doc.json.tmp").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_leave_one_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let file = std::sync::Arc::new(JsonFile::new(dir.path().join("doc.json")));
        let first: Vec<Value> = (0..2000).map(|i| json!({"id": format!("a-{i}")})).collect();
        let second: Vec<Value> = (0..500).map(|i| json!({"id": format!("b-{i}")})).collect();

        let (a, b) = tokio::join!(
            tokio::spawn({
                let file = std::sync::Arc::clone(&file);
                let first = first.clone();
                async move { file.write(&first).await }
            }),
            tokio::spawn({
                let file = std::sync::Arc::clone(&file);
                let second = second.clone();
                async move { file.write(&second).await }
            }),
        );
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        let stored = file.read().await.unwrap().unwrap();
        assert!(
            stored == Value::from(first) || stored == Value::from(second),
            "document is a mix of both writes"
        );
        assert!(!dir.path().join("doc.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_garbage_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFile::new(&path).read().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}

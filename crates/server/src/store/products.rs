//! Product document storage.

use std::path::PathBuf;

use serde_json::Value;
use vending_kiosk_core::Product;

use super::{JsonFile, StoreError};

/// The persisted product list.
#[derive(Debug)]
pub struct ProductStore {
    file: JsonFile,
}

impl ProductStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Load every product.
    ///
    /// A missing document is an empty catalog. Entries are coerced the same
    /// way admin saves are, so a hand-edited file with stray fields or
    /// string-typed numbers still loads. A document that isn't an array
    /// reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file can't be read or isn't valid JSON.
    pub async fn load(&self) -> Result<Vec<Product>, StoreError> {
        let Some(doc) = self.file.read().await? else {
            return Ok(Vec::new());
        };

        let Value::Array(entries) = doc else {
            tracing::warn!(path = %self.file.path().display(), "product document is not an array");
            return Ok(Vec::new());
        };

        Ok(entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Product::from_entry(entry, index))
            .collect())
    }

    /// Replace the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the document can't be written.
    pub async fn replace(&self, products: &[Product]) -> Result<(), StoreError> {
        self.file.write(products).await?;
        tracing::info!(count = products.len(), "product catalog replaced");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_missing_document_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProductStore::new(dir.path().join("products.json"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_overwrites_previous_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProductStore::new(dir.path().join("products.json"));

        let first = vec![
            Product::from_entry(&json!({"id": "a", "stock": 1}), 0),
            Product::from_entry(&json!({"id": "b", "stock": 2}), 1),
        ];
        store.replace(&first).await.unwrap();

        let second = vec![Product::from_entry(&json!({"id": "c", "stock": 3}), 0)];
        store.replace(&second).await.unwrap();

        assert_eq!(store.load().await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_load_coerces_hand_edited_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(
            &path,
            r#"[{"id": "cola", "title": "Cola", "price": "30", "stock": 4, "tags": ["cold"]}]"#,
        )
        .unwrap();

        let products = ProductStore::new(&path).load().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].category, "Misc");
        assert_eq!(products[0].stock, 4);
    }
}

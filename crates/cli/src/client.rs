//! HTTP client for the kiosk API.

use reqwest::{Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;
use vending_kiosk_core::{KioskConfig, Product, Theme};

/// Header carrying the admin PIN.
const ADMIN_PASS_HEADER: &str = "X-Admin-Pass";

/// Errors talking to the kiosk server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error body.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Whether the server rejected the PIN.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

/// Client for one kiosk server.
#[derive(Debug, Clone)]
pub struct KioskClient {
    client: Client,
    base: Url,
}

impl KioskClient {
    /// Create a client for the server at `base`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if `base` doesn't parse.
    pub fn new(base: &str) -> Result<Self, ClientError> {
        Ok(Self {
            client: Client::new(),
            base: Url::parse(base)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    /// Fetch the product snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server reports an error.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self.client.get(self.endpoint("/api/products")?).send().await?;
        read_json(response).await
    }

    /// Fetch the config snapshot.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server reports an error.
    #[instrument(skip(self))]
    pub async fn config(&self) -> Result<KioskConfig, ClientError> {
        let response = self.client.get(self.endpoint("/api/config")?).send().await?;
        read_json(response).await
    }

    /// Ask the server whether `pin` is the admin PIN.
    ///
    /// # Errors
    ///
    /// Returns error for transport failures and non-401 error responses.
    #[instrument(skip_all)]
    pub async fn check_pin(&self, pin: &str) -> Result<bool, ClientError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth")?)
            .json(&json!({ "pass": pin }))
            .send()
            .await?;

        match read_json::<Value>(response).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_unauthorized() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Replace the product list.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip_all, fields(count = products.len()))]
    pub async fn save_products(
        &self,
        pin: &SecretString,
        products: &[Product],
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint("/api/products")?)
            .header(ADMIN_PASS_HEADER, pin.expose_secret())
            .json(&json!({ "products": products }))
            .send()
            .await?;
        read_json::<Value>(response).await?;
        debug!("product list saved");
        Ok(())
    }

    /// Replace the config; returns the config as the server stored it.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip_all, fields(status = %status))]
    pub async fn save_config(
        &self,
        pin: &SecretString,
        status: &str,
        categories: &[String],
        theme: &Theme,
    ) -> Result<KioskConfig, ClientError> {
        #[derive(serde::Deserialize)]
        struct Saved {
            config: KioskConfig,
        }

        let response = self
            .client
            .post(self.endpoint("/api/config")?)
            .header(ADMIN_PASS_HEADER, pin.expose_secret())
            .json(&json!({ "status": status, "categories": categories, "theme": theme }))
            .send()
            .await?;
        let saved: Saved = read_json(response).await?;
        Ok(saved.config)
    }

    /// Change the admin PIN.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the server rejects it.
    #[instrument(skip_all)]
    pub async fn change_pin(&self, pin: &SecretString, new_pin: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .post(self.endpoint("/api/password")?)
            .header(ADMIN_PASS_HEADER, pin.expose_secret())
            .json(&json!({ "newPass": new_pin }))
            .send()
            .await?;
        read_json::<Value>(response).await?;
        Ok(())
    }
}

/// Decode a success body, or turn `{"error": ...}` into `ClientError::Api`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = body
        .get("error")
        .and_then(Value::as_str)
        .map_or_else(
            || status.canonical_reason().unwrap_or("Request failed").to_owned(),
            str::to_owned,
        );
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

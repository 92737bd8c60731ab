//! HTTP client for the back-office REST API
//!
//! Every call reads the bearer token from the token store at the moment
//! it is issued. Non-2xx responses become [`ClientError::Request`] with
//! the backend's `detail` string when present, otherwise the fallback
//! message supplied by the caller.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::storage::TokenStore;

/// Error body returned by the backend (`{"detail": "..."}`)
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// HTTP client trait
///
/// `fallback` is the human-readable message used when the backend does
/// not provide a detail string of its own.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ClientResult<T>;
    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        fallback: &str,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ClientResult<T>;
    /// POST without a body, response body ignored
    async fn post_empty(&self, path: &str, fallback: &str) -> ClientResult<()>;
    /// Form-encoded POST without authorization (login)
    async fn post_form<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        form: &B,
        fallback: &str,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ClientResult<T>;
    /// DELETE, response body ignored
    async fn delete(&self, path: &str, fallback: &str) -> ClientResult<()>;
    /// Store the bearer token is read from
    fn token_store(&self) -> Arc<dyn TokenStore>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, req: RequestBuilder) -> ClientResult<RequestBuilder> {
        Ok(match self.tokens.load()? {
            Some(token) => req.bearer_auth(token),
            None => req,
        })
    }

    /// Send the request and return the raw body of a 2xx response
    async fn execute(
        &self,
        req: RequestBuilder,
        method: &str,
        path: &str,
        fallback: &str,
    ) -> ClientResult<Vec<u8>> {
        tracing::debug!(method, path, "Sending request");
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail)
                .and_then(|d| d.as_str().map(str::to_string))
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| fallback.to_string());
            tracing::warn!(method, path, status = %status, "Request failed: {}", message);
            return Err(ClientError::Request { status, message });
        }

        Ok(body)
    }

    fn decode<T: DeserializeOwned>(path: &str, body: &[u8]) -> ClientResult<T> {
        serde_json::from_slice(body).map_err(|source| ClientError::Decode {
            context: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> ClientResult<T> {
        let req = self.authorized(self.client.get(self.url(path)))?;
        let body = self.execute(req, "GET", path, fallback).await?;
        Self::decode(path, &body)
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        fallback: &str,
    ) -> ClientResult<T> {
        let req = self.authorized(self.client.get(self.url(path)).query(query))?;
        let body = self.execute(req, "GET", path, fallback).await?;
        Self::decode(path, &body)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ClientResult<T> {
        let req = self.authorized(self.client.post(self.url(path)).json(body))?;
        let body = self.execute(req, "POST", path, fallback).await?;
        Self::decode(path, &body)
    }

    async fn post_empty(&self, path: &str, fallback: &str) -> ClientResult<()> {
        let req = self.authorized(self.client.post(self.url(path)))?;
        self.execute(req, "POST", path, fallback).await?;
        Ok(())
    }

    async fn post_form<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        form: &B,
        fallback: &str,
    ) -> ClientResult<T> {
        let req = self.client.post(self.url(path)).form(form);
        let body = self.execute(req, "POST", path, fallback).await?;
        Self::decode(path, &body)
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ClientResult<T> {
        let req = self.authorized(self.client.put(self.url(path)).json(body))?;
        let body = self.execute(req, "PUT", path, fallback).await?;
        Self::decode(path, &body)
    }

    async fn delete(&self, path: &str, fallback: &str) -> ClientResult<()> {
        let req = self.authorized(self.client.delete(self.url(path)))?;
        self.execute(req, "DELETE", path, fallback).await?;
        Ok(())
    }

    fn token_store(&self) -> Arc<dyn TokenStore> {
        self.tokens.clone()
    }
}

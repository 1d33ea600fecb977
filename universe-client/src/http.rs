//! HTTP transport
//!
//! [`HttpClient`] is the single seam between the client and the backend.
//! It moves raw JSON; decoding into entities happens once, in [`crate::api`].

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde_json::Value;
use shared::response::extract_message;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client trait
///
/// Paths are relative to the API root (`clubs/3`, not `/api/clubs/3`).
/// Non-2xx responses come back as typed [`ClientError`]s.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, path: &str) -> ClientResult<Value>;
    async fn post(&self, path: &str, body: &Value) -> ClientResult<Value>;
    async fn post_empty(&self, path: &str) -> ClientResult<Value>;
    async fn put(&self, path: &str, body: &Value) -> ClientResult<Value>;
    async fn delete(&self, path: &str) -> ClientResult<Value>;

    /// Bearer token attached to every subsequent request
    fn set_token(&self, token: Option<String>);
    fn token(&self) -> Option<String>;
}

/// Map a non-2xx response to a [`ClientError`]
///
/// The backend's own `message` wins; the status text is the fallback.
pub fn error_from_status(status: StatusCode, body: &str) -> ClientError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(extract_message)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty() && trimmed.len() <= 200 && !trimmed.starts_with('<'))
                .then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::CONFLICT => ClientError::Conflict(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ClientError::Timeout,
        _ => ClientError::Rejected {
            status: status.as_u16(),
            message,
        },
    }
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(config.token.clone())),
        })
    }

    /// Base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> ClientResult<Value> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Request rejected");
            return Err(error_from_status(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("body is not JSON: {}", e)))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get(&self, path: &str) -> ClientResult<Value> {
        tracing::debug!(path, "GET");
        self.send(self.client.get(self.url(path))).await
    }

    async fn post(&self, path: &str, body: &Value) -> ClientResult<Value> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn post_empty(&self, path: &str) -> ClientResult<Value> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path))).await
    }

    async fn put(&self, path: &str, body: &Value) -> ClientResult<Value> {
        tracing::debug!(path, "PUT");
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    async fn delete(&self, path: &str) -> ClientResult<Value> {
        tracing::debug!(path, "DELETE");
        self.send(self.client.delete(self.url(path))).await
    }

    fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

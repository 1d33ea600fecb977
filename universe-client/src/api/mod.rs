//! Typed backend API
//!
//! Every endpoint answers with the `{ success, message, <key> }` envelope.
//! [`Api`] decodes it once and hands back entities, so callers never look at
//! raw JSON. Endpoint groups live in the submodules as `impl Api` blocks.

mod admin;
mod announcements;
mod auth;
mod chatbot;
mod clubs;
mod events;
mod memberships;
mod payments;
mod upload;

pub use admin::AdminApi;
pub use payments::Confirmation;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::Envelope;

use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientError, ClientResult};

/// Typed client for the UniVerse REST API
#[derive(Clone)]
pub struct Api {
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for Api {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Api").finish_non_exhaustive()
    }
}

impl Api {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Network client built from configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(Arc::new(NetworkHttpClient::new(config)?)))
    }

    pub fn http(&self) -> &Arc<dyn HttpClient> {
        &self.http
    }

    pub(crate) fn set_token(&self, token: Option<String>) {
        self.http.set_token(token);
    }

    // ========== Envelope plumbing ==========

    /// Decode a 2xx body; `success: false` is a backend rejection
    pub(crate) fn accept(value: Value) -> ClientResult<Envelope> {
        if value.is_null() {
            return Ok(Envelope {
                success: true,
                ..Envelope::default()
            });
        }
        let envelope = Envelope::from_value(value)?;
        if !envelope.success {
            return Err(ClientError::Rejected {
                status: 200,
                message: envelope.message_or("Request failed"),
            });
        }
        Ok(envelope)
    }

    fn body<B: Serialize>(body: &B) -> ClientResult<Value> {
        Ok(serde_json::to_value(body)?)
    }

    pub(crate) async fn get_keyed<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> ClientResult<T> {
        let value = self.http.get(path).await?;
        Ok(Self::accept(value)?.take(key)?)
    }

    /// List endpoints; a missing key is an empty list
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> ClientResult<Vec<T>> {
        let value = self.http.get(path).await?;
        Ok(Self::accept(value)?.take_opt(key)?.unwrap_or_default())
    }

    pub(crate) async fn post_keyed<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        key: &str,
    ) -> ClientResult<T> {
        let value = self.http.post(path, &Self::body(body)?).await?;
        Ok(Self::accept(value)?.take(key)?)
    }

    pub(crate) async fn post_empty_keyed<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
    ) -> ClientResult<T> {
        let value = self.http.post_empty(path).await?;
        Ok(Self::accept(value)?.take(key)?)
    }

    pub(crate) async fn put_keyed<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        key: &str,
    ) -> ClientResult<T> {
        let value = self.http.put(path, &Self::body(body)?).await?;
        Ok(Self::accept(value)?.take(key)?)
    }

    /// DELETE; returns the backend's confirmation message
    pub(crate) async fn delete_ack(&self, path: &str) -> ClientResult<String> {
        let value = self.http.delete(path).await?;
        Ok(Self::accept(value)?.message_or("Deleted"))
    }
}

/// `path?k=v&...` with form-urlencoded values
pub(crate) fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("{}?{}", path, query)
}

//! EMUCON Client - Resource Client
//!
//! One async method per backend proxy endpoint. The client holds no state
//! besides the HTTP connection pool: it builds the URL, attaches query
//! parameters and JSON bodies, unwraps list envelopes and maps failures to
//! [`ClientError`]. Caching lives in `emucon-query`.

pub mod request;
pub mod services;

use std::time::Duration;

use emucon_core::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use request::{ApiPath, Call, Envelope, QueryParams};

#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
}

/// Connection settings for [`RestClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the backend proxy, e.g. `http://localhost:3001`.
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Clone, Debug)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientBuildError::BaseUrl {
                url: config.base_url.clone(),
                reason: "must start with http:// or https://".to_string(),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a call and return the parsed JSON body (`null` when empty).
    pub(crate) async fn send(&self, call: Call) -> ClientResult<Value> {
        let url = format!("{}{}", self.base_url, call.path.as_str());
        let mut request = self.client.request(call.method.clone(), url);
        if !call.query.is_empty() {
            request = request.query(call.query.pairs());
        }
        if let Some(body) = &call.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| transport(call.fallback, e))?;
        let status = response.status();
        tracing::debug!(
            method = %call.method,
            path = call.path.as_str(),
            status = status.as_u16(),
            "proxy request"
        );
        let text = response
            .text()
            .await
            .map_err(|e| transport(call.fallback, e))?;

        if !status.is_success() {
            return Err(request::error_from_response(
                status.as_u16(),
                &text,
                call.fallback,
            ));
        }
        request::parse_body(&text, call.fallback)
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, call: Call) -> ClientResult<T> {
        let fallback = call.fallback;
        let value = self.send(call).await?;
        request::decode(value, fallback)
    }

    pub(crate) async fn fetch_list<T: DeserializeOwned>(
        &self,
        call: Call,
        envelope: Envelope,
    ) -> ClientResult<Vec<T>> {
        let fallback = call.fallback;
        let value = self.send(call).await?;
        request::unwrap_list(value, envelope, fallback)
    }

    /// For endpoints whose success body carries nothing the console uses.
    pub(crate) async fn execute(&self, call: Call) -> ClientResult<()> {
        self.send(call).await.map(|_| ())
    }
}

fn transport(fallback: &str, err: reqwest::Error) -> ClientError {
    tracing::debug!(error = %err, "proxy request failed");
    ClientError::Transport {
        message: fallback.to_string(),
        cause: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = RestClient::new(&ClientConfig::new("http://localhost:3001/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn test_new_rejects_non_http_base_url() {
        let err = RestClient::new(&ClientConfig::new("localhost:3001")).unwrap_err();
        assert!(matches!(err, ClientBuildError::BaseUrl { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_transport_error_with_fallback() {
        let config = ClientConfig::new("http://127.0.0.1:1").with_timeout(Duration::from_secs(2));
        let client = RestClient::new(&config).unwrap();
        let err = client.list_tables().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
        assert_eq!(err.message(), "Failed to fetch tables");
    }
}

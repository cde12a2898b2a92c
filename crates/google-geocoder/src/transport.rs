//! HTTP transport used by the geocoder

use async_trait::async_trait;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = concat!("google-geocoder-rs/", env!("CARGO_PKG_VERSION"));

/// Error produced by a [`Transport`]
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// A fully read HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues a single GET request and returns the whole response.
///
/// Implementations should not retry and should not interpret the body;
/// failing to read the body counts as a transport failure.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with default settings
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Create a transport around an existing client (proxies, timeouts, TLS)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "Received geocoding response");

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        (**self).get(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_is_success() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let denied = HttpResponse {
            status: 403,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!denied.is_success());
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(DEFAULT_USER_AGENT.starts_with("google-geocoder-rs/"));
    }
}

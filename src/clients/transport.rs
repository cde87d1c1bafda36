//! The HTTP transport seam.
//!
//! [`HttpTransport`] performs exactly one HTTP exchange per call. The client
//! layers signing, retries and response parsing on top of it, so tests can
//! substitute a scripted transport and production code uses
//! [`ReqwestTransport`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::fmt::Debug;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a response, or to read one.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout or body read failure reported by reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Any other transport failure.
    #[error("Transport error: {0}")]
    Other(String),
}

/// Body of a raw response.
///
/// A streaming body is only read once the status check has passed, so
/// non-200 responses are never downloaded.
#[derive(Debug)]
pub enum ResponseBody {
    /// Body already in memory.
    Buffered(Vec<u8>),
    /// Body still on the wire.
    Streaming(reqwest::Response),
}

impl ResponseBody {
    /// Reads the whole body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the stream fails mid-read.
    pub async fn into_bytes(self) -> Result<Vec<u8>, TransportError> {
        match self {
            Self::Buffered(bytes) => Ok(bytes),
            Self::Streaming(response) => Ok(response.bytes().await?.to_vec()),
        }
    }
}

/// Status and body of one HTTP exchange.
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: ResponseBody,
}

impl RawResponse {
    /// Creates a response with an in-memory body.
    #[must_use]
    pub fn buffered(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: ResponseBody::Buffered(body.into()),
        }
    }

    /// Wraps a reqwest response without reading its body.
    #[must_use]
    pub fn from_reqwest(response: reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            body: ResponseBody::Streaming(response),
        }
    }
}

/// One HTTP exchange against a fully built URL.
#[async_trait]
pub trait HttpTransport: Send + Sync + Debug {
    /// Sends a GET request.
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;

    /// Sends a POST request with `body` of type `content_type`.
    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<RawResponse, TransportError>;
}

/// [`HttpTransport`] backed by a reqwest client using rustls.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a per-request `timeout` and `user_agent`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the TLS backend cannot be
    /// initialized.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        Ok(RawResponse::from_reqwest(response))
    }

    async fn post(
        &self,
        url: &str,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        Ok(RawResponse::from_reqwest(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_buffered_body_into_bytes() {
        let raw = RawResponse::buffered(200, "{}");
        assert_eq!(raw.status, 200);
        assert_eq!(raw.body.into_bytes().await.unwrap(), b"{}".to_vec());
    }

    #[test]
    fn test_reqwest_transport_builds() {
        let transport = ReqwestTransport::new(Duration::from_secs(10), "test-agent");
        assert!(transport.is_ok());
    }

    #[test]
    fn test_transport_error_messages() {
        let error = TransportError::Other("connection refused".to_string());
        assert_eq!(error.to_string(), "Transport error: connection refused");
    }
}

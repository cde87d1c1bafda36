//! HTTP client for Seller Center API communication.
//!
//! This module provides the [`ApiClient`] trait and its production
//! implementation, [`SellerCenterClient`], which signs requests, retries
//! transient failures and parses the response envelope.

use async_trait::async_trait;
use std::sync::Arc;

use crate::auth::{Clock, UrlBuilder};
use crate::clients::errors::HttpError;
use crate::clients::http_request::{ApiRequest, HttpMethod};
use crate::clients::http_response::{Response, ResponseBuilder};
use crate::clients::retry::{RetryPolicy, Sleep, TokioSleep};
use crate::clients::transport::{HttpTransport, ReqwestTransport, TransportError};
use crate::config::{ApiVersion, SellerCenterConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Content type of POST payloads.
pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Status that marks a response as "try again".
const SERVICE_UNAVAILABLE: u16 = 503;

/// Executes Seller Center requests.
///
/// Endpoint resources are generic over this trait so they can run against
/// [`SellerCenterClient`] or a scripted fake.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Sends `request` and returns the parsed response envelope.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no well-formed response could be obtained.
    /// An application-level error envelope is returned as
    /// [`Response::Error`], not as an error.
    async fn call(&self, request: ApiRequest) -> Result<Response, HttpError>;
}

/// Client for the Seller Center API.
///
/// Each call:
/// - builds a signed URL from the request parameters
/// - sends a GET, or a POST carrying the XML payload
/// - retries on a missing response or HTTP 503, sleeping
///   `(attempt - 1) * backoff_step` before each attempt
/// - parses the response envelope
///
/// # Thread Safety
///
/// `SellerCenterClient` is `Send + Sync` and cheap to clone; clones share the
/// underlying connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use seller_center::{ApiClient, ApiKey, BaseUrl, SellerCenterClient, SellerCenterConfig, UserId};
/// use seller_center::clients::ApiRequest;
///
/// let config = SellerCenterConfig::builder()
///     .base_url(BaseUrl::new("https://sellercenter-api.example.com/")?)
///     .user_id(UserId::new("seller@example.com")?)
///     .api_key(ApiKey::new("my-api-key")?)
///     .build()?;
///
/// let client = SellerCenterClient::new(&config)?;
/// let response = client.call(ApiRequest::get("GetBrands")).await?;
/// ```
#[derive(Clone, Debug)]
pub struct SellerCenterClient {
    transport: Arc<dyn HttpTransport>,
    url_builder: UrlBuilder,
    response_builder: ResponseBuilder,
    retry: RetryPolicy,
    sleeper: Arc<dyn Sleep>,
    api_version: ApiVersion,
}

// Verify SellerCenterClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SellerCenterClient>();
};

impl SellerCenterClient {
    /// Creates a client using a reqwest transport configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if the HTTP client cannot be created.
    pub fn new(config: &SellerCenterConfig) -> Result<Self, HttpError> {
        let transport = ReqwestTransport::new(config.timeout(), &Self::user_agent(config))
            .map_err(HttpError::Transport)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client sending requests through `transport`.
    #[must_use]
    pub fn with_transport(config: &SellerCenterConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            url_builder: UrlBuilder::from_config(config),
            response_builder: ResponseBuilder::new(),
            retry: config.retry().clone(),
            sleeper: Arc::new(TokioSleep),
            api_version: config.api_version(),
        }
    }

    /// Returns this client with `clock` as the source of request timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.url_builder = self.url_builder.with_clock(clock);
        self
    }

    /// Returns this client with `sleeper` used for retry backoff.
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleep>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    fn user_agent(config: &SellerCenterConfig) -> String {
        let prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        format!("{prefix}Seller Center SDK v{SDK_VERSION} | Rust {rust_version}")
    }
}

#[async_trait]
impl ApiClient for SellerCenterClient {
    async fn call(&self, mut request: ApiRequest) -> Result<Response, HttpError> {
        if request.explicit_version().is_none() {
            request.set_version(self.api_version);
        }

        let url = self.url_builder.build_url(request.request_params())?;
        let body = match request.method() {
            HttpMethod::Get => None,
            HttpMethod::Post => Some(request.post_body()),
        };

        if let Some(body) = &body {
            tracing::debug!(
                action = request.action(),
                bytes = body.len(),
                "Prepared Seller Center POST payload"
            );
        }

        let max_attempts = self.retry.max_attempts();
        let mut last_error: Option<TransportError> = None;

        for attempt in 1..=max_attempts {
            self.sleeper.sleep(self.retry.delay_before(attempt)).await;

            let outcome = match &body {
                None => self.transport.get(&url).await,
                Some(body) => {
                    self.transport
                        .post(&url, XML_CONTENT_TYPE, body.clone())
                        .await
                }
            };

            match outcome {
                Ok(raw) if raw.status == SERVICE_UNAVAILABLE => {
                    tracing::warn!(
                        action = request.action(),
                        method = %request.method(),
                        url = %url,
                        attempt,
                        status = raw.status,
                        "Seller Center unavailable, retrying"
                    );
                }
                Ok(raw) => {
                    tracing::info!(
                        action = request.action(),
                        method = %request.method(),
                        url = %url,
                        attempt,
                        status = raw.status,
                        "Seller Center request completed"
                    );
                    return self.response_builder.build_response(raw).await;
                }
                Err(error) => {
                    tracing::warn!(
                        action = request.action(),
                        method = %request.method(),
                        url = %url,
                        attempt,
                        error = %error,
                        "Seller Center request failed"
                    );
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.map_or(
            HttpError::EmptyResponse {
                tries: max_attempts,
            },
            HttpError::Transport,
        ))
    }
}

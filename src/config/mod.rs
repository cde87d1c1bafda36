//! Configuration types for the Seller Center SDK.
//!
//! This module provides the configuration used to construct a
//! [`SellerCenterClient`](crate::SellerCenterClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`SellerCenterConfig`]: The configuration struct holding all SDK settings
//! - [`SellerCenterConfigBuilder`]: A builder for constructing [`SellerCenterConfig`] instances
//! - [`BaseUrl`]: A validated absolute API endpoint URL
//! - [`UserId`]: A validated user id (an email address)
//! - [`ApiKey`]: A validated API key newtype with masked debug output
//! - [`ApiVersion`]: The default API version of requests
//!
//! # Example
//!
//! ```rust
//! use seller_center::{ApiKey, BaseUrl, SellerCenterConfig, UserId};
//!
//! let config = SellerCenterConfig::builder()
//!     .base_url(BaseUrl::new("https://sellercenter-api.example.com/").unwrap())
//!     .user_id(UserId::new("seller@example.com").unwrap())
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.user_id().as_ref(), "seller@example.com");
//! ```

mod newtypes;
mod version;

pub use newtypes::{ApiKey, BaseUrl, UserId};
pub use version::ApiVersion;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;
use std::time::Duration;

/// Default per-attempt HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Seller Center SDK.
///
/// This struct holds the endpoint, the credentials used to sign every
/// request, and the transport settings.
///
/// # Thread Safety
///
/// `SellerCenterConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use seller_center::{ApiKey, BaseUrl, SellerCenterConfig, UserId};
///
/// let config = SellerCenterConfig::builder()
///     .base_url(BaseUrl::new("https://sellercenter-api.example.com/").unwrap())
///     .user_id(UserId::new("seller@example.com").unwrap())
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .timeout(Duration::from_secs(30))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.timeout(), Duration::from_secs(30));
/// ```
#[derive(Clone, Debug)]
pub struct SellerCenterConfig {
    base_url: BaseUrl,
    user_id: UserId,
    api_key: ApiKey,
    api_version: ApiVersion,
    timeout: Duration,
    retry: RetryPolicy,
    user_agent_prefix: Option<String>,
}

impl SellerCenterConfig {
    /// Creates a new builder for constructing a `SellerCenterConfig`.
    #[must_use]
    pub fn builder() -> SellerCenterConfigBuilder {
        SellerCenterConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the user id sent as `UserID`.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the API key used to sign requests.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the default API version.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    /// Returns the per-attempt HTTP timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify SellerCenterConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SellerCenterConfig>();
};

/// Builder for constructing [`SellerCenterConfig`] instances.
///
/// Required fields are `base_url`, `user_id` and `api_key`.
///
/// # Defaults
///
/// - `api_version`: `1.0`
/// - `timeout`: 10 seconds
/// - `retry`: 5 attempts, 200 ms linear backoff step
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct SellerCenterConfigBuilder {
    base_url: Option<BaseUrl>,
    user_id: Option<UserId>,
    api_key: Option<ApiKey>,
    api_version: Option<ApiVersion>,
    timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
    user_agent_prefix: Option<String>,
}

impl SellerCenterConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user id (required).
    #[must_use]
    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the default API version.
    #[must_use]
    pub const fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets the per-attempt HTTP timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`SellerCenterConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url`, `user_id`
    /// or `api_key` are not set.
    pub fn build(self) -> Result<SellerCenterConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;
        let user_id = self
            .user_id
            .ok_or(ConfigError::MissingRequiredField { field: "user_id" })?;
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(SellerCenterConfig {
            base_url,
            user_id,
            api_key,
            api_version: self.api_version.unwrap_or_default(),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            retry: self.retry.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

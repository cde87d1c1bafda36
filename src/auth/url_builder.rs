//! Signed request URL construction.
//!
//! The [`UrlBuilder`] turns a request's parameters into the final URL:
//!
//! 1. `UserID` and `Timestamp` are added to the parameter set
//! 2. the set is percent-encoded into the canonical query (keys sorted by
//!    byte order, spaces as `%20`)
//! 3. the canonical query is signed with the API key
//! 4. `Signature` is appended as the last parameter
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//! use chrono::{TimeZone, Utc};
//! use seller_center::auth::{FixedClock, UrlBuilder};
//!
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2014, 11, 12, 11, 45, 26).unwrap());
//! let builder = UrlBuilder::new(
//!     "https://my-api.sc.net/",
//!     "abc@sellercenter.net",
//!     "1234567890",
//!     Arc::new(clock),
//! );
//!
//! let mut params = BTreeMap::new();
//! params.insert("Foo".to_string(), "bar".to_string());
//!
//! let url = builder.build_url(params).unwrap();
//! assert!(url.starts_with("https://my-api.sc.net/?Foo=bar&Timestamp="));
//! ```

use crate::auth::clock::{Clock, SystemClock};
use crate::auth::signature::sign;
use crate::config::SellerCenterConfig;
use chrono::SecondsFormat;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Query parameter carrying the user id.
pub const USER_ID_PARAM: &str = "UserID";
/// Query parameter carrying the request timestamp.
pub const TIMESTAMP_PARAM: &str = "Timestamp";
/// Query parameter carrying the request signature.
pub const SIGNATURE_PARAM: &str = "Signature";

/// Error returned when a signed URL cannot be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlBuildError {
    /// The configured base URL is not an absolute URL with a host.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },
}

/// Builds signed request URLs.
#[derive(Clone)]
pub struct UrlBuilder {
    base_url: String,
    user_id: String,
    api_key: String,
    clock: Arc<dyn Clock>,
}

impl UrlBuilder {
    /// Creates a URL builder from raw parts.
    ///
    /// The base URL is validated lazily by [`build_url`](Self::build_url).
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        user_id: impl Into<String>,
        api_key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: user_id.into(),
            api_key: api_key.into(),
            clock,
        }
    }

    /// Creates a URL builder from a configuration, using the system clock.
    #[must_use]
    pub fn from_config(config: &SellerCenterConfig) -> Self {
        Self::new(
            config.base_url().as_ref(),
            config.user_id().as_ref(),
            config.api_key().as_ref(),
            Arc::new(SystemClock),
        )
    }

    /// Returns a copy of this builder reading time from `clock`.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the signed URL for `params`.
    ///
    /// `UserID` and `Timestamp` are always set by the builder and replace any
    /// caller value under the same key. A caller supplied `Signature` is
    /// discarded. For a fixed clock the output is deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`UrlBuildError::InvalidBaseUrl`] if the base URL is not an
    /// absolute URL with a host.
    pub fn build_url(&self, mut params: BTreeMap<String, String>) -> Result<String, UrlBuildError> {
        let mut url = self.parse_base_url()?;

        params.remove(SIGNATURE_PARAM);
        params.insert(USER_ID_PARAM.to_string(), self.user_id.clone());
        params.insert(
            TIMESTAMP_PARAM.to_string(),
            self.clock.now().to_rfc3339_opts(SecondsFormat::Secs, true),
        );

        let canonical = canonical_query(&params);
        let signature = sign(&canonical, &self.api_key);

        url.set_query(Some(&format!("{canonical}&{SIGNATURE_PARAM}={signature}")));
        Ok(url.into())
    }

    fn parse_base_url(&self) -> Result<Url, UrlBuildError> {
        let url = Url::parse(&self.base_url).map_err(|e| UrlBuildError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;

        if !url.has_host() {
            return Err(UrlBuildError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "URL has no host".to_string(),
            });
        }

        Ok(url)
    }
}

impl fmt::Debug for UrlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlBuilder")
            .field("base_url", &self.base_url)
            .field("user_id", &self.user_id)
            .field("api_key", &"*****")
            .field("clock", &self.clock)
            .finish()
    }
}

/// Renders parameters as the canonical query string.
///
/// Keys come out in ascending byte order. Keys and values are percent-encoded
/// with everything but `A-Z a-z 0-9 - _ . ~` escaped, so a space is `%20`.
#[must_use]
pub fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

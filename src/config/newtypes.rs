//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;
use url::Url;

/// A validated Seller Center API key.
///
/// The key is the shared secret used to sign requests. It is never sent over
/// the wire, and its `Debug` output is masked to keep it out of logs.
///
/// # Example
///
/// ```rust
/// use seller_center::ApiKey;
///
/// let key = ApiKey::new("my-secret").unwrap();
/// assert_eq!(key.as_ref(), "my-secret");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated Seller Center user id.
///
/// Seller Center identifies API users by their email address, so the id must
/// be a bare, syntactically valid address (`local@domain`).
///
/// # Example
///
/// ```rust
/// use seller_center::UserId;
///
/// let user = UserId::new(" seller@example.com ").unwrap();
/// assert_eq!(user.as_ref(), "seller@example.com");
///
/// assert!(UserId::new("seller").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserId(String);

impl UserId {
    /// Creates a new validated user id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUserId`] if the value is not an email address.
    pub fn new(user_id: impl Into<String>) -> Result<Self, ConfigError> {
        let user_id = user_id.into().trim().to_string();

        if !Self::is_valid_email(&user_id) {
            return Err(ConfigError::InvalidUserId { user_id });
        }

        Ok(Self(user_id))
    }

    fn is_valid_email(value: &str) -> bool {
        let Some((local, domain)) = value.rsplit_once('@') else {
            return false;
        };

        if local.is_empty() || domain.is_empty() || local.len() > 64 {
            return false;
        }

        if value
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '(' | ')' | ',' | ';' | '"'))
        {
            return false;
        }

        // Local part may not contain another '@' and may not have empty dot-atoms
        if local.contains('@') || local.split('.').any(str::is_empty) {
            return false;
        }

        domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-')
        })
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated absolute base URL of the Seller Center API.
///
/// # Example
///
/// ```rust
/// use seller_center::BaseUrl;
///
/// let url = BaseUrl::new("https://sellercenter-api.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://sellercenter-api.example.com/");
///
/// assert!(BaseUrl::new("").is_err());
/// assert!(BaseUrl::new("/api").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL cannot be parsed as
    /// an absolute URL with a host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();

        match Url::parse(&url) {
            Ok(parsed) if parsed.has_host() => Ok(Self(url)),
            Ok(_) => Err(ConfigError::InvalidBaseUrl {
                url,
                reason: "URL has no host".to_string(),
            }),
            Err(e) => Err(ConfigError::InvalidBaseUrl {
                url,
                reason: e.to_string(),
            }),
        }
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

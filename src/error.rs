//! Error types for the Seller Center SDK.
//!
//! This module contains the error type used for configuration and validation
//! failures. Transport, decoding and endpoint errors live next to the code that
//! produces them (see [`crate::clients`] and [`crate::resources`]).
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid credential is reported to the caller instead of aborting the process.
//!
//! # Example
//!
//! ```rust
//! use seller_center::{ConfigError, UserId};
//!
//! let result = UserId::new("not-an-email");
//! assert!(matches!(result, Err(ConfigError::InvalidUserId { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide the Seller Center API key of your user.")]
    EmptyApiKey,

    /// The user id is not a syntactically valid email address.
    #[error("Invalid user id '{user_id}'. Seller Center user ids are email addresses (e.g., 'seller@example.com').")]
    InvalidUserId {
        /// The invalid user id that was provided.
        user_id: String,
    },

    /// The base URL is not an absolute URL.
    #[error("Invalid base URL '{url}': {reason}. Please provide an absolute URL (e.g., 'https://sellercenter-api.example.com/').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected '1.0' or '2.0'.")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

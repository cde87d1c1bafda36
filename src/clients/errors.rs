//! Error types for the client layer.
//!
//! # Error Handling
//!
//! - [`DecodeError`]: the response body could not be decoded
//! - [`HttpError`]: unified error returned by [`ApiClient::call`](crate::ApiClient::call)
//!
//! An application-level `ErrorResponse` from Seller Center is *not* an error
//! at this layer: it is returned as [`Response::Error`](crate::Response::Error).
//!
//! # Example
//!
//! ```rust,ignore
//! use seller_center::{ApiClient, HttpError};
//!
//! match client.call(request).await {
//!     Ok(response) if response.is_error() => { /* application error */ }
//!     Ok(response) => { /* decode the body */ }
//!     Err(HttpError::UnexpectedStatus { code }) => println!("HTTP {code}"),
//!     Err(HttpError::EmptyResponse { tries }) => println!("gave up after {tries}"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use thiserror::Error;

use crate::auth::UrlBuildError;
use crate::clients::transport::TransportError;
use crate::clients::xml::XmlError;

/// Error raised while decoding a response.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A required key is missing from the response envelope.
    #[error("Key path not found in response: {path}")]
    KeyPathNotFound {
        /// Dotted path of the missing key, e.g. `SuccessResponse.Body`.
        path: String,
    },

    /// The payload is not valid JSON or does not match the expected shape.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value that cannot be interpreted.
    #[error("Invalid value for '{field}': {reason}")]
    Value {
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl DecodeError {
    /// Shorthand for [`DecodeError::KeyPathNotFound`].
    #[must_use]
    pub fn missing(path: impl Into<String>) -> Self {
        Self::KeyPathNotFound { path: path.into() }
    }
}

/// Unified error type for a Seller Center call.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The signed URL could not be built.
    #[error(transparent)]
    Url(#[from] UrlBuildError),

    /// The request payload is invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] XmlError),

    /// The server answered with a status other than 200.
    #[error("Unexpected HTTP status {code}")]
    UnexpectedStatus {
        /// The HTTP status code.
        code: u16,
    },

    /// Every attempt ended without a usable response.
    #[error("Empty response after {tries} attempts")]
    EmptyResponse {
        /// The number of attempts made.
        tries: u32,
    },

    /// The last attempt failed to obtain a response.
    #[error(transparent)]
    Transport(TransportError),

    /// The response body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(TransportError),

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

//! Response types for the Seller Center SDK.
//!
//! Every HTTP 200 answer from Seller Center is a JSON object holding exactly
//! one envelope:
//!
//! ```json
//! { "SuccessResponse": { "Head": { ... }, "Body": ... } }
//! { "ErrorResponse":   { "Head": { ... }, "Body": "" } }
//! ```
//!
//! [`ResponseBuilder`] turns a [`RawResponse`] into a [`Response`], keeping
//! the head decoded and the body as a raw JSON span so endpoint code can
//! decode only what it needs.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

use crate::clients::errors::{DecodeError, HttpError};
use crate::clients::transport::RawResponse;
use crate::model::codec::lenient_string;

const SUCCESS_ENVELOPE: &str = "SuccessResponse";
const ERROR_ENVELOPE: &str = "ErrorResponse";
const HEAD: &str = "Head";
const BODY: &str = "Body";

/// Head of a `SuccessResponse` envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SuccessHead {
    /// Server-side id of the request. Write calls return it as their handle.
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub request_id: String,
    /// The action that was executed.
    pub request_action: String,
    /// Kind of payload in the body.
    pub response_type: String,
    /// Server timestamp, as sent.
    pub timestamp: String,
}

/// Head of an `ErrorResponse` envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ErrorHead {
    /// The action that failed.
    pub request_action: String,
    /// Error category, e.g. `Sender` or `Platform`.
    pub error_type: String,
    /// Application error code.
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub error_code: String,
    /// Human readable message.
    pub error_message: String,
}

/// Application-level error reported by Seller Center.
///
/// # Example
///
/// ```rust
/// use seller_center::ApiResponseError;
///
/// let error = ApiResponseError {
///     code: "5".to_string(),
///     message: "E005: Invalid Request Format".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: E005: Invalid Request Format");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ApiResponseError {
    /// The `ErrorCode` from the response head.
    pub code: String,
    /// The `ErrorMessage` from the response head.
    pub message: String,
}

impl From<&ErrorHead> for ApiResponseError {
    fn from(head: &ErrorHead) -> Self {
        Self {
            code: head.error_code.clone(),
            message: head.error_message.clone(),
        }
    }
}

/// A decoded `SuccessResponse` envelope.
#[derive(Clone, Debug)]
pub struct SuccessResponse {
    head: SuccessHead,
    head_raw: Box<RawValue>,
    body_raw: Box<RawValue>,
}

impl SuccessResponse {
    /// Builds a success response from a head and the raw JSON of its body.
    ///
    /// Useful for fake clients in tests.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] if `body_json` is not valid JSON.
    pub fn new(head: SuccessHead, body_json: &str) -> Result<Self, DecodeError> {
        let head_raw = RawValue::from_string(serde_json::to_string(&head)?)?;
        let body_raw = RawValue::from_string(body_json.to_string())?;
        Ok(Self {
            head,
            head_raw,
            body_raw,
        })
    }

    /// Returns the decoded head.
    #[must_use]
    pub const fn head(&self) -> &SuccessHead {
        &self.head
    }

    /// Returns the head as raw JSON.
    #[must_use]
    pub fn head_raw(&self) -> &str {
        self.head_raw.get()
    }

    /// Returns the body as raw JSON.
    #[must_use]
    pub fn body_raw(&self) -> &str {
        self.body_raw.get()
    }

    /// Decodes the whole body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] if the body does not match `T`.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        Ok(serde_json::from_str(self.body_raw.get())?)
    }

    /// Decodes the top-level body field `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or the body is not an object.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] if the field is present but does not match `T`.
    pub fn body_field<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        let Value::Object(mut fields) = serde_json::from_str::<Value>(self.body_raw.get())? else {
            return Ok(None);
        };

        fields
            .remove(key)
            .map(serde_json::from_value)
            .transpose()
            .map_err(DecodeError::from)
    }

    /// Returns `true` if the body is `""`, `null`, `{}` or `[]`.
    #[must_use]
    pub fn body_is_empty(&self) -> bool {
        match serde_json::from_str::<Value>(self.body_raw.get()) {
            Ok(Value::Null) => true,
            Ok(Value::String(s)) => s.is_empty(),
            Ok(Value::Object(map)) => map.is_empty(),
            Ok(Value::Array(items)) => items.is_empty(),
            _ => false,
        }
    }
}

/// A decoded `ErrorResponse` envelope.
#[derive(Clone, Debug)]
pub struct ErrorResponse {
    head: ErrorHead,
    head_raw: Box<RawValue>,
}

impl ErrorResponse {
    /// Returns the decoded head.
    #[must_use]
    pub const fn head(&self) -> &ErrorHead {
        &self.head
    }

    /// Returns the head as raw JSON.
    #[must_use]
    pub fn head_raw(&self) -> &str {
        self.head_raw.get()
    }

    /// Converts the head into an [`ApiResponseError`].
    #[must_use]
    pub fn to_error(&self) -> ApiResponseError {
        ApiResponseError::from(&self.head)
    }
}

/// A Seller Center response: success or application error.
#[derive(Clone, Debug)]
pub enum Response {
    /// A `SuccessResponse` envelope.
    Success(SuccessResponse),
    /// An `ErrorResponse` envelope.
    Error(ErrorResponse),
}

impl Response {
    /// Returns `true` for an `ErrorResponse` envelope.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the head as raw JSON.
    #[must_use]
    pub fn head_raw(&self) -> &str {
        match self {
            Self::Success(success) => success.head_raw(),
            Self::Error(error) => error.head_raw(),
        }
    }

    /// Returns the body as raw JSON. Error responses have no body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success(success) => Some(success.body_raw()),
            Self::Error(_) => None,
        }
    }

    /// Converts into the success envelope, or the application error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiResponseError`] for an `ErrorResponse` envelope.
    pub fn into_result(self) -> Result<SuccessResponse, ApiResponseError> {
        match self {
            Self::Success(success) => Ok(success),
            Self::Error(error) => Err(error.to_error()),
        }
    }
}

/// Turns raw HTTP responses into [`Response`] values.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// Creates a response builder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds a [`Response`] from a raw HTTP response.
    ///
    /// Only status 200 is accepted; the body of any other status is never read.
    ///
    /// # Errors
    ///
    /// - [`HttpError::UnexpectedStatus`] for a status other than 200
    /// - [`HttpError::BodyRead`] if the body cannot be read
    /// - [`HttpError::Decode`] if the body is not a well-formed envelope
    pub async fn build_response(&self, raw: RawResponse) -> Result<Response, HttpError> {
        if raw.status != 200 {
            return Err(HttpError::UnexpectedStatus { code: raw.status });
        }

        let bytes = raw.body.into_bytes().await.map_err(HttpError::BodyRead)?;
        Ok(self.parse_body(&bytes)?)
    }

    /// Parses the bytes of a 200 response body.
    ///
    /// An `ErrorResponse` envelope takes precedence. Otherwise
    /// `SuccessResponse`, its `Head` and its `Body` must all be present.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] for malformed JSON and
    /// [`DecodeError::KeyPathNotFound`] for a missing envelope key.
    pub fn parse_body(&self, bytes: &[u8]) -> Result<Response, DecodeError> {
        let mut envelope: HashMap<String, Box<RawValue>> = serde_json::from_slice(bytes)?;

        if let Some(error) = envelope.remove(ERROR_ENVELOPE) {
            let mut parts = Self::split(&error)?;
            let head_raw = parts
                .remove(HEAD)
                .ok_or_else(|| DecodeError::missing(format!("{ERROR_ENVELOPE}.{HEAD}")))?;
            let head: ErrorHead = serde_json::from_str(head_raw.get())?;

            tracing::debug!(
                action = %head.request_action,
                code = %head.error_code,
                "Seller Center returned an error envelope"
            );
            return Ok(Response::Error(ErrorResponse { head, head_raw }));
        }

        let success = envelope
            .remove(SUCCESS_ENVELOPE)
            .ok_or_else(|| DecodeError::missing(SUCCESS_ENVELOPE))?;
        let mut parts = Self::split(&success)?;
        let head_raw = parts
            .remove(HEAD)
            .ok_or_else(|| DecodeError::missing(format!("{SUCCESS_ENVELOPE}.{HEAD}")))?;
        let body_raw = parts
            .remove(BODY)
            .ok_or_else(|| DecodeError::missing(format!("{SUCCESS_ENVELOPE}.{BODY}")))?;
        let head: SuccessHead = serde_json::from_str(head_raw.get())?;

        Ok(Response::Success(SuccessResponse {
            head,
            head_raw,
            body_raw,
        }))
    }

    fn split(raw: &RawValue) -> Result<HashMap<String, Box<RawValue>>, DecodeError> {
        Ok(serde_json::from_str(raw.get())?)
    }
}

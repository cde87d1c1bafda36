//! Request types for the Seller Center SDK.
//!
//! This module provides the [`ApiRequest`] type describing one API call: the
//! action, HTTP method, version, query parameters and an optional XML payload.

use std::collections::BTreeMap;
use std::fmt;

use crate::clients::xml::{render_document, XmlElement};
use crate::config::ApiVersion;

/// Query parameter naming the API action.
pub const ACTION_PARAM: &str = "Action";
/// Query parameter carrying the API version.
pub const VERSION_PARAM: &str = "Version";
/// Query parameter selecting the response format.
pub const FORMAT_PARAM: &str = "Format";
/// The only response format the SDK requests.
pub const FORMAT_JSON: &str = "JSON";
/// Root element of every POST payload.
pub const PAYLOAD_ROOT: &str = "Request";

/// HTTP methods used by the Seller Center API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET: read calls, parameters only.
    Get,
    /// HTTP POST: write calls, parameters plus an XML body.
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A request to be sent to the Seller Center API.
///
/// # Example
///
/// ```rust
/// use seller_center::clients::{ApiRequest, HttpMethod};
///
/// let request = ApiRequest::new("GetOrder", HttpMethod::Get)
///     .with_param("OrderId", "42");
///
/// let params = request.request_params();
/// assert_eq!(params["Action"], "GetOrder");
/// assert_eq!(params["Format"], "JSON");
/// assert_eq!(params["Version"], "1.0");
/// assert_eq!(params["OrderId"], "42");
/// assert!(request.post_body().is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    action: String,
    method: HttpMethod,
    version: Option<ApiVersion>,
    params: BTreeMap<String, String>,
    payload: Vec<XmlElement>,
}

impl ApiRequest {
    /// Creates a request for `action` with no parameters and no payload.
    #[must_use]
    pub fn new(action: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            action: action.into(),
            method,
            version: None,
            params: BTreeMap::new(),
            payload: Vec::new(),
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(action: impl Into<String>) -> Self {
        Self::new(action, HttpMethod::Get)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(action: impl Into<String>) -> Self {
        Self::new(action, HttpMethod::Post)
    }

    /// Returns the action name.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the API version, `1.0` unless set.
    #[must_use]
    pub fn version(&self) -> ApiVersion {
        self.version.unwrap_or_default()
    }

    /// Returns the version if one was set explicitly.
    #[must_use]
    pub const fn explicit_version(&self) -> Option<ApiVersion> {
        self.version
    }

    /// Sets the API version.
    pub fn set_version(&mut self, version: ApiVersion) {
        self.version = Some(version);
    }

    /// Returns a copy of this request targeting `version`.
    #[must_use]
    pub fn with_version(mut self, version: ApiVersion) -> Self {
        self.set_version(version);
        self
    }

    /// Sets a query parameter. Setting a key twice keeps the last value.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Returns a copy of this request with the parameter set.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(key, value);
        self
    }

    /// Returns the caller supplied parameters.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Replaces the XML payload.
    pub fn set_payload(&mut self, payload: Vec<XmlElement>) {
        self.payload = payload;
    }

    /// Returns a copy of this request carrying `payload`.
    #[must_use]
    pub fn with_payload(mut self, payload: Vec<XmlElement>) -> Self {
        self.set_payload(payload);
        self
    }

    /// Returns the XML payload elements.
    #[must_use]
    pub fn payload(&self) -> &[XmlElement] {
        &self.payload
    }

    /// Returns the full parameter set sent with the request.
    ///
    /// `Action`, `Version` and `Format=JSON` are always present and replace
    /// caller values under the same keys.
    #[must_use]
    pub fn request_params(&self) -> BTreeMap<String, String> {
        let mut params = self.params.clone();
        params.insert(ACTION_PARAM.to_string(), self.action.clone());
        params.insert(VERSION_PARAM.to_string(), self.version().to_string());
        params.insert(FORMAT_PARAM.to_string(), FORMAT_JSON.to_string());
        params
    }

    /// Returns the serialized POST body.
    ///
    /// Empty when the request carries no payload. Otherwise the XML
    /// declaration, a newline and the payload wrapped in `<Request>`.
    #[must_use]
    pub fn post_body(&self) -> Vec<u8> {
        if self.payload.is_empty() {
            return Vec::new();
        }
        render_document(PAYLOAD_ROOT, &self.payload).into_bytes()
    }
}

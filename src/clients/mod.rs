//! Client layer for Seller Center API communication.
//!
//! This module provides the request model, the retrying client and the
//! response envelope parser.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiClient`]: The trait endpoint resources call through
//! - [`SellerCenterClient`]: The production client
//! - [`ApiRequest`]: One API call (action, method, version, parameters, payload)
//! - [`XmlElement`] / [`XmlText`]: POST payload nodes
//! - [`Response`]: A success or error envelope
//! - [`ResponseBuilder`]: Status gate and envelope parser
//! - [`HttpTransport`]: The single-exchange HTTP seam
//! - [`RetryPolicy`] / [`Sleep`]: Retry count, backoff step and the sleeper
//!
//! # Retry Behavior
//!
//! A call is attempted up to `max_attempts` times (default 5). Before attempt
//! `i` the client sleeps `(i - 1) * backoff_step` (default 200 ms). Only a
//! missing response (connection failure, timeout) or HTTP 503 is retried.
//! When attempts run out the last transport error is returned, or
//! [`HttpError::EmptyResponse`] if every attempt ended in a 503.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod retry;
mod transport;
mod xml;

pub use errors::{DecodeError, HttpError};
pub use http_client::{ApiClient, SellerCenterClient, SDK_VERSION, XML_CONTENT_TYPE};
pub use http_request::{
    ApiRequest, HttpMethod, ACTION_PARAM, FORMAT_JSON, FORMAT_PARAM, PAYLOAD_ROOT, VERSION_PARAM,
};
pub use http_response::{
    ApiResponseError, ErrorHead, ErrorResponse, Response, ResponseBuilder, SuccessHead,
    SuccessResponse,
};
pub use retry::{RetryPolicy, Sleep, TokioSleep, DEFAULT_BACKOFF_STEP, DEFAULT_MAX_ATTEMPTS};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport, ResponseBody, TransportError};
pub use xml::{render_document, XmlContent, XmlElement, XmlError, XmlText, XML_HEADER};

//! Request authentication for the Seller Center API.
//!
//! Seller Center authenticates calls with a signed query string rather than a
//! header or token. This module holds the pieces of that scheme:
//!
//! - [`sign`] / [`verify`]: HMAC-SHA256 over the canonical query
//! - [`UrlBuilder`]: adds `UserID`, `Timestamp` and the trailing `Signature`
//! - [`Clock`]: the injectable time source used for `Timestamp`

mod clock;
mod signature;
mod url_builder;

pub use clock::{Clock, FixedClock, SystemClock};
pub use signature::{sign, verify};
pub use url_builder::{
    canonical_query, UrlBuildError, UrlBuilder, SIGNATURE_PARAM, TIMESTAMP_PARAM, USER_ID_PARAM,
};

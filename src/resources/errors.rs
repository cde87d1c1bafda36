//! Error types for endpoint operations.
//!
//! # Error Handling
//!
//! Every resource method returns [`ResourceError`]:
//!
//! - [`ResourceError::Http`]: the call itself failed (network, status, envelope)
//! - [`ResourceError::Api`]: Seller Center answered with an `ErrorResponse`
//! - [`ResourceError::Warnings`]: a write call was accepted with warnings
//! - [`ResourceError::Decode`]: the body did not match the expected model
//! - [`ResourceError::NotFound`]: a single-entity lookup came back empty
//!
//! # Example
//!
//! ```rust,ignore
//! use seller_center::resources::{OrderResource, ResourceError};
//!
//! match OrderResource::new(&client).get_order(42).await {
//!     Ok(order) => println!("{}", order.order_number),
//!     Err(ResourceError::NotFound { entity }) => println!("no {entity}"),
//!     Err(ResourceError::Api(e)) => println!("rejected: {e}"),
//!     Err(e) => println!("{e}"),
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::clients::{ApiResponseError, DecodeError, HttpError, XmlError};
use crate::model::codec::lenient_string;

/// One warning from a write call's `WarningDetail`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Warning {
    /// The field the warning is about.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
    /// The offending value.
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub value: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field \"{}\": {} ({})", self.field, self.message, self.value)
    }
}

/// Warnings returned by an accepted write call.
///
/// Displays one line per warning.
///
/// # Example
///
/// ```rust
/// use seller_center::resources::{ApiWarningError, Warning};
///
/// let error = ApiWarningError::new(vec![Warning {
///     field: "Price".to_string(),
///     message: "Must be positive".to_string(),
///     value: "-1".to_string(),
/// }]);
/// assert_eq!(error.to_string(), "Field \"Price\": Must be positive (-1)");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiWarningError {
    warnings: Vec<Warning>,
}

impl ApiWarningError {
    /// Wraps a list of warnings.
    #[must_use]
    pub const fn new(warnings: Vec<Warning>) -> Self {
        Self { warnings }
    }

    /// Returns the warnings.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

impl fmt::Display for ApiWarningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, warning) in self.warnings.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{warning}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiWarningError {}

/// Error type for endpoint operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The call failed below the application layer.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Seller Center rejected the call.
    #[error(transparent)]
    Api(#[from] ApiResponseError),

    /// A write call was accepted with warnings.
    #[error(transparent)]
    Warnings(#[from] ApiWarningError),

    /// The body did not match the expected model.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A single-entity lookup returned nothing.
    #[error("Cannot find {entity}")]
    NotFound {
        /// What was looked up, e.g. `order`.
        entity: &'static str,
    },
}

impl From<XmlError> for ResourceError {
    fn from(error: XmlError) -> Self {
        Self::Http(HttpError::InvalidRequest(error))
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(DecodeError::Json(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(field: &str, message: &str, value: &str) -> Warning {
        Warning {
            field: field.to_string(),
            message: message.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_warning_error_lists_one_line_per_warning() {
        let error = ApiWarningError::new(vec![
            warning("Price", "Must be positive", "-1"),
            warning("Name", "Too long", "xxx"),
        ]);

        assert_eq!(
            error.to_string(),
            "Field \"Price\": Must be positive (-1)\nField \"Name\": Too long (xxx)"
        );
        assert_eq!(error.warnings().len(), 2);
    }

    #[test]
    fn test_api_error_display_is_code_and_message() {
        let error: ResourceError = ApiResponseError {
            code: "7".to_string(),
            message: "E007: Login failed".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "7: E007: Login failed");
    }

    #[test]
    fn test_not_found_message() {
        let error = ResourceError::NotFound { entity: "order" };
        assert_eq!(error.to_string(), "Cannot find order");
    }

    #[test]
    fn test_xml_error_becomes_invalid_request() {
        let error: ResourceError = XmlError::InvalidElementName {
            name: "9x".to_string(),
        }
        .into();
        assert!(matches!(
            error,
            ResourceError::Http(HttpError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_warning_value_accepts_numbers() {
        let parsed: Warning =
            serde_json::from_str(r#"{"Field": "Quantity", "Message": "Too big", "Value": 5000}"#)
                .unwrap();
        assert_eq!(parsed.value, "5000");
    }
}

//! Typed endpoint operations.
//!
//! Each resource borrows an [`ApiClient`] and exposes one method per Seller
//! Center action, turning typed arguments into an [`ApiRequest`] and the
//! response body into the models from [`crate::model`].
//!
//! | resource              | actions                                                        |
//! |-----------------------|----------------------------------------------------------------|
//! | [`OrderResource`]     | `GetOrders`, `GetOrder`, `GetOrderItems`, `GetMultipleOrderItems`, `GetDocument`, `SetStatusTo*` |
//! | [`ProductResource`]   | `GetProducts`, `GetBrands`, `GetCategoryTree`, `GetCategoryAttributes`, `ProductCreate`, `ProductUpdate`, `Image` |
//! | [`FeedResource`]      | `FeedList`, `FeedStatus`                                       |
//! | [`WebhookResource`]   | `CreateWebhook`, `GetWebhooks`, `GetWebhookEntities`          |
//!
//! Write calls return the `RequestId` of the accepted request. When
//! Seller Center accepts a write but reports `WarningDetail`, the call fails
//! with [`ResourceError::Warnings`].
//!
//! # Example
//!
//! ```rust,ignore
//! use seller_center::resources::{GetOrdersParams, OrderResource};
//!
//! let orders = OrderResource::new(&client)
//!     .get_orders(GetOrdersParams {
//!         status: Some("pending".to_string()),
//!         limit: Some(50),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

mod errors;
mod feed;
mod order;
mod product;
mod webhook;

pub use errors::{ApiWarningError, ResourceError, Warning};
pub use feed::FeedResource;
pub use order::{GetOrdersParams, OrderResource};
pub use product::{GetProductsParams, ProductBuilder, ProductResource, MAX_EXTRA_IMAGES};
pub use webhook::WebhookResource;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::clients::{ApiClient, ApiRequest, Response, SuccessResponse};
use crate::model::List;

const WARNING_DETAIL: &str = "WarningDetail";

/// Sends `request` and unwraps the success envelope.
async fn execute<C: ApiClient + ?Sized>(
    client: &C,
    request: ApiRequest,
) -> Result<SuccessResponse, ResourceError> {
    let action = request.action().to_string();
    match client.call(request).await? {
        Response::Success(success) => Ok(success),
        Response::Error(error) => {
            let error = error.to_error();
            tracing::warn!(
                action = %action,
                code = %error.code,
                message = %error.message,
                "Seller Center rejected the request"
            );
            Err(error.into())
        }
    }
}

/// Result of a write call: the request id, or the reported warnings.
fn write_outcome(response: &SuccessResponse) -> Result<String, ResourceError> {
    let warnings: List<Warning> = response.body_field(WARNING_DETAIL)?.unwrap_or_default();
    if warnings.is_empty() {
        return Ok(response.head().request_id.clone());
    }
    tracing::info!(
        request_id = %response.head().request_id,
        count = warnings.len(),
        "Write accepted with warnings"
    );
    Err(ApiWarningError::new(warnings.into_vec()).into())
}

/// Renders ids as `[1,2,3]`; empty input gives an empty string.
fn id_list(ids: &[i64]) -> String {
    if ids.is_empty() {
        return String::new();
    }
    let joined = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("[{joined}]")
}

/// Formats a filter date the way list endpoints expect it.
fn filter_date(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

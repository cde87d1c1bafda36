//! Feed endpoints. Every write call is processed asynchronously as a feed.

use crate::clients::{ApiClient, ApiRequest};
use crate::model::{FeedList, FeedStatus};
use crate::resources::{execute, ResourceError};

/// Feed operations.
///
/// # Example
///
/// ```rust,ignore
/// use seller_center::resources::FeedResource;
///
/// let status = FeedResource::new(&client).feed_status(&request_id).await?;
/// if status.is_complete() {
///     println!("{} failed", status.failed_records);
/// }
/// ```
#[derive(Debug)]
pub struct FeedResource<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> FeedResource<'a, C> {
    /// Creates the resource on top of `client`.
    #[must_use]
    pub const fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Lists recent feeds.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn feed_list(&self) -> Result<FeedList, ResourceError> {
        let response = execute(self.client, ApiRequest::get("FeedList")).await?;
        Ok(response.decode_body()?)
    }

    /// Fetches the state of one feed. `feed_id` is the request id returned
    /// by a write call.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn feed_status(&self, feed_id: &str) -> Result<FeedStatus, ResourceError> {
        let request = ApiRequest::get("FeedStatus").with_param("FeedID", feed_id);

        let response = execute(self.client, request).await?;
        Ok(response.body_field("FeedDetail")?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::{failure, success, FakeClient};
    use serde_json::json;

    #[tokio::test]
    async fn test_feed_list() {
        let client = FakeClient::replying(vec![
            success(json!({"Feed": [
                {"Feed": "f-1", "Status": "Finished", "Action": "ProductCreate", "TotalRecords": "2"},
                {"Feed": "f-2", "Status": "Queued", "Action": "Image", "TotalRecords": "1"}
            ]})),
            success(json!("")),
        ]);
        let feeds = FeedResource::new(&client);

        let listed = feeds.feed_list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].feed, "f-2");
        assert_eq!(listed[0].total_records, 2);

        assert!(feeds.feed_list().await.unwrap().is_empty());
        assert_eq!(client.last_request().action(), "FeedList");
    }

    #[tokio::test]
    async fn test_feed_status() {
        let client = FakeClient::replying(vec![success(json!({
            "FeedDetail": {
                "Feed": "f-1",
                "Status": "Finished",
                "TotalRecords": "2",
                "ProcessedRecords": "2",
                "FailedRecords": "1",
                "FeedErrors": {"Error": {"Code": 0, "Message": "Bad price", "SellerSku": "A"}},
                "FeedWarnings": ""
            }
        }))]);

        let status = FeedResource::new(&client).feed_status("f-1").await.unwrap();

        assert!(status.is_complete());
        assert_eq!(status.failed_records, 1);
        assert_eq!(status.feed_errors.len(), 1);
        assert_eq!(status.feed_errors[0].seller_sku, "A");
        assert!(status.feed_warnings.is_empty());
        assert_eq!(client.last_request().params()["FeedID"], "f-1");
    }

    #[tokio::test]
    async fn test_feed_status_missing_detail_is_default() {
        let client = FakeClient::replying(vec![success(json!(""))]);
        let status = FeedResource::new(&client).feed_status("f-9").await.unwrap();
        assert_eq!(status, FeedStatus::default());
    }

    #[tokio::test]
    async fn test_feed_status_unknown_feed() {
        let client = FakeClient::replying(vec![failure("1", "E001: Parameter FeedID is invalid")]);
        let result = FeedResource::new(&client).feed_status("nope").await;
        assert!(matches!(result, Err(ResourceError::Api(_))));
    }
}

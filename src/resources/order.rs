//! Order endpoints.

use chrono::{DateTime, Utc};

use crate::clients::{ApiClient, ApiRequest};
use crate::model::{
    DeliveryType, Document, DocumentType, Documents, Order, OrderItems, Orders, OrdersWithItems,
};
use crate::resources::{execute, filter_date, id_list, ResourceError};

/// Filters for [`OrderResource::get_orders`]. Unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetOrdersParams {
    /// Only orders created after this instant.
    pub created_after: Option<DateTime<Utc>>,
    /// Only orders created before this instant.
    pub created_before: Option<DateTime<Utc>>,
    /// Only orders updated after this instant.
    pub updated_after: Option<DateTime<Utc>>,
    /// Only orders updated before this instant.
    pub updated_before: Option<DateTime<Utc>>,
    /// Only orders in this status, e.g. `pending`.
    pub status: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page offset.
    pub offset: Option<u32>,
    /// Sort field, e.g. `created_at`.
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`.
    pub sort_direction: Option<String>,
}

impl GetOrdersParams {
    pub(crate) fn apply(&self, request: &mut ApiRequest) {
        let dates = [
            ("CreatedAfter", self.created_after.as_ref()),
            ("CreatedBefore", self.created_before.as_ref()),
            ("UpdatedAfter", self.updated_after.as_ref()),
            ("UpdatedBefore", self.updated_before.as_ref()),
        ];
        for (key, value) in dates {
            if let Some(instant) = value {
                request.set_param(key, filter_date(instant));
            }
        }
        if let Some(limit) = self.limit {
            request.set_param("Limit", limit.to_string());
        }
        if let Some(offset) = self.offset {
            request.set_param("Offset", offset.to_string());
        }
        let texts = [
            ("Status", self.status.as_ref()),
            ("SortBy", self.sort_by.as_ref()),
            ("SortDirection", self.sort_direction.as_ref()),
        ];
        for (key, value) in texts {
            if let Some(text) = value {
                request.set_param(key, text.as_str());
            }
        }
    }
}

/// Order operations.
///
/// # Example
///
/// ```rust,ignore
/// use seller_center::model::{DeliveryType, DocumentType};
/// use seller_center::resources::OrderResource;
///
/// let orders = OrderResource::new(&client);
/// let items = orders.get_order_items(42).await?;
/// let ids: Vec<i64> = items.iter().map(|item| item.order_item_id).collect();
///
/// orders
///     .set_status_to_packed_by_marketplace(&ids, DeliveryType::Dropship, "Correios")
///     .await?;
/// let label = orders.get_document(&ids, DocumentType::ShippingLabel).await?;
/// ```
#[derive(Debug)]
pub struct OrderResource<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> OrderResource<'a, C> {
    /// Creates the resource on top of `client`.
    #[must_use]
    pub const fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Lists orders matching `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_orders(&self, params: GetOrdersParams) -> Result<Orders, ResourceError> {
        let mut request = ApiRequest::get("GetOrders");
        params.apply(&mut request);

        let response = execute(self.client, request).await?;
        Ok(response.body_field("Orders")?.unwrap_or_default())
    }

    /// Fetches one order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the body holds no order, or
    /// another [`ResourceError`] if the call fails.
    pub async fn get_order(&self, order_id: i64) -> Result<Order, ResourceError> {
        let request = ApiRequest::get("GetOrder").with_param("OrderId", order_id.to_string());

        let response = execute(self.client, request).await?;
        let orders: Orders = response.body_field("Orders")?.unwrap_or_default();
        orders
            .into_iter()
            .next()
            .ok_or(ResourceError::NotFound { entity: "order" })
    }

    /// Lists the items of one order.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_order_items(&self, order_id: i64) -> Result<OrderItems, ResourceError> {
        let request = ApiRequest::get("GetOrderItems").with_param("OrderId", order_id.to_string());

        let response = execute(self.client, request).await?;
        Ok(response.body_field("OrderItems")?.unwrap_or_default())
    }

    /// Lists the items of several orders in one call.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_multiple_order_items(
        &self,
        order_ids: &[i64],
    ) -> Result<OrdersWithItems, ResourceError> {
        let request =
            ApiRequest::get("GetMultipleOrderItems").with_param("OrderIdList", id_list(order_ids));

        let response = execute(self.client, request).await?;
        Ok(response.body_field("Orders")?.unwrap_or_default())
    }

    /// Fetches a document, such as a shipping label, for order items.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the body holds no document, or
    /// another [`ResourceError`] if the call fails.
    pub async fn get_document(
        &self,
        order_item_ids: &[i64],
        document_type: DocumentType,
    ) -> Result<Document, ResourceError> {
        let request = ApiRequest::get("GetDocument")
            .with_param("OrderItemIds", id_list(order_item_ids))
            .with_param("DocumentType", document_type.as_str());

        let response = execute(self.client, request).await?;
        let documents: Documents = response.body_field("Documents")?.unwrap_or_default();
        documents
            .into_iter()
            .next()
            .ok_or(ResourceError::NotFound { entity: "document" })
    }

    /// Cancels an order item.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or is rejected.
    pub async fn set_status_to_canceled(
        &self,
        order_item_id: i64,
        reason: &str,
        reason_detail: &str,
    ) -> Result<(), ResourceError> {
        let request = ApiRequest::post("SetStatusToCanceled")
            .with_param("OrderItemId", order_item_id.to_string())
            .with_param("Reason", reason)
            .with_param("ReasonDetail", reason_detail);

        execute(self.client, request).await?;
        Ok(())
    }

    /// Marks order items as packed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or is rejected.
    pub async fn set_status_to_packed_by_marketplace(
        &self,
        order_item_ids: &[i64],
        delivery_type: DeliveryType,
        shipping_provider: &str,
    ) -> Result<(), ResourceError> {
        let request = ApiRequest::post("SetStatusToPackedByMarketplace")
            .with_param("OrderItemIds", id_list(order_item_ids))
            .with_param("DeliveryType", delivery_type.as_str())
            .with_param("ShippingProvider", shipping_provider);

        execute(self.client, request).await?;
        Ok(())
    }

    /// Marks order items as ready to ship.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or is rejected.
    pub async fn set_status_to_ready_to_ship(
        &self,
        order_item_ids: &[i64],
        delivery_type: DeliveryType,
        shipping_provider: &str,
        tracking_number: &str,
    ) -> Result<(), ResourceError> {
        let request = ApiRequest::post("SetStatusToReadyToShip")
            .with_param("OrderItemIds", id_list(order_item_ids))
            .with_param("DeliveryType", delivery_type.as_str())
            .with_param("ShippingProvider", shipping_provider)
            .with_param("TrackingNumber", tracking_number);

        execute(self.client, request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::resources::testing::{failure, success, FakeClient};
    use chrono::TimeZone;
    use serde_json::json;

    fn order(id: &str) -> serde_json::Value {
        json!({"OrderId": id, "OrderNumber": format!("N{id}"), "Price": "10.00"})
    }

    #[tokio::test]
    async fn test_get_orders_sends_only_set_filters() {
        let client = FakeClient::replying(vec![success(json!({
            "Orders": {"Order": [order("1"), order("2")]}
        }))]);

        let orders = OrderResource::new(&client)
            .get_orders(GetOrdersParams {
                created_after: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
                status: Some("pending".to_string()),
                limit: Some(10),
                ..GetOrdersParams::default()
            })
            .await
            .unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].order_id, 2);

        let request = client.last_request();
        assert_eq!(request.action(), "GetOrders");
        assert_eq!(request.method(), HttpMethod::Get);
        let params = request.params();
        assert_eq!(params["CreatedAfter"], "2024-01-02T03:04:05Z");
        assert_eq!(params["Status"], "pending");
        assert_eq!(params["Limit"], "10");
        assert!(!params.contains_key("Offset"));
        assert!(!params.contains_key("SortBy"));
    }

    #[tokio::test]
    async fn test_get_orders_empty_body() {
        let client = FakeClient::replying(vec![success(json!({"Orders": ""}))]);
        let orders = OrderResource::new(&client)
            .get_orders(GetOrdersParams::default())
            .await
            .unwrap();
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_get_order() {
        let client = FakeClient::replying(vec![success(json!({"Orders": {"Order": order("42")}}))]);
        let order = OrderResource::new(&client).get_order(42).await.unwrap();

        assert_eq!(order.order_id, 42);
        assert_eq!(client.last_request().params()["OrderId"], "42");
    }

    #[tokio::test]
    async fn test_get_order_not_found() {
        let client = FakeClient::replying(vec![success(json!({"Orders": ""}))]);
        let result = OrderResource::new(&client).get_order(1).await;
        assert!(matches!(result, Err(ResourceError::NotFound { entity: "order" })));
    }

    #[tokio::test]
    async fn test_get_order_items() {
        let client = FakeClient::replying(vec![success(json!({
            "OrderItems": {"OrderItem": {"OrderItemId": "5", "OrderId": "42", "Sku": "A"}}
        }))]);
        let items = OrderResource::new(&client).get_order_items(42).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order_item_id, 5);
    }

    #[tokio::test]
    async fn test_get_multiple_order_items() {
        let client = FakeClient::replying(vec![success(json!({
            "Orders": {"Order": [
                {"OrderId": "1", "OrderItems": {"OrderItem": {"OrderItemId": "10"}}},
                {"OrderId": "2", "OrderItems": {"OrderItem": [{"OrderItemId": "20"}, {"OrderItemId": "21"}]}}
            ]}
        }))]);
        let orders = OrderResource::new(&client)
            .get_multiple_order_items(&[1, 2])
            .await
            .unwrap();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].order_items.len(), 2);
        assert_eq!(client.last_request().params()["OrderIdList"], "[1,2]");
    }

    #[tokio::test]
    async fn test_get_document() {
        let client = FakeClient::replying(vec![success(json!({
            "Documents": {"Document": {
                "DocumentType": "shippingLabel",
                "MimeType": "text/html",
                "File": "PGh0bWw+PC9odG1sPg=="
            }}
        }))]);
        let document = OrderResource::new(&client)
            .get_document(&[1, 2], DocumentType::ShippingLabel)
            .await
            .unwrap();

        assert_eq!(document.mime_type, "text/html");
        let params = client.last_request().params().clone();
        assert_eq!(params["OrderItemIds"], "[1,2]");
        assert_eq!(params["DocumentType"], "shippingLabel");
    }

    #[tokio::test]
    async fn test_get_document_missing() {
        let client = FakeClient::replying(vec![success(json!(""))]);
        let result = OrderResource::new(&client)
            .get_document(&[1], DocumentType::Invoice)
            .await;
        assert!(matches!(result, Err(ResourceError::NotFound { entity: "document" })));
    }

    #[tokio::test]
    async fn test_status_updates_are_posts() {
        let client = FakeClient::replying(vec![success(json!("")), success(json!("")), success(json!(""))]);
        let orders = OrderResource::new(&client);

        orders.set_status_to_canceled(5, "Out of stock", "Sold elsewhere").await.unwrap();
        orders
            .set_status_to_packed_by_marketplace(&[5, 6], DeliveryType::SendToWarehouse, "Acme")
            .await
            .unwrap();
        orders
            .set_status_to_ready_to_ship(&[5], DeliveryType::Pickup, "Acme", "TRK1")
            .await
            .unwrap();

        let requests = client.requests();
        assert!(requests.iter().all(|r| r.method() == HttpMethod::Post));
        assert_eq!(requests[0].params()["Reason"], "Out of stock");
        assert_eq!(requests[1].params()["OrderItemIds"], "[5,6]");
        assert_eq!(requests[1].params()["DeliveryType"], "send_to_warehouse");
        assert_eq!(requests[2].params()["TrackingNumber"], "TRK1");
        assert_eq!(requests[2].params()["DeliveryType"], "pickup");
    }

    #[tokio::test]
    async fn test_rejected_status_update() {
        let client = FakeClient::replying(vec![failure("21", "E021: Invalid Order Item ID")]);
        let result = OrderResource::new(&client)
            .set_status_to_canceled(1, "x", "y")
            .await;
        assert!(matches!(result, Err(ResourceError::Api(_))));
    }
}

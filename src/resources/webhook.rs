//! Webhook endpoints.

use crate::clients::{ApiClient, ApiRequest, XmlElement};
use crate::model::{Webhook, WebhookEntities, Webhooks};
use crate::resources::{execute, ResourceError};

/// Webhook operations.
///
/// # Example
///
/// ```rust,ignore
/// use seller_center::resources::WebhookResource;
///
/// let webhooks = WebhookResource::new(&client);
/// let entities = webhooks.get_webhook_entities().await?;
/// let id = webhooks
///     .create_webhook("https://example.com/hooks", &entities.aliases())
///     .await?;
/// ```
#[derive(Debug)]
pub struct WebhookResource<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> WebhookResource<'a, C> {
    /// Creates the resource on top of `client`.
    #[must_use]
    pub const fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Registers `callback_url` for the given event aliases and returns the
    /// new webhook id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn create_webhook<S: AsRef<str>>(
        &self,
        callback_url: &str,
        events: &[S],
    ) -> Result<String, ResourceError> {
        let events = events
            .iter()
            .map(|event| XmlElement::text("Event", event.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let payload = XmlElement::parent(
            "Webhook",
            vec![
                XmlElement::text("CallbackUrl", callback_url)?,
                XmlElement::parent("Events", events)?,
            ],
        )?;

        let request = ApiRequest::post("CreateWebhook").with_payload(vec![payload]);
        let response = execute(self.client, request).await?;

        let webhook: Webhook = response.body_field("Webhook")?.unwrap_or_default();
        tracing::debug!(webhook_id = %webhook.webhook_id, "Webhook created");
        Ok(webhook.webhook_id)
    }

    /// Lists registered webhooks.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_webhooks(&self) -> Result<Webhooks, ResourceError> {
        let response = execute(self.client, ApiRequest::get("GetWebhooks")).await?;
        Ok(response.body_field("Webhooks")?.unwrap_or_default())
    }

    /// Lists the entities and event aliases webhooks can subscribe to.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_webhook_entities(&self) -> Result<WebhookEntities, ResourceError> {
        let response = execute(self.client, ApiRequest::get("GetWebhookEntities")).await?;
        Ok(response.body_field("Entities")?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use crate::resources::testing::{success, FakeClient};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_webhook() {
        let client = FakeClient::replying(vec![success(json!({"Webhook": {"WebhookId": "abc"}}))]);

        let id = WebhookResource::new(&client)
            .create_webhook("https://example.com/hook", &["onOrderCreated", "onFeedCompleted"])
            .await
            .unwrap();

        assert_eq!(id, "abc");
        let request = client.last_request();
        assert_eq!(request.action(), "CreateWebhook");
        assert_eq!(request.method(), HttpMethod::Post);
        let body = String::from_utf8(request.post_body()).unwrap();
        assert!(body.contains("<CallbackUrl>https://example.com/hook</CallbackUrl>"));
        assert!(body.contains("<Event>onOrderCreated</Event>"));
        assert!(body.contains("<Event>onFeedCompleted</Event>"));
        assert!(body.find("<Events>").unwrap() < body.find("<Event>").unwrap());
    }

    #[tokio::test]
    async fn test_get_webhooks() {
        let client = FakeClient::replying(vec![success(json!({
            "Webhooks": {"Webhook": [
                {"WebhookId": 10, "CallbackUrl": "https://a", "Events": {"Event": "onOrderCreated"}},
                {"WebhookId": "11", "CallbackUrl": "https://b", "Events": {"Event": ["x", "y"]}}
            ]}
        }))]);

        let webhooks = WebhookResource::new(&client).get_webhooks().await.unwrap();

        assert_eq!(webhooks.len(), 2);
        assert_eq!(webhooks[0].webhook_id, "10");
        assert_eq!(webhooks[0].events.len(), 1);
        assert_eq!(webhooks[1].events.len(), 2);
    }

    #[tokio::test]
    async fn test_get_webhook_entities() {
        let client = FakeClient::replying(vec![success(json!({
            "Entities": {"Entity": {
                "Name": "Order",
                "Events": {"Event": [
                    {"EventName": "Created", "EventAlias": "onOrderCreated"},
                    {"EventName": "Status changed", "EventAlias": "onOrderItemsStatusChanged"}
                ]}
            }}
        }))]);

        let entities = WebhookResource::new(&client)
            .get_webhook_entities()
            .await
            .unwrap();

        assert_eq!(
            entities.aliases(),
            vec!["onOrderCreated", "onOrderItemsStatusChanged"]
        );
    }
}

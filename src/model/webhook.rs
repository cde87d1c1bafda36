//! Webhook subscriptions and the events they can listen to.

use serde::{Deserialize, Serialize};

use crate::model::codec::lenient_string;
use crate::model::collection::tagged_list;

tagged_list!(
    /// Event aliases from `{"Event": ...}`.
    WebhookEvents,
    "Event",
    String
);

/// A registered webhook.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Webhook {
    /// Webhook id.
    #[serde(deserialize_with = "lenient_string::deserialize")]
    pub webhook_id: String,
    /// URL Seller Center posts events to.
    pub callback_url: String,
    /// Who registered the webhook, e.g. `api`.
    pub webhook_source: String,
    /// Subscribed event aliases.
    pub events: WebhookEvents,
}

tagged_list!(
    /// Webhooks from `{"Webhook": ...}`.
    Webhooks,
    "Webhook",
    Webhook
);

/// An event that can be subscribed to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WebhookEntityEvent {
    /// Display name.
    pub event_name: String,
    /// Alias used when creating webhooks, e.g. `onOrderCreated`.
    pub event_alias: String,
}

tagged_list!(
    /// Entity events from `{"Event": ...}`.
    WebhookEntityEvents,
    "Event",
    WebhookEntityEvent
);

/// A group of related events, e.g. `Order` or `Product`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WebhookEntity {
    /// Entity name.
    pub name: String,
    /// Events of the entity.
    pub events: WebhookEntityEvents,
}

tagged_list!(
    /// Entities from `{"Entity": ...}`.
    WebhookEntities,
    "Entity",
    WebhookEntity
);

impl WebhookEntities {
    /// Returns every event alias across all entities.
    #[must_use]
    pub fn aliases(&self) -> Vec<&str> {
        self.iter()
            .flat_map(|entity| entity.events.iter())
            .map(|event| event.event_alias.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_webhook_events_single_string() {
        let webhooks: Webhooks = serde_json::from_value(json!({
            "Webhook": {
                "WebhookId": "abc",
                "CallbackUrl": "https://example.com/hook",
                "WebhookSource": "api",
                "Events": {"Event": "onOrderCreated"}
            }
        }))
        .unwrap();

        assert_eq!(webhooks.len(), 1);
        assert_eq!(webhooks[0].webhook_id, "abc");
        assert_eq!(webhooks[0].events.to_vec(), vec!["onOrderCreated".to_string()]);
    }

    #[test]
    fn test_webhook_events_array() {
        let webhook: Webhook = serde_json::from_value(json!({
            "WebhookId": 12,
            "Events": {"Event": ["onOrderCreated", "onFeedCompleted"]}
        }))
        .unwrap();

        assert_eq!(webhook.webhook_id, "12");
        assert_eq!(webhook.events.len(), 2);
    }

    #[test]
    fn test_entities() {
        let entities: WebhookEntities = serde_json::from_value(json!({
            "Entity": [
                {
                    "Name": "Order",
                    "Events": {"Event": [
                        {"EventName": "Created", "EventAlias": "onOrderCreated"},
                        {"EventName": "Status Changed", "EventAlias": "onOrderItemsStatusChanged"}
                    ]}
                },
                {
                    "Name": "Feed",
                    "Events": {"Event": {"EventName": "Completed", "EventAlias": "onFeedCompleted"}}
                }
            ]
        }))
        .unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(
            entities.aliases(),
            vec!["onOrderCreated", "onOrderItemsStatusChanged", "onFeedCompleted"]
        );
    }

    #[test]
    fn test_empty_collections() {
        let webhooks: Webhooks = serde_json::from_value(json!("")).unwrap();
        assert!(webhooks.is_empty());
        let entity: WebhookEntity = serde_json::from_value(json!({"Name": "Order", "Events": ""})).unwrap();
        assert!(entity.events.is_empty());
    }
}

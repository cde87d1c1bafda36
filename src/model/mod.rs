//! Typed models of Seller Center response bodies.
//!
//! Seller Center's JSON is generated from XML, which shows in two ways:
//!
//! - scalars arrive as strings (`"12.34"`, `"1"`, `""`), handled by the
//!   serde adapters in [`codec`];
//! - repeated elements arrive as an object, an array or an empty string
//!   depending on how many there are, handled by [`List`] and the wrapper
//!   types such as [`Orders`] and [`Categories`].
//!
//! Every model derives `Default` and decodes missing keys to their zero
//! value, so partial bodies decode cleanly.

pub mod codec;
pub mod collection;
mod feed;
mod order;
mod product;
mod webhook;

pub use collection::List;
pub use feed::{
    FailureReport, Feed, FeedError, FeedErrors, FeedList, FeedStatus, FeedWarning, FeedWarnings,
};
pub use order::{
    Address, DeliveryType, Document, DocumentType, Documents, Order, OrderItem, OrderItems,
    OrderWithItems, Orders, OrdersWithItems, Statuses,
};
pub use product::{
    Attribute, AttributeOption, AttributeOptions, Attributes, Brand, Brands, Categories, Category,
    Images, Product, Products,
};
pub use webhook::{
    Webhook, WebhookEntities, WebhookEntity, WebhookEntityEvent, WebhookEntityEvents,
    WebhookEvents, Webhooks,
};

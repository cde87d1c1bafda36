//! Orders, order items and shipping documents.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clients::DecodeError;
use crate::model::codec::{boolean, empty_as_default, float, int, timestamp};
use crate::model::collection::tagged_list;

/// How a packed order item reaches the carrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeliveryType {
    /// Cross-docking through a marketplace warehouse.
    SendToWarehouse,
    /// Shipped directly by the seller.
    Dropship,
    /// Collected by the carrier from the seller.
    Pickup,
}

impl DeliveryType {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SendToWarehouse => "send_to_warehouse",
            Self::Dropship => "dropship",
            Self::Pickup => "pickup",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of document returned by `GetDocument`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Carrier manifest.
    CarrierManifest,
    /// Serial number sheet.
    SerialNumber,
    /// Export invoice.
    ExportInvoice,
    /// Invoice.
    Invoice,
    /// Shipping label.
    ShippingLabel,
    /// Shipping parcel sheet.
    ShippingParcel,
}

impl DocumentType {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CarrierManifest => "carrierManifest",
            Self::SerialNumber => "serialNumber",
            Self::ExportInvoice => "exportInvoice",
            Self::Invoice => "invoice",
            Self::ShippingLabel => "shippingLabel",
            Self::ShippingParcel => "shippingParcel",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A billing or shipping address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub phone2: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    pub address4: String,
    pub address5: String,
    pub city: String,
    pub ward: String,
    pub region: String,
    pub post_code: String,
    pub country: String,
}

tagged_list!(
    /// Status history of an order, from `{"Status": ...}`.
    Statuses,
    "Status",
    String
);

/// An order as returned by `GetOrders` and `GetOrder`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Order {
    /// Seller Center order id.
    #[serde(with = "int")]
    pub order_id: i64,
    /// Customer first name.
    pub customer_first_name: String,
    /// Customer last name.
    pub customer_last_name: String,
    /// Order number shown to the customer.
    pub order_number: String,
    /// Payment method code.
    pub payment_method: String,
    /// Free-form remarks.
    pub remarks: String,
    /// Delivery notes.
    pub delivery_info: String,
    /// Order total.
    #[serde(with = "float")]
    pub price: f64,
    /// Whether the order is a gift.
    #[serde(with = "boolean")]
    pub gift_option: bool,
    /// Gift message, if any.
    pub gift_message: String,
    /// Voucher applied to the order.
    pub voucher_code: String,
    /// Creation time.
    #[serde(with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Billing address.
    #[serde(deserialize_with = "empty_as_default::deserialize")]
    pub address_billing: Address,
    /// Shipping address.
    #[serde(deserialize_with = "empty_as_default::deserialize")]
    pub address_shipping: Address,
    /// Customer tax id.
    pub national_registration_number: String,
    /// Number of items in the order.
    #[serde(with = "int")]
    pub items_count: i64,
    /// Time by which the seller promised to ship.
    #[serde(with = "timestamp")]
    pub promised_shipping_time: Option<DateTime<Utc>>,
    /// Marketplace specific attributes, as sent.
    pub extra_attributes: String,
    /// Item statuses present in the order.
    pub statuses: Statuses,
}

tagged_list!(
    /// Orders from `{"Order": ...}`.
    Orders,
    "Order",
    Order
);

/// A line of an order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OrderItem {
    #[serde(with = "int")]
    pub order_item_id: i64,
    pub shop_id: String,
    #[serde(with = "int")]
    pub order_id: i64,
    pub name: String,
    pub sku: String,
    pub variation: String,
    pub shop_sku: String,
    pub shipping_type: String,
    #[serde(with = "float")]
    pub item_price: f64,
    #[serde(with = "float")]
    pub paid_price: f64,
    pub currency: String,
    #[serde(with = "float")]
    pub wallet_credits: f64,
    #[serde(with = "float")]
    pub tax_amount: f64,
    #[serde(with = "float")]
    pub cod_collectable_amount: f64,
    #[serde(with = "float")]
    pub shipping_amount: f64,
    #[serde(with = "float")]
    pub shipping_service_cost: f64,
    #[serde(with = "float")]
    pub voucher_amount: f64,
    pub voucher_code: String,
    pub status: String,
    #[serde(with = "boolean")]
    pub is_processable: bool,
    pub shipment_provider: String,
    #[serde(with = "boolean")]
    pub is_digital: bool,
    pub digital_delivery_info: String,
    pub tracking_code: String,
    pub tracking_code_pre: String,
    pub reason: String,
    pub reason_detail: String,
    #[serde(with = "int")]
    pub purchase_order_id: i64,
    pub purchase_order_number: String,
    pub package_id: String,
    #[serde(with = "timestamp")]
    pub promised_shipping_time: Option<DateTime<Utc>>,
    pub extra_attributes: String,
    pub shipping_provider_type: String,
    #[serde(with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    pub return_status: String,
}

tagged_list!(
    /// Order items from `{"OrderItem": ...}`.
    OrderItems,
    "OrderItem",
    OrderItem
);

/// An order together with its items, as returned by `GetMultipleOrderItems`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OrderWithItems {
    /// Seller Center order id.
    #[serde(with = "int")]
    pub order_id: i64,
    /// Order number shown to the customer.
    pub order_number: String,
    /// The order's items.
    pub order_items: OrderItems,
}

tagged_list!(
    /// Orders with items from `{"Order": ...}`.
    OrdersWithItems,
    "Order",
    OrderWithItems
);

/// A shipping document. `file` holds the base64 content as sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Document {
    /// The document kind, e.g. `shippingLabel`.
    pub document_type: String,
    /// MIME type of the decoded file.
    pub mime_type: String,
    /// Base64 encoded content.
    pub file: String,
}

tagged_list!(
    /// Documents from `{"Document": ...}`.
    Documents,
    "Document",
    Document
);

impl Document {
    /// Decodes the base64 file content.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Value`] if `file` is not valid base64.
    pub fn decode_file(&self) -> Result<Vec<u8>, DecodeError> {
        STANDARD
            .decode(self.file.trim())
            .map_err(|e| DecodeError::Value {
                field: "File".to_string(),
                reason: e.to_string(),
            })
    }
}

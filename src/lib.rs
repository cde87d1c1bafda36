//! # Seller Center API Rust SDK
//!
//! A Rust SDK for the Seller Center marketplace API, providing type-safe
//! configuration, request signing, a retrying HTTP client and typed models
//! for orders, products, feeds and webhooks.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`SellerCenterConfig`] and [`SellerCenterConfigBuilder`]
//! - Validated newtypes for the endpoint and credentials
//! - HMAC-SHA256 request signing via [`auth`]
//! - Async HTTP client with linear-backoff retries via [`clients`]
//! - A tolerant decoder for Seller Center's XML-shaped JSON via [`model`]
//! - Typed endpoint operations via [`resources`]
//!
//! ## Quick Start
//!
//! ```rust
//! use seller_center::{ApiKey, ApiVersion, BaseUrl, SellerCenterConfig, UserId};
//!
//! // Create configuration using the builder pattern
//! let config = SellerCenterConfig::builder()
//!     .base_url(BaseUrl::new("https://sellercenter-api.example.com/").unwrap())
//!     .user_id(UserId::new("seller@example.com").unwrap())
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_version(ApiVersion::V1)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Calling Endpoints
//!
//! ```rust,ignore
//! use seller_center::{SellerCenterClient, SellerCenterConfig};
//! use seller_center::resources::{GetOrdersParams, OrderResource, ResourceError};
//!
//! let client = SellerCenterClient::new(&config)?;
//!
//! let orders = OrderResource::new(&client)
//!     .get_orders(GetOrdersParams {
//!         status: Some("pending".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! for order in orders {
//!     println!("{} {}", order.order_id, order.order_number);
//! }
//! ```
//!
//! ## Raw Requests
//!
//! Actions without a typed wrapper can be sent directly:
//!
//! ```rust,ignore
//! use seller_center::{ApiClient, ApiRequest, Response};
//!
//! let request = ApiRequest::get("GetQcStatus").with_param("SkuSellerList", r#"["A"]"#);
//!
//! match client.call(request).await? {
//!     Response::Success(success) => println!("{}", success.body_raw()),
//!     Response::Error(error) => println!("{}", error.to_error()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The client and configuration are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Errors are values**: An `ErrorResponse` envelope is a [`Response`] variant

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod model;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{
    ApiKey, ApiVersion, BaseUrl, SellerCenterConfig, SellerCenterConfigBuilder, UserId,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiClient, ApiRequest, ApiResponseError, DecodeError, HttpError, HttpMethod, Response,
    RetryPolicy, SellerCenterClient,
};

// Re-export endpoint types
pub use resources::{
    FeedResource, OrderResource, ProductBuilder, ProductResource, ResourceError, WebhookResource,
};

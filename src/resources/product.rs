//! Product endpoints and the product payload builder.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::clients::{ApiClient, ApiRequest, XmlContent, XmlElement, XmlError, XmlText};
use crate::model::{Attributes, Brands, Categories, Products};
use crate::resources::order::GetOrdersParams;
use crate::resources::{execute, write_outcome, ResourceError};

/// Maximum number of images [`ProductBuilder::with_image`] keeps.
pub const MAX_EXTRA_IMAGES: usize = 7;

const SALE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Filters for [`ProductResource::get_products`]. Unset fields are not sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetProductsParams {
    /// Only products created after this instant.
    pub created_after: Option<DateTime<Utc>>,
    /// Only products created before this instant.
    pub created_before: Option<DateTime<Utc>>,
    /// Only products updated after this instant.
    pub updated_after: Option<DateTime<Utc>>,
    /// Only products updated before this instant.
    pub updated_before: Option<DateTime<Utc>>,
    /// Only products in this status.
    pub status: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Page offset.
    pub offset: Option<u32>,
    /// Sort field.
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`.
    pub sort_direction: Option<String>,
    /// Free text search on name, brand and SKU.
    pub search: Option<String>,
    /// Predefined filter, e.g. `live` or `sold-out`.
    pub filter: Option<String>,
    /// Only these seller SKUs.
    pub sku_seller_list: Option<Vec<String>>,
    /// Whether to return global identifiers.
    pub global_identifier: Option<bool>,
}

impl GetProductsParams {
    fn apply(&self, request: &mut ApiRequest) -> Result<(), ResourceError> {
        let shared = GetOrdersParams {
            created_after: self.created_after,
            created_before: self.created_before,
            updated_after: self.updated_after,
            updated_before: self.updated_before,
            status: self.status.clone(),
            limit: self.limit,
            offset: self.offset,
            sort_by: self.sort_by.clone(),
            sort_direction: self.sort_direction.clone(),
        };
        shared.apply(request);

        if let Some(search) = &self.search {
            request.set_param("Search", search.as_str());
        }
        if let Some(filter) = &self.filter {
            request.set_param("Filter", filter.as_str());
        }
        if let Some(skus) = &self.sku_seller_list {
            request.set_param("SkuSellerList", serde_json::to_string(skus)?);
        }
        if let Some(global) = self.global_identifier {
            request.set_param("GlobalIdentifier", if global { "1" } else { "0" });
        }
        Ok(())
    }
}

/// Builds one `<Product>` element for `ProductCreate` and `ProductUpdate`.
///
/// The builder is immutable: every `with_*` method consumes it and returns
/// the updated value. Clone it to branch.
///
/// # Example
///
/// ```rust
/// use seller_center::resources::ProductBuilder;
///
/// let base = ProductBuilder::new()
///     .with_brand("Acme")
///     .with_primary_category(5)
///     .with_price(19.9);
///
/// let small = base.clone().with_seller_sku("TSHIRT-S").with_variation("S");
/// let large = base.with_seller_sku("TSHIRT-L").with_variation("L");
///
/// assert_eq!(small.seller_sku(), Some("TSHIRT-S"));
/// assert_eq!(large.seller_sku(), Some("TSHIRT-L"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductBuilder {
    seller_sku: Option<String>,
    name: Option<String>,
    description: Option<String>,
    brand: Option<String>,
    tax_class: Option<String>,
    variation: Option<String>,
    parent_sku: Option<String>,
    quantity: Option<i64>,
    price: Option<f64>,
    sale_price: Option<f64>,
    sale_start_date: Option<DateTime<Utc>>,
    sale_end_date: Option<DateTime<Utc>>,
    status: Option<String>,
    product_id: Option<String>,
    volumetric_weight: Option<f64>,
    product_group: Option<String>,
    primary_category: Option<i64>,
    categories: Vec<i64>,
    product_data: BTreeMap<String, XmlText>,
    browse_nodes: Vec<i64>,
    shipment_type: Option<String>,
    condition: Option<String>,
    images: Vec<String>,
}

impl ProductBuilder {
    /// Creates an empty product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the seller SKU, if set.
    #[must_use]
    pub fn seller_sku(&self) -> Option<&str> {
        self.seller_sku.as_deref()
    }

    /// Sets the seller SKU.
    #[must_use]
    pub fn with_seller_sku(mut self, seller_sku: impl Into<String>) -> Self {
        self.seller_sku = Some(seller_sku.into());
        self
    }

    /// Sets the parent SKU of a variation.
    #[must_use]
    pub fn with_parent_sku(mut self, parent_sku: impl Into<String>) -> Self {
        self.parent_sku = Some(parent_sku.into());
        self
    }

    /// Sets the status, e.g. `active`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the name. Sent as CDATA.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the variation value.
    #[must_use]
    pub fn with_variation(mut self, variation: impl Into<String>) -> Self {
        self.variation = Some(variation.into());
        self
    }

    /// Sets the primary category id.
    #[must_use]
    pub const fn with_primary_category(mut self, category_id: i64) -> Self {
        self.primary_category = Some(category_id);
        self
    }

    /// Sets the additional category ids.
    #[must_use]
    pub fn with_categories(mut self, category_ids: Vec<i64>) -> Self {
        self.categories = category_ids;
        self
    }

    /// Sets the browse node ids.
    #[must_use]
    pub fn with_browse_nodes(mut self, browse_nodes: Vec<i64>) -> Self {
        self.browse_nodes = browse_nodes;
        self
    }

    /// Sets the description. Sent as CDATA so HTML passes through.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the brand name.
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Sets the regular price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the sale price.
    #[must_use]
    pub const fn with_sale_price(mut self, sale_price: f64) -> Self {
        self.sale_price = Some(sale_price);
        self
    }

    /// Sets the sale start.
    #[must_use]
    pub const fn with_sale_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.sale_start_date = Some(start);
        self
    }

    /// Sets the sale end.
    #[must_use]
    pub const fn with_sale_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.sale_end_date = Some(end);
        self
    }

    /// Sets the tax class.
    #[must_use]
    pub fn with_tax_class(mut self, tax_class: impl Into<String>) -> Self {
        self.tax_class = Some(tax_class.into());
        self
    }

    /// Sets the shipment type.
    #[must_use]
    pub fn with_shipment_type(mut self, shipment_type: impl Into<String>) -> Self {
        self.shipment_type = Some(shipment_type.into());
        self
    }

    /// Sets the external product id (EAN, UPC, ...).
    #[must_use]
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Sets the condition, e.g. `new`.
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Sets one category specific attribute, replacing an earlier value.
    #[must_use]
    pub fn with_product_data(mut self, name: impl Into<String>, value: impl Into<XmlText>) -> Self {
        self.product_data.insert(name.into(), value.into());
        self
    }

    /// Merges several category specific attributes.
    #[must_use]
    pub fn with_product_data_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<XmlText>,
    {
        self.product_data
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the stock quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the volumetric weight.
    #[must_use]
    pub const fn with_volumetric_weight(mut self, weight: f64) -> Self {
        self.volumetric_weight = Some(weight);
        self
    }

    /// Sets the product group.
    #[must_use]
    pub fn with_product_group(mut self, product_group: impl Into<String>) -> Self {
        self.product_group = Some(product_group.into());
        self
    }

    /// Sets the main image URL, sent as the `MainImage` product data entry.
    #[must_use]
    pub fn with_main_image(self, url: impl Into<String>) -> Self {
        self.with_product_data("MainImage", XmlText::plain(url))
    }

    /// Adds an image URL, sent as product data `Image2` to `Image8`.
    ///
    /// Images beyond [`MAX_EXTRA_IMAGES`] are ignored.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        if self.images.len() >= MAX_EXTRA_IMAGES {
            return self;
        }
        let url = url.into();
        let name = format!("Image{}", self.images.len() + 2);
        self.images.push(url.clone());
        self.with_product_data(name, XmlText::plain(url))
    }

    /// Renders the `<Product>` element. Unset fields are left out.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidElementName`] if a product data name is not
    /// a valid XML name.
    pub fn to_xml(&self) -> Result<XmlElement, XmlError> {
        let mut children = Vec::new();

        push_text(&mut children, "SellerSku", self.seller_sku.as_deref())?;
        push_markup(&mut children, "Name", self.name.as_deref())?;
        push_markup(&mut children, "Description", self.description.as_deref())?;
        push_text(&mut children, "Brand", self.brand.as_deref())?;
        push_text(&mut children, "TaxClass", self.tax_class.as_deref())?;
        push_text(&mut children, "Variation", self.variation.as_deref())?;
        push_text(&mut children, "ParentSku", self.parent_sku.as_deref())?;
        push_text(&mut children, "Quantity", self.quantity.map(|q| q.to_string()).as_deref())?;
        push_text(&mut children, "Price", self.price.map(decimal).as_deref())?;
        push_text(&mut children, "SalePrice", self.sale_price.map(decimal).as_deref())?;
        push_text(&mut children, "SaleStartDate", self.sale_start_date.map(sale_date).as_deref())?;
        push_text(&mut children, "SaleEndDate", self.sale_end_date.map(sale_date).as_deref())?;
        push_text(&mut children, "Status", self.status.as_deref())?;
        push_text(&mut children, "ProductId", self.product_id.as_deref())?;
        push_text(&mut children, "VolumetricWeight", self.volumetric_weight.map(decimal).as_deref())?;
        push_text(&mut children, "ProductGroup", self.product_group.as_deref())?;
        push_text(&mut children, "PrimaryCategory", self.primary_category.map(|c| c.to_string()).as_deref())?;
        push_text(&mut children, "Categories", joined(&self.categories).as_deref())?;

        if !self.product_data.is_empty() {
            let entries = self
                .product_data
                .iter()
                .map(|(name, value)| XmlElement::new(name.as_str(), XmlContent::Text(value.clone())))
                .collect::<Result<Vec<_>, _>>()?;
            children.push(XmlElement::parent("ProductData", entries)?);
        }

        push_text(&mut children, "BrowseNodes", joined(&self.browse_nodes).as_deref())?;
        push_text(&mut children, "ShipmentType", self.shipment_type.as_deref())?;
        push_text(&mut children, "Condition", self.condition.as_deref())?;

        XmlElement::parent("Product", children)
    }
}

fn push_text(children: &mut Vec<XmlElement>, name: &str, value: Option<&str>) -> Result<(), XmlError> {
    if let Some(value) = value {
        children.push(XmlElement::text(name, value)?);
    }
    Ok(())
}

fn push_markup(children: &mut Vec<XmlElement>, name: &str, value: Option<&str>) -> Result<(), XmlError> {
    if let Some(value) = value {
        children.push(XmlElement::markup(name, value)?);
    }
    Ok(())
}

fn decimal(value: f64) -> String {
    format!("{value:.6}")
}

fn sale_date(instant: DateTime<Utc>) -> String {
    instant.format(SALE_DATE_FORMAT).to_string()
}

fn joined(ids: &[i64]) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    Some(
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Product and catalog operations.
///
/// # Example
///
/// ```rust,ignore
/// use seller_center::resources::{ProductBuilder, ProductResource};
///
/// let products = ProductResource::new(&client);
/// let request_id = products
///     .product_create(&[ProductBuilder::new()
///         .with_seller_sku("SKU-1")
///         .with_name("T-Shirt")
///         .with_primary_category(5)
///         .with_price(19.9)])
///     .await?;
/// ```
#[derive(Debug)]
pub struct ProductResource<'a, C: ApiClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: ApiClient + ?Sized> ProductResource<'a, C> {
    /// Creates the resource on top of `client`.
    #[must_use]
    pub const fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Lists products matching `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_products(&self, params: GetProductsParams) -> Result<Products, ResourceError> {
        let mut request = ApiRequest::get("GetProducts");
        params.apply(&mut request)?;

        let response = execute(self.client, request).await?;
        Ok(response.body_field("Products")?.unwrap_or_default())
    }

    /// Lists the brands available to the seller.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_brands(&self) -> Result<Brands, ResourceError> {
        let response = execute(self.client, ApiRequest::get("GetBrands")).await?;
        Ok(response.body_field("Brands")?.unwrap_or_default())
    }

    /// Fetches the category tree.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_category_tree(&self) -> Result<Categories, ResourceError> {
        let response = execute(self.client, ApiRequest::get("GetCategoryTree")).await?;
        Ok(response.body_field("Categories")?.unwrap_or_default())
    }

    /// Lists the attributes of a category.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the call fails or the body does not decode.
    pub async fn get_category_attributes(&self, category_id: i64) -> Result<Attributes, ResourceError> {
        let request = ApiRequest::get("GetCategoryAttributes")
            .with_param("PrimaryCategory", category_id.to_string());

        let response = execute(self.client, request).await?;
        Ok(response.decode_body()?)
    }

    /// Creates products. Returns the request id of the resulting feed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Warnings`] if Seller Center reported
    /// warnings, or another [`ResourceError`] if the call fails.
    pub async fn product_create(&self, products: &[ProductBuilder]) -> Result<String, ResourceError> {
        self.write_products("ProductCreate", products).await
    }

    /// Updates products. Returns the request id of the resulting feed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Warnings`] if Seller Center reported
    /// warnings, or another [`ResourceError`] if the call fails.
    pub async fn product_update(&self, products: &[ProductBuilder]) -> Result<String, ResourceError> {
        self.write_products("ProductUpdate", products).await
    }

    /// Replaces the images of a product. Returns the request id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Warnings`] if Seller Center reported
    /// warnings, or another [`ResourceError`] if the call fails.
    pub async fn product_image(
        &self,
        seller_sku: &str,
        images: &[String],
    ) -> Result<String, ResourceError> {
        let images = images
            .iter()
            .map(|url| XmlElement::text("Image", url.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let payload = XmlElement::parent(
            "ProductImage",
            vec![
                XmlElement::text("SellerSku", seller_sku)?,
                XmlElement::parent("Images", images)?,
            ],
        )?;

        let request = ApiRequest::post("Image").with_payload(vec![payload]);
        let response = execute(self.client, request).await?;
        write_outcome(&response)
    }

    async fn write_products(
        &self,
        action: &str,
        products: &[ProductBuilder],
    ) -> Result<String, ResourceError> {
        let payload = products
            .iter()
            .map(ProductBuilder::to_xml)
            .collect::<Result<Vec<_>, _>>()?;

        let request = ApiRequest::post(action).with_payload(payload);
        let response = execute(self.client, request).await?;
        write_outcome(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{render_document, HttpMethod, PAYLOAD_ROOT};
    use crate::resources::testing::{success, FakeClient};
    use chrono::TimeZone;
    use serde_json::json;

    fn body_of(request: &ApiRequest) -> String {
        String::from_utf8(request.post_body()).unwrap()
    }

    #[test]
    fn test_builder_renders_fields_in_order() {
        let product = ProductBuilder::new()
            .with_condition("new")
            .with_seller_sku("SKU-1")
            .with_name("Tee & Co")
            .with_description("<p>Soft</p>")
            .with_price(19.9)
            .with_sale_start_date(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
            .with_primary_category(5)
            .with_categories(vec![2, 3])
            .to_xml()
            .unwrap();

        let xml = render_document(PAYLOAD_ROOT, &[product]);
        let position = |needle: &str| xml.find(needle).unwrap_or_else(|| panic!("{needle} missing"));

        assert!(xml.contains("<SellerSku>SKU-1</SellerSku>"));
        assert!(xml.contains("<Name><![CDATA[Tee & Co]]></Name>"));
        assert!(xml.contains("<Description><![CDATA[<p>Soft</p>]]></Description>"));
        assert!(xml.contains("<Price>19.900000</Price>"));
        assert!(xml.contains("<SaleStartDate>2024-05-01 00:00:00</SaleStartDate>"));
        assert!(xml.contains("<PrimaryCategory>5</PrimaryCategory>"));
        assert!(xml.contains("<Categories>2,3</Categories>"));
        assert!(!xml.contains("<BrowseNodes>"));
        assert!(!xml.contains("<Quantity>"));
        assert!(position("<SellerSku>") < position("<Name>"));
        assert!(position("<Price>") < position("<PrimaryCategory>"));
        assert!(position("<Categories>") < position("<Condition>"));
    }

    #[test]
    fn test_builder_is_immutable() {
        let base = ProductBuilder::new().with_brand("Acme");
        let branch = base.clone().with_seller_sku("A");

        assert_eq!(base.seller_sku(), None);
        assert_eq!(branch.seller_sku(), Some("A"));
        assert_ne!(base, branch);
    }

    #[test]
    fn test_images_go_to_product_data() {
        let mut product = ProductBuilder::new().with_main_image("https://img/main.jpg");
        for i in 0..10 {
            product = product.with_image(format!("https://img/{i}.jpg"));
        }
        let xml = render_document(PAYLOAD_ROOT, &[product.to_xml().unwrap()]);

        assert!(xml.contains("<MainImage>https://img/main.jpg</MainImage>"));
        assert!(xml.contains("<Image2>https://img/0.jpg</Image2>"));
        assert!(xml.contains("<Image8>https://img/6.jpg</Image8>"));
        assert!(!xml.contains("<Image9>"));
        assert!(!xml.contains("https://img/7.jpg"));
    }

    #[test]
    fn test_product_data_markup_and_invalid_names() {
        let product = ProductBuilder::new()
            .with_product_data("ShortDescription", XmlText::markup("<ul><li>x</li></ul>"))
            .with_product_data_entries([("Color", "red")]);
        let xml = render_document(PAYLOAD_ROOT, &[product.to_xml().unwrap()]);
        assert!(xml.contains("<ShortDescription><![CDATA[<ul><li>x</li></ul>]]></ShortDescription>"));
        assert!(xml.contains("<Color>red</Color>"));

        let broken = ProductBuilder::new().with_product_data("1Color", "red");
        assert!(broken.to_xml().is_err());
    }

    #[tokio::test]
    async fn test_get_products_params() {
        let client = FakeClient::replying(vec![success(json!({
            "Products": {"Product": {"SellerSku": "A", "Price": "1.00"}}
        }))]);

        let products = ProductResource::new(&client)
            .get_products(GetProductsParams {
                search: Some("tee".to_string()),
                sku_seller_list: Some(vec!["A".to_string(), "B".to_string()]),
                global_identifier: Some(false),
                offset: Some(20),
                ..GetProductsParams::default()
            })
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        let request = client.last_request();
        let params = request.params();
        assert_eq!(params["Search"], "tee");
        assert_eq!(params["SkuSellerList"], r#"["A","B"]"#);
        assert_eq!(params["GlobalIdentifier"], "0");
        assert_eq!(params["Offset"], "20");
        assert!(!params.contains_key("Filter"));
    }

    #[tokio::test]
    async fn test_catalog_reads() {
        let client = FakeClient::replying(vec![
            success(json!({"Brands": {"Brand": [{"BrandId": "1", "Name": "Acme"}]}})),
            success(json!({"Categories": {"Category": {"Name": "Root", "CategoryId": "1", "Children": ""}}})),
            success(json!({"Attribute": {"Name": "color", "IsMandatory": "1"}})),
            success(json!("")),
        ]);
        let products = ProductResource::new(&client);

        let brands = products.get_brands().await.unwrap();
        let categories = products.get_category_tree().await.unwrap();
        let attributes = products.get_category_attributes(1).await.unwrap();
        let empty = products.get_category_attributes(2).await.unwrap();

        assert_eq!(brands[0].name, "Acme");
        assert_eq!(categories[0].name, "Root");
        assert!(attributes[0].is_mandatory);
        assert!(empty.is_empty());
        assert_eq!(client.requests()[2].params()["PrimaryCategory"], "1");
    }

    #[tokio::test]
    async fn test_product_create_posts_products() {
        let client = FakeClient::replying(vec![success(json!(""))]);
        let request_id = ProductResource::new(&client)
            .product_create(&[
                ProductBuilder::new().with_seller_sku("A"),
                ProductBuilder::new().with_seller_sku("B"),
            ])
            .await
            .unwrap();

        assert_eq!(request_id, "req-1");
        let request = client.last_request();
        assert_eq!(request.action(), "ProductCreate");
        assert_eq!(request.method(), HttpMethod::Post);
        let body = body_of(&request);
        assert_eq!(body.matches("<Product>").count(), 2);
        assert!(body.contains("<Request>"));
    }

    #[tokio::test]
    async fn test_product_update_with_warnings() {
        let client = FakeClient::replying(vec![success(json!({
            "WarningDetail": {"Field": "Price", "Message": "Too low", "Value": "0.01"}
        }))]);
        let result = ProductResource::new(&client)
            .product_update(&[ProductBuilder::new().with_seller_sku("A").with_price(0.01)])
            .await;

        assert!(matches!(result, Err(ResourceError::Warnings(_))));
    }

    #[tokio::test]
    async fn test_product_image_payload() {
        let client = FakeClient::replying(vec![success(json!(""))]);
        ProductResource::new(&client)
            .product_image("SKU-1", &["https://img/1.jpg".to_string(), "https://img/2.jpg".to_string()])
            .await
            .unwrap();

        let request = client.last_request();
        assert_eq!(request.action(), "Image");
        let body = body_of(&request);
        assert!(body.contains("<ProductImage>"));
        assert!(body.contains("<SellerSku>SKU-1</SellerSku>"));
        assert_eq!(body.matches("<Image>").count(), 2);
    }
}

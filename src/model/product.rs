//! Products and the catalog they live in: brands, categories and attributes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::model::codec::{boolean, empty_as_default, float, int, string_list, timestamp};
use crate::model::collection::tagged_list;

tagged_list!(
    /// Image URLs from `{"Image": ...}`.
    Images,
    "Image",
    String
);

/// A product as returned by `GetProducts`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Product {
    /// The seller's SKU; the key used by write calls.
    pub seller_sku: String,
    /// SKU assigned by the marketplace.
    pub shop_sku: String,
    /// Display name.
    pub name: String,
    /// Description, usually HTML.
    pub description: String,
    /// Brand name.
    pub brand: String,
    /// Tax class.
    pub tax_class: String,
    /// Variation value, e.g. a size.
    pub variation: String,
    /// SKU of the parent product for variations.
    pub parent_sku: String,
    /// Stock quantity.
    #[serde(with = "int")]
    pub quantity: i64,
    /// Fulfillment by non sellable flag.
    #[serde(with = "boolean")]
    pub fulfillment_by_non_sellable: bool,
    /// Whether the product can be sold.
    #[serde(with = "boolean")]
    pub available: bool,
    /// Regular price.
    #[serde(with = "float")]
    pub price: f64,
    /// Sale price.
    #[serde(with = "float")]
    pub sale_price: f64,
    /// Sale start.
    #[serde(with = "timestamp")]
    pub sale_start_date: Option<DateTime<Utc>>,
    /// Sale end.
    #[serde(with = "timestamp")]
    pub sale_end_date: Option<DateTime<Utc>>,
    /// Status, e.g. `active`.
    pub status: String,
    /// External product id (EAN, UPC, ...).
    pub product_id: String,
    /// Storefront URL.
    pub url: String,
    /// Main image URL.
    pub main_image: String,
    /// Additional image URLs.
    pub images: Images,
    /// Primary category id.
    pub primary_category: String,
    /// Category ids.
    #[serde(with = "string_list")]
    pub categories: Vec<String>,
    /// Category specific attributes, as sent.
    #[serde(deserialize_with = "empty_as_default::deserialize")]
    pub product_data: BTreeMap<String, Value>,
    /// Browse node ids.
    #[serde(with = "string_list")]
    pub browse_nodes: Vec<String>,
    /// Shipment type.
    pub shipment_type: String,
    /// Condition, e.g. `new`.
    pub condition: String,
}

tagged_list!(
    /// Products from `{"Product": ...}`.
    Products,
    "Product",
    Product
);

/// A brand available to the seller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Brand {
    /// Brand id.
    #[serde(with = "int")]
    pub brand_id: i64,
    /// Brand name.
    pub name: String,
    /// Global identifier.
    pub global_identifier: String,
}

tagged_list!(
    /// Brands from `{"Brand": ...}`.
    Brands,
    "Brand",
    Brand
);

/// A node of the category tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Category id.
    #[serde(with = "int")]
    pub category_id: i64,
    /// Global identifier.
    pub global_identifier: String,
    /// Sub-categories.
    pub children: Categories,
}

impl Category {
    /// Finds a category by id in this subtree, depth first.
    #[must_use]
    pub fn find(&self, category_id: i64) -> Option<&Self> {
        if self.category_id == category_id {
            return Some(self);
        }
        self.children.find(category_id)
    }
}

tagged_list!(
    /// Categories from `{"Category": ...}`.
    Categories,
    "Category",
    Category
);

impl Categories {
    /// Finds a category by id anywhere in the tree.
    #[must_use]
    pub fn find(&self, category_id: i64) -> Option<&Category> {
        self.iter().find_map(|category| category.find(category_id))
    }
}

/// A predefined value of an attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct AttributeOption {
    /// Global identifier.
    pub global_identifier: String,
    /// Option value.
    pub name: String,
    /// Whether this option is preselected.
    #[serde(with = "boolean")]
    pub is_default: bool,
}

tagged_list!(
    /// Attribute options from `{"Option": ...}`.
    AttributeOptions,
    "Option",
    AttributeOption
);

/// A product attribute of a category.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Attribute {
    /// Human readable label.
    pub label: String,
    /// Internal name.
    pub name: String,
    /// Element name to use in product payloads.
    pub feed_name: String,
    /// Global identifier.
    pub global_identifier: String,
    /// Whether a value is required.
    #[serde(with = "boolean")]
    pub is_mandatory: bool,
    /// Whether the attribute is shared by all categories.
    #[serde(with = "boolean")]
    pub is_global_attribute: bool,
    /// Description.
    pub description: String,
    /// Product type the attribute applies to.
    pub product_type: String,
    /// Input widget, e.g. `dropdown`.
    pub input_type: String,
    /// Value type, e.g. `option` or `value`.
    pub attribute_type: String,
    /// Example value.
    pub example_value: String,
    /// Maximum value length, 0 if unbounded.
    #[serde(with = "int")]
    pub max_length: i64,
    /// Allowed values.
    pub options: AttributeOptions,
}

tagged_list!(
    /// Attributes from `{"Attribute": ...}`.
    Attributes,
    "Attribute",
    Attribute
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_decodes() {
        let product: Product = serde_json::from_value(json!({
            "SellerSku": "TSHIRT-M",
            "ShopSku": "SH123",
            "Name": "T-Shirt",
            "Quantity": "10",
            "Available": "1",
            "Price": "19.90",
            "SalePrice": "",
            "SaleStartDate": "",
            "Images": {"Image": ["https://img/1.jpg", "https://img/2.jpg"]},
            "Categories": "2,3",
            "BrowseNodes": "",
            "ProductData": {"Gender": "unisex", "ConditionType": "new"}
        }))
        .unwrap();

        assert_eq!(product.seller_sku, "TSHIRT-M");
        assert_eq!(product.quantity, 10);
        assert!(product.available);
        assert!((product.price - 19.9).abs() < f64::EPSILON);
        assert!((product.sale_price - 0.0).abs() < f64::EPSILON);
        assert_eq!(product.sale_start_date, None);
        assert_eq!(product.images.len(), 2);
        assert_eq!(product.categories, vec!["2", "3"]);
        assert!(product.browse_nodes.is_empty());
        assert_eq!(product.product_data["Gender"], "unisex");
    }

    #[test]
    fn test_single_image_and_empty_product_data() {
        let product: Product = serde_json::from_value(json!({
            "Images": {"Image": "https://img/1.jpg"},
            "ProductData": ""
        }))
        .unwrap();

        assert_eq!(product.images.to_vec(), vec!["https://img/1.jpg".to_string()]);
        assert!(product.product_data.is_empty());
    }

    #[test]
    fn test_category_tree_recurses() {
        let categories: Categories = serde_json::from_value(json!({
            "Category": [
                {
                    "Name": "Fashion",
                    "CategoryId": "1",
                    "Children": {
                        "Category": {
                            "Name": "Shoes",
                            "CategoryId": "2",
                            "Children": {"Category": [
                                {"Name": "Sneakers", "CategoryId": "3", "Children": ""},
                                {"Name": "Boots", "CategoryId": "4", "Children": ""}
                            ]}
                        }
                    }
                },
                {"Name": "Home", "CategoryId": "5", "Children": ""}
            ]
        }))
        .unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].children[0].children.len(), 2);
        assert_eq!(categories.find(4).map(|c| c.name.as_str()), Some("Boots"));
        assert!(categories.find(99).is_none());
        assert!(categories[1].children.is_empty());
    }

    #[test]
    fn test_attributes_with_options() {
        let attributes: Attributes = serde_json::from_value(json!({
            "Attribute": [
                {
                    "Name": "color",
                    "FeedName": "Color",
                    "IsMandatory": "1",
                    "MaxLength": "",
                    "Options": {"Option": {"Name": "Red", "IsDefault": "1"}}
                },
                {"Name": "size", "IsMandatory": "0", "Options": ""}
            ]
        }))
        .unwrap();

        assert_eq!(attributes.len(), 2);
        assert!(attributes[0].is_mandatory);
        assert_eq!(attributes[0].max_length, 0);
        assert_eq!(attributes[0].options.len(), 1);
        assert!(attributes[0].options[0].is_default);
        assert!(attributes[1].options.is_empty());
    }

    #[test]
    fn test_brands() {
        let brands: Brands = serde_json::from_value(json!({
            "Brand": {"BrandId": "7", "Name": "Acme", "GlobalIdentifier": "acme"}
        }))
        .unwrap();

        assert_eq!(brands[0].brand_id, 7);
        assert_eq!(brands[0].name, "Acme");
    }
}

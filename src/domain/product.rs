use crate::domain::coerce;
use crate::domain::ports::Resource;
use serde::{Deserialize, Serialize};

/// A product from the Products API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    #[serde(default)]
    pub aisle_locations: Vec<AisleLocation>,
    pub brand: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub upc: String,
    #[serde(rename = "productPageURI")]
    pub product_page_uri: String,
    pub temperature: Temperature,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_information: Option<ItemInformation>,
}

impl Product {
    pub fn temp_indicator(&self) -> &str {
        &self.temperature.indicator
    }

    pub fn heat_sensitive(&self) -> bool {
        self.temperature.heat_sensitive
    }

    pub fn depth(&self) -> Option<f64> {
        self.item_information.as_ref().and_then(|i| i.depth)
    }

    pub fn height(&self) -> Option<f64> {
        self.item_information.as_ref().and_then(|i| i.height)
    }

    pub fn width(&self) -> Option<f64> {
        self.item_information.as_ref().and_then(|i| i.width)
    }

    /// Image URL for the given perspective and size, e.g. `("front", "large")`.
    pub fn image_url(&self, perspective: &str, size: &str) -> Option<&str> {
        self.images
            .iter()
            .filter(|image| image.perspective == perspective)
            .flat_map(|image| image.sizes.iter())
            .find(|s| s.size == size)
            .map(|s| s.url.as_str())
    }
}

impl Resource for Product {
    const ENDPOINT: &'static str = "products";
    const NAME: &'static str = "product";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AisleLocation {
    #[serde(with = "coerce::int")]
    pub bay_number: i64,
    pub description: String,
    #[serde(with = "coerce::int")]
    pub number: i64,
    #[serde(with = "coerce::int")]
    pub number_of_facings: i64,
    pub side: String,
    #[serde(with = "coerce::int")]
    pub shelf_number: i64,
    #[serde(with = "coerce::int")]
    pub shelf_position_in_bay: i64,
    #[serde(
        default,
        with = "coerce::option_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence_number: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default)]
    pub curbside: bool,
    #[serde(default)]
    pub delivery: bool,
    #[serde(default)]
    pub in_store: bool,
    #[serde(default)]
    pub ship_to_home: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub regular: f64,
    pub promo: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_per_unit_estimate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_per_unit_estimate: Option<f64>,
}

impl Price {
    /// A promo of `0` means no promotion is running.
    pub fn is_on_promo(&self) -> bool {
        self.promo > 0.0 && self.promo < self.regular
    }

    pub fn effective(&self) -> f64 {
        if self.is_on_promo() {
            self.promo
        } else {
            self.regular
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub stock_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: String,
    #[serde(default)]
    pub favorite: bool,
    pub fulfillment: Fulfillment,
    pub size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Inventory>,
}

impl Item {
    /// `HIGH`, `LOW` or `TEMPORARILY_OUT_OF_STOCK` when a location was given.
    pub fn stock_level(&self) -> Option<&str> {
        self.inventory.as_ref().map(|i| i.stock_level.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub size: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub perspective: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default)]
    pub sizes: Vec<ImageSize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Temperature {
    pub indicator: String,
    pub heat_sensitive: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInformation {
    #[serde(
        default,
        with = "coerce::option_float",
        skip_serializing_if = "Option::is_none"
    )]
    pub depth: Option<f64>,
    #[serde(
        default,
        with = "coerce::option_float",
        skip_serializing_if = "Option::is_none"
    )]
    pub height: Option<f64>,
    #[serde(
        default,
        with = "coerce::option_float",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<f64>,
}

//! Open Graph metadata for product pages.

use common::CURRENCY_CODE;
use serde::Serialize;
use store::Product;

use crate::settings::SeoSettings;

/// Open Graph properties for a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "og:type")]
    pub og_type: &'static str,
    #[serde(rename = "og:title")]
    pub title: String,
    #[serde(rename = "og:description")]
    pub description: String,
    #[serde(rename = "og:url")]
    pub url: String,
    #[serde(rename = "og:image", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "og:site_name")]
    pub site_name: String,
    #[serde(rename = "product:price:amount")]
    pub price_amount: String,
    #[serde(rename = "product:price:currency")]
    pub price_currency: &'static str,
}

impl OpenGraph {
    /// Builds the properties for a product.
    pub fn for_product(settings: &SeoSettings, product: &Product) -> Self {
        Self {
            og_type: "product",
            title: format!("{} | {}", product.title, settings.site_name),
            description: product.description.clone().unwrap_or_else(|| {
                format!(
                    "Buy {} for {} with cash on delivery",
                    product.title, product.price
                )
            }),
            url: settings.url(&format!("/product/{}", product.id)),
            image: product.primary_image().map(str::to_string),
            site_name: settings.site_name.clone(),
            price_amount: product.price.rupees().to_string(),
            price_currency: CURRENCY_CODE,
        }
    }

    /// Returns `(property, content)` pairs in a stable order.
    pub fn properties(&self) -> Vec<(&'static str, &str)> {
        let mut props = vec![
            ("og:type", self.og_type),
            ("og:title", self.title.as_str()),
            ("og:description", self.description.as_str()),
            ("og:url", self.url.as_str()),
        ];
        if let Some(ref image) = self.image {
            props.push(("og:image", image.as_str()));
        }
        props.push(("og:site_name", self.site_name.as_str()));
        props.push(("product:price:amount", self.price_amount.as_str()));
        props.push(("product:price:currency", self.price_currency));
        props
    }
}

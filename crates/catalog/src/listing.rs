//! Read-side views returned by the catalog reader.

use domain::StockLevel;
use serde::Serialize;
use store::Product;

use crate::rating::RatingSummary;

/// A product as shown on the storefront.
///
/// `product.rating` and `product.review_count` carry the displayed values:
/// the freshly computed review aggregate when enrichment ran and succeeded,
/// the stored values otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogProduct {
    #[serde(flatten)]
    pub product: Product,
    pub stock_level: StockLevel,
}

impl CatalogProduct {
    /// Wraps a product with its stored rating.
    pub fn new(product: Product) -> Self {
        let stock_level = StockLevel::of(&product);
        Self {
            product,
            stock_level,
        }
    }

    pub fn rating(&self) -> f64 {
        self.product.rating
    }

    pub fn review_count(&self) -> i32 {
        self.product.review_count
    }
}

/// Everything the product page needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product: CatalogProduct,
    pub ratings: RatingSummary,
    /// Up to four other active products in the same category.
    pub related: Vec<CatalogProduct>,
}

/// A category with the number of active products carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// A category page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListing {
    pub name: String,
    pub slug: String,
    pub products: Vec<CatalogProduct>,
}

/// Turns a category label into its URL slug: `Smart Watches` → `smart-watches`.
pub fn category_slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Turns a URL slug back into a category label: `smart-watches` → `Smart Watches`.
///
/// Each word gets an upper-case first letter; the rest is kept as written.
pub fn category_name(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

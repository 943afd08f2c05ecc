//! schema.org structured data (JSON-LD).

use common::CURRENCY_CODE;
use domain::StockLevel;
use serde_json::{Value, json};
use store::Product;

use crate::settings::SeoSettings;

/// Builds the `Product` block for a product page.
///
/// `rating` and `review_count` are the displayed values. The
/// `AggregateRating` is only included when there is at least one review.
pub fn product_json_ld(
    settings: &SeoSettings,
    product: &Product,
    rating: f64,
    review_count: i32,
) -> Value {
    let url = settings.url(&format!("/product/{}", product.id));

    let mut doc = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": product.title,
        "description": product.description.as_deref().unwrap_or(&product.title),
        "image": product.image_urls,
        "category": product.category,
        "sku": product.id.to_string(),
        "offers": {
            "@type": "Offer",
            "price": product.price.rupees().to_string(),
            "priceCurrency": CURRENCY_CODE,
            "availability": StockLevel::of(product).schema_availability(),
            "url": url,
            "seller": {
                "@type": "Organization",
                "name": settings.site_name,
            },
        },
    });

    if review_count > 0 {
        doc["aggregateRating"] = json!({
            "@type": "AggregateRating",
            "ratingValue": rating,
            "reviewCount": review_count,
            "bestRating": 5,
            "worstRating": 1,
        });
    }
    doc
}

/// Builds the site-wide `Organization` block.
pub fn organization_json_ld(settings: &SeoSettings) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": settings.site_name,
        "url": settings.site_url,
        "logo": settings.logo_url(),
        "description": settings.description,
        "contactPoint": {
            "@type": "ContactPoint",
            "telephone": settings.telephone,
            "contactType": "Customer Service",
            "areaServed": "PK",
            "availableLanguage": ["English", "Urdu"],
        },
        "sameAs": settings.same_as,
    })
}

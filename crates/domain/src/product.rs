//! Product field rules shared by the admin mutator and the catalog.

use serde::{Deserialize, Serialize};
use store::{NewProduct, Product, ProductPatch};

use crate::ValidationError;

/// Maximum number of images a product may carry.
pub const MAX_PRODUCT_IMAGES: usize = 5;

/// Stock badge shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockLevel {
    /// More than ten units.
    InStock,
    /// One to ten units.
    LowStock,
    /// Nothing left; the order button is disabled.
    OutOfStock,
}

impl StockLevel {
    /// Classifies a stock count.
    pub fn from_quantity(stock_quantity: i32) -> Self {
        match stock_quantity {
            q if q > 10 => StockLevel::InStock,
            q if q > 0 => StockLevel::LowStock,
            _ => StockLevel::OutOfStock,
        }
    }

    /// Classifies a product's stock.
    pub fn of(product: &Product) -> Self {
        Self::from_quantity(product.stock_quantity)
    }

    /// Returns the schema.org availability URL for structured data.
    pub fn schema_availability(&self) -> &'static str {
        match self {
            StockLevel::InStock => "https://schema.org/InStock",
            StockLevel::LowStock => "https://schema.org/LimitedAvailability",
            StockLevel::OutOfStock => "https://schema.org/OutOfStock",
        }
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

fn check_images(image_urls: &[String]) -> Result<(), ValidationError> {
    if image_urls.len() > MAX_PRODUCT_IMAGES {
        return Err(ValidationError::TooManyImages {
            count: image_urls.len(),
            max: MAX_PRODUCT_IMAGES,
        });
    }
    Ok(())
}

fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::InvalidDefaultRating(rating));
    }
    Ok(())
}

/// Validates a product before insertion.
pub fn validate_new_product(product: &NewProduct) -> Result<(), ValidationError> {
    require_text(&product.title, "title")?;
    require_text(&product.category, "category")?;
    if !product.price.is_positive() {
        return Err(ValidationError::InvalidPrice(product.price.rupees()));
    }
    if product.stock_quantity < 0 {
        return Err(ValidationError::NegativeStock(product.stock_quantity));
    }
    check_rating(product.rating)?;
    check_images(&product.image_urls)
}

/// Validates the fields a patch sets.
pub fn validate_patch(patch: &ProductPatch) -> Result<(), ValidationError> {
    if let Some(ref title) = patch.title {
        require_text(title, "title")?;
    }
    if let Some(ref category) = patch.category {
        require_text(category, "category")?;
    }
    if let Some(price) = patch.price
        && !price.is_positive()
    {
        return Err(ValidationError::InvalidPrice(price.rupees()));
    }
    if let Some(stock) = patch.stock_quantity
        && stock < 0
    {
        return Err(ValidationError::NegativeStock(stock));
    }
    if let Some(rating) = patch.rating {
        check_rating(rating)?;
    }
    if let Some(ref images) = patch.image_urls {
        check_images(images)?;
    }
    Ok(())
}

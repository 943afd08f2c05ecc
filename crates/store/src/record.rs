//! Typed rows for the `products`, `orders` and `reviews` collections.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use common::{Money, OrderId, OrderStatus, ProductId, ReviewId};
use serde::{Deserialize, Serialize};

/// Free-form product specifications (e.g. `"Battery": "5000mAh"`).
pub type Specifications = BTreeMap<String, serde_json::Value>;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub image_urls: Vec<String>,
    pub category: String,
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Specifications,
    pub stock_quantity: i32,
    pub is_active: bool,
    /// Stored default rating, shown when a product has no reviews.
    pub rating: f64,
    pub review_count: i32,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the first image that is an absolute URL, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls
            .first()
            .map(String::as_str)
            .filter(|url| url.starts_with("http"))
    }

    /// Returns true if the product can currently be ordered.
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}

/// Fields for a product about to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub is_featured: bool,
}

fn default_true() -> bool {
    true
}

impl NewProduct {
    /// Creates an active, unfeatured product with no images or stock.
    pub fn new(title: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            image_urls: Vec::new(),
            category: category.into(),
            description: None,
            specifications: Specifications::new(),
            stock_quantity: 0,
            is_active: true,
            rating: 0.0,
            is_featured: false,
        }
    }

    /// Sets the stock count.
    pub fn with_stock(mut self, stock_quantity: i32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    /// Sets the stored default rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the active flag.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Sets the featured flag.
    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the image URLs.
    pub fn with_images(mut self, image_urls: Vec<String>) -> Self {
        self.image_urls = image_urls;
        self
    }

    /// Builds the stored row once the backend has assigned an id and timestamp.
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            image_urls: self.image_urls,
            category: self.category,
            description: self.description,
            specifications: self.specifications,
            stock_quantity: self.stock_quantity,
            is_active: self.is_active,
            rating: self.rating,
            review_count: 0,
            is_featured: self.is_featured,
            created_at,
        }
    }
}

/// A partial update to a product. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<Money>,
    pub image_urls: Option<Vec<String>>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub specifications: Option<Specifications>,
    pub stock_quantity: Option<i32>,
    pub is_active: Option<bool>,
    pub rating: Option<f64>,
    pub is_featured: Option<bool>,
}

impl ProductPatch {
    /// A patch that only flips the active flag.
    pub fn set_active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Default::default()
        }
    }

    /// A patch that only replaces the image list.
    pub fn set_images(image_urls: Vec<String>) -> Self {
        Self {
            image_urls: Some(image_urls),
            ..Default::default()
        }
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the patch to a product in place.
    pub fn apply(self, product: &mut Product) {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image_urls) = self.image_urls {
            product.image_urls = image_urls;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(specifications) = self.specifications {
            product.specifications = specifications;
        }
        if let Some(stock_quantity) = self.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if let Some(is_active) = self.is_active {
            product.is_active = is_active;
        }
        if let Some(rating) = self.rating {
            product.rating = rating;
        }
        if let Some(is_featured) = self.is_featured {
            product.is_featured = is_featured;
        }
    }
}

/// A cash-on-delivery order. Product fields are a snapshot taken at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub product_id: ProductId,
    pub product_title: String,
    pub product_price: Money,
    pub quantity: u32,
    pub total_amount: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields for an order about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub product_id: ProductId,
    pub product_title: String,
    pub product_price: Money,
    pub quantity: u32,
    pub total_amount: Money,
    pub status: OrderStatus,
}

impl NewOrder {
    /// Builds the stored row once the backend has assigned an id and timestamp.
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            phone: self.phone,
            city: self.city,
            address: self.address,
            product_id: self.product_id,
            product_title: self.product_title,
            product_price: self.product_price,
            quantity: self.quantity,
            total_amount: self.total_amount,
            status: self.status,
            created_at,
        }
    }
}

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub customer_name: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: Option<String>,
    pub verified_purchase: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for a review about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub product_id: ProductId,
    pub customer_name: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub verified_purchase: bool,
}

impl NewReview {
    /// Builds the stored row once the backend has assigned an id and timestamp.
    pub fn into_review(self, id: ReviewId, created_at: DateTime<Utc>) -> Review {
        Review {
            id,
            product_id: self.product_id,
            customer_name: self.customer_name,
            rating: self.rating,
            comment: self.comment,
            verified_purchase: self.verified_purchase,
            created_at,
        }
    }
}

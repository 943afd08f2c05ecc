//! Domain error types.

use common::{OrderId, ProductId};
use store::StoreError;
use thiserror::Error;

/// A rule violated by caller input. Raised before any store call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Phone number is not a regional mobile number.
    #[error("Invalid phone number {0:?}: expected 03XXXXXXXXX or +923XXXXXXXXX")]
    InvalidPhone(String),

    /// A required text field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Quantity outside `1..=MAX_ORDER_QUANTITY`.
    #[error("Invalid quantity: {0} (must be between 1 and {max})", max = crate::order::MAX_ORDER_QUANTITY)]
    InvalidQuantity(u32),

    /// Review rating outside 1..=5.
    #[error("Invalid rating: {0} (must be between 1 and 5)")]
    InvalidRating(u8),

    /// Product price must be positive.
    #[error("Invalid price: {0} (must be greater than 0)")]
    InvalidPrice(i64),

    /// Stored default rating outside 0..=5.
    #[error("Invalid default rating: {0} (must be between 0 and 5)")]
    InvalidDefaultRating(f64),

    /// Stock cannot be negative.
    #[error("Invalid stock quantity: {0} (must not be negative)")]
    NegativeStock(i32),

    /// Too many product images.
    #[error("Too many images: {count} (at most {max})")]
    TooManyImages { count: usize, max: usize },

    /// Order total does not fit the money type.
    #[error("Order total overflows")]
    TotalOverflow,
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Caller input failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The product does not exist or is not for sale.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The product has no stock left.
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// A delete was requested without confirmation.
    #[error("Deleting product {0} requires confirmation")]
    DeleteNotConfirmed(ProductId),

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Maps a store `NotFound` for a product to `ProductNotFound`.
    pub(crate) fn for_product(err: StoreError, id: ProductId) -> Self {
        if err.is_not_found() {
            DomainError::ProductNotFound(id)
        } else {
            DomainError::Store(err)
        }
    }

    /// Maps a store `NotFound` for an order to `OrderNotFound`.
    pub(crate) fn for_order(err: StoreError, id: OrderId) -> Self {
        if err.is_not_found() {
            DomainError::OrderNotFound(id)
        } else {
            DomainError::Store(err)
        }
    }
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;

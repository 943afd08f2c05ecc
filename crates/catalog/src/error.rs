//! Catalog error types.

use common::ProductId;
use thiserror::Error;

/// Errors that can occur while reading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product does not exist or is hidden from the storefront.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// No active product carries the category.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),
}

/// A sort key string that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort key: {0:?}")]
pub struct UnknownSortKey(pub String);

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

//! Catalog read side for the storefront.
//!
//! This crate provides:
//! - [`CatalogQuery`] and [`SortKey`] for filtered, sorted listings
//! - [`CatalogReader`] for listings, product pages, categories and reviews
//! - Rating enrichment: per-product review reads issued concurrently, with
//!   the stored rating kept when a read fails

pub mod error;
pub mod listing;
pub mod query;
pub mod rating;
pub mod reader;

pub use error::{CatalogError, Result, UnknownSortKey};
pub use listing::{
    CatalogProduct, CategoryListing, CategorySummary, ProductDetail, category_name, category_slug,
};
pub use query::{CatalogQuery, SortKey};
pub use rating::{RatingSummary, StarCount, average_rating};
pub use reader::{CatalogReader, RELATED_LIMIT};

use async_trait::async_trait;
use common::{OrderId, OrderStatus, ProductId};

use crate::{
    NewOrder, NewProduct, NewReview, Order, Product, ProductPatch, ProductQuery, Result, Review,
    StoreError,
};

/// Core trait for row storage backends.
///
/// One method per backend call the storefront makes. Every call is an
/// independent single-row or single-query operation; there are no
/// transactions spanning calls and no version checks, so the last write wins.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a product, assigning its id and creation time.
    async fn insert_product(&self, product: NewProduct) -> Result<Product>;

    /// Retrieves a product by id. Returns None if it doesn't exist.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Retrieves products matching a query, in the query's order.
    async fn query_products(&self, query: &ProductQuery) -> Result<Vec<Product>>;

    /// Counts products matching a query. Ordering and limit are ignored.
    async fn count_products(&self, query: &ProductQuery) -> Result<u64>;

    /// Applies a partial update and returns the updated row.
    ///
    /// Fails with `NotFound` if the product doesn't exist.
    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product>;

    /// Hard-deletes a product. Fails with `NotFound` if it doesn't exist.
    async fn delete_product(&self, id: ProductId) -> Result<()>;

    /// Inserts an order, assigning its id and creation time.
    async fn insert_order(&self, order: NewOrder) -> Result<Order>;

    /// Retrieves an order by id. Returns None if it doesn't exist.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Retrieves all orders, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Overwrites the status of an order and returns the updated row.
    ///
    /// Fails with `NotFound` if the order doesn't exist.
    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Result<Order>;

    /// Inserts a review, assigning its id and creation time.
    async fn insert_review(&self, review: NewReview) -> Result<Review>;

    /// Retrieves the reviews of a product, newest first.
    async fn reviews_for_product(&self, product_id: ProductId) -> Result<Vec<Review>>;
}

/// Extension trait providing convenience methods for stores.
#[async_trait]
pub trait StoreExt: Store {
    /// Loads a product or fails with `NotFound`.
    async fn require_product(&self, id: ProductId) -> Result<Product> {
        self.get_product(id)
            .await?
            .ok_or(StoreError::NotFound {
                collection: "products",
                id: id.as_i64(),
            })
    }

    /// Loads an order or fails with `NotFound`.
    async fn require_order(&self, id: OrderId) -> Result<Order> {
        self.get_order(id).await?.ok_or(StoreError::NotFound {
            collection: "orders",
            id: id.as_i64(),
        })
    }

    /// Returns only the star ratings of a product's reviews.
    async fn review_ratings(&self, product_id: ProductId) -> Result<Vec<u8>> {
        Ok(self
            .reviews_for_product(product_id)
            .await?
            .into_iter()
            .map(|review| review.rating)
            .collect())
    }
}

// Blanket implementation for all Store implementations
impl<T: Store + ?Sized> StoreExt for T {}

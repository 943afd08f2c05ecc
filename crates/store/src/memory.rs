use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{OrderId, OrderStatus, ProductId, ReviewId};
use tokio::sync::RwLock;

use crate::{
    NewOrder, NewProduct, NewReview, Order, Product, ProductPatch, ProductQuery, Result, Review,
    StoreError, store::Store,
};

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    orders: BTreeMap<OrderId, Order>,
    reviews: Vec<Review>,
    next_product_id: i64,
    next_order_id: i64,
    next_review_id: i64,
    failing_review_reads: HashSet<ProductId>,
    fail_order_inserts: bool,
}

/// In-memory store implementation for tests and local runs.
///
/// Provides the same interface as the PostgreSQL implementation, plus
/// switches to simulate backend failures.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.tables.read().await.products.len()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.tables.read().await.orders.len()
    }

    /// Makes review reads for the given product fail until cleared.
    pub async fn fail_review_reads_for(&self, product_id: ProductId) {
        self.tables
            .write()
            .await
            .failing_review_reads
            .insert(product_id);
    }

    /// Configures order inserts to fail.
    pub async fn set_fail_on_insert_order(&self, fail: bool) {
        self.tables.write().await.fail_order_inserts = fail;
    }
}

fn not_found(collection: &'static str, id: i64) -> StoreError {
    StoreError::NotFound { collection, id }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product> {
        let mut tables = self.tables.write().await;
        tables.next_product_id += 1;
        let id = ProductId::new(tables.next_product_id);
        let product = product.into_product(id, Utc::now());
        tables.products.insert(id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn query_products(&self, query: &ProductQuery) -> Result<Vec<Product>> {
        let tables = self.tables.read().await;
        let mut products: Vec<_> = tables
            .products
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        products.sort_by(|a, b| query.compare(a, b));

        if let Some(limit) = query.limit {
            products.truncate(limit);
        }
        Ok(products)
    }

    async fn count_products(&self, query: &ProductQuery) -> Result<u64> {
        let tables = self.tables.read().await;
        Ok(tables.products.values().filter(|p| query.matches(p)).count() as u64)
    }

    async fn update_product(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| not_found("products", id.as_i64()))?;
        patch.apply(product);
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found("products", id.as_i64()))
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order> {
        let mut tables = self.tables.write().await;
        if tables.fail_order_inserts {
            return Err(StoreError::Unavailable("orders insert rejected".to_string()));
        }
        tables.next_order_id += 1;
        let id = OrderId::new(tables.next_order_id);
        let order = order.into_order(id, Utc::now());
        tables.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let tables = self.tables.read().await;
        let mut orders: Vec<_> = tables.orders.values().cloned().collect();
        orders.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(orders)
    }

    async fn update_order_status(&self, id: OrderId, status: OrderStatus) -> Result<Order> {
        let mut tables = self.tables.write().await;
        let order = tables
            .orders
            .get_mut(&id)
            .ok_or_else(|| not_found("orders", id.as_i64()))?;
        order.status = status;
        Ok(order.clone())
    }

    async fn insert_review(&self, review: NewReview) -> Result<Review> {
        let mut tables = self.tables.write().await;
        tables.next_review_id += 1;
        let review = review.into_review(ReviewId::new(tables.next_review_id), Utc::now());
        tables.reviews.push(review.clone());
        Ok(review)
    }

    async fn reviews_for_product(&self, product_id: ProductId) -> Result<Vec<Review>> {
        let tables = self.tables.read().await;
        if tables.failing_review_reads.contains(&product_id) {
            return Err(StoreError::Unavailable(format!(
                "reviews read failed for product {product_id}"
            )));
        }
        let mut reviews: Vec<_> = tables
            .reviews
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use common::Money;

    use super::*;
    use crate::{Direction, ProductColumn, StoreExt};

    fn new_order(product: &Product, quantity: u32) -> NewOrder {
        NewOrder {
            customer_name: "Ali Khan".to_string(),
            phone: "03001234567".to_string(),
            city: "Lahore".to_string(),
            address: "House 1, Street 2".to_string(),
            product_id: product.id,
            product_title: product.title.clone(),
            product_price: product.price,
            quantity,
            total_amount: Money::from_rupees(product.price.rupees() * i64::from(quantity)),
            status: OrderStatus::Pending,
        }
    }

    fn new_review(product_id: ProductId, rating: u8) -> NewReview {
        NewReview {
            product_id,
            customer_name: "Sara".to_string(),
            rating,
            comment: Some("Good".to_string()),
            verified_purchase: false,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let a = store
            .insert_product(NewProduct::new("A", Money::from_rupees(100), "Audio"))
            .await
            .unwrap();
        let b = store
            .insert_product(NewProduct::new("B", Money::from_rupees(200), "Audio"))
            .await
            .unwrap();

        assert_eq!(a.id, ProductId::new(1));
        assert_eq!(b.id, ProductId::new(2));
        assert_eq!(store.product_count().await, 2);
    }

    #[tokio::test]
    async fn query_filters_orders_and_limits() {
        let store = InMemoryStore::new();
        for (title, price, active) in [("A", 300, true), ("B", 100, true), ("C", 200, false)] {
            store
                .insert_product(
                    NewProduct::new(title, Money::from_rupees(price), "Audio").active(active),
                )
                .await
                .unwrap();
        }

        let query = ProductQuery::new()
            .is_active(true)
            .order_by(ProductColumn::Price, Direction::Ascending);
        let products = store.query_products(&query).await.unwrap();
        let titles: Vec<_> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);

        let limited = store.query_products(&query.clone().limit(1)).await.unwrap();
        assert_eq!(limited.len(), 1);

        assert_eq!(store.count_products(&query).await.unwrap(), 2);
        assert_eq!(store.count_products(&ProductQuery::new()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn update_and_delete_missing_product_fail() {
        let store = InMemoryStore::new();
        let err = store
            .update_product(ProductId::new(9), ProductPatch::set_active(false))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = store.delete_product(ProductId::new(9)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn orders_list_newest_first_and_status_overwrites() {
        let store = InMemoryStore::new();
        let product = store
            .insert_product(NewProduct::new("Watch", Money::from_rupees(3000), "Watches"))
            .await
            .unwrap();

        let first = store.insert_order(new_order(&product, 1)).await.unwrap();
        let second = store.insert_order(new_order(&product, 2)).await.unwrap();

        let orders = store.list_orders().await.unwrap();
        assert_eq!(orders[0].id, second.id);
        assert_eq!(orders[1].id, first.id);

        let updated = store
            .update_order_status(first.id, OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Delivered);

        // Any status can follow any other.
        let reverted = store
            .update_order_status(first.id, OrderStatus::Pending)
            .await
            .unwrap();
        assert_eq!(reverted.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn failing_order_insert() {
        let store = InMemoryStore::new();
        let product = store
            .insert_product(NewProduct::new("Watch", Money::from_rupees(3000), "Watches"))
            .await
            .unwrap();
        store.set_fail_on_insert_order(true).await;

        let result = store.insert_order(new_order(&product, 1)).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn reviews_are_scoped_to_product() {
        let store = InMemoryStore::new();
        let p1 = ProductId::new(1);
        let p2 = ProductId::new(2);
        store.insert_review(new_review(p1, 5)).await.unwrap();
        store.insert_review(new_review(p1, 3)).await.unwrap();
        store.insert_review(new_review(p2, 1)).await.unwrap();

        let mut ratings = store.review_ratings(p1).await.unwrap();
        ratings.sort_unstable();
        assert_eq!(ratings, vec![3, 5]);

        store.fail_review_reads_for(p2).await;
        assert!(store.reviews_for_product(p2).await.is_err());
        assert!(store.reviews_for_product(p1).await.is_ok());
    }

    #[tokio::test]
    async fn require_helpers_report_not_found() {
        let store = InMemoryStore::new();
        assert!(
            store
                .require_product(ProductId::new(1))
                .await
                .unwrap_err()
                .is_not_found()
        );
        assert!(
            store
                .require_order(OrderId::new(1))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }
}

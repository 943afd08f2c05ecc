//! Integration tests for the order writer against the in-memory store.

use domain::{DomainError, OrderDraft, OrderService, ValidationError};
use store::{
    InMemoryStore, Money, NewProduct, OrderStatus, ProductId, ProductPatch, Store, StoreExt,
};

async fn store_with_watch(stock: i32) -> (InMemoryStore, ProductId) {
    let store = InMemoryStore::new();
    let product = store
        .insert_product(
            NewProduct::new("Smart Watch", Money::from_rupees(3000), "Watches").with_stock(stock),
        )
        .await
        .unwrap();
    (store, product.id)
}

fn draft(product_id: ProductId, phone: &str, quantity: u32) -> OrderDraft {
    OrderDraft {
        customer_name: "Ali Khan".to_string(),
        phone: phone.to_string(),
        city: "Lahore".to_string(),
        address: "House 1, Street 2, Model Town".to_string(),
        product_id,
        quantity,
    }
}

#[tokio::test]
async fn places_pending_order_with_snapshot_total() {
    let (store, product_id) = store_with_watch(10).await;
    let service = OrderService::new(store.clone());

    let confirmation = service
        .place_order(draft(product_id, "03001234567", 2))
        .await
        .unwrap();

    let order = &confirmation.order;
    assert_eq!(order.total_amount, Money::from_rupees(6000));
    assert_eq!(order.product_price, Money::from_rupees(3000));
    assert_eq!(order.product_title, "Smart Watch");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(confirmation.redirect_to, "/order-success");
    assert_eq!(confirmation.redirect_after_ms, 2000);
    assert_eq!(store.order_count().await, 1);

    // Stock is not decremented by orders.
    let product = store.require_product(product_id).await.unwrap();
    assert_eq!(product.stock_quantity, 10);
}

#[tokio::test]
async fn later_price_edits_do_not_change_existing_orders() {
    let (store, product_id) = store_with_watch(10).await;
    let service = OrderService::new(store.clone());

    let order = service
        .place_order(draft(product_id, "+923001234567", 1))
        .await
        .unwrap()
        .order;

    store
        .update_product(
            product_id,
            ProductPatch {
                price: Some(Money::from_rupees(4500)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let stored = store.require_order(order.id).await.unwrap();
    assert_eq!(stored.product_price, Money::from_rupees(3000));
    assert_eq!(stored.total_amount, Money::from_rupees(3000));
}

#[tokio::test]
async fn invalid_phone_never_reaches_the_store() {
    let store = InMemoryStore::new();
    let service = OrderService::new(store.clone());

    // The product does not exist either; validation must win.
    let err = service
        .place_order(draft(ProductId::new(404), "0300123456", 1))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::InvalidPhone(_))
    ));
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn unknown_and_inactive_products_are_not_found() {
    let (store, product_id) = store_with_watch(5).await;
    let service = OrderService::new(store.clone());

    let err = service
        .place_order(draft(ProductId::new(99), "03001234567", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProductNotFound(_)));

    store
        .update_product(product_id, ProductPatch::set_active(false))
        .await
        .unwrap();
    let err = service
        .place_order(draft(product_id, "03001234567", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProductNotFound(id) if id == product_id));
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn out_of_stock_products_cannot_be_ordered() {
    let (store, product_id) = store_with_watch(0).await;
    let service = OrderService::new(store.clone());

    let err = service
        .place_order(draft(product_id, "03001234567", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::OutOfStock(_)));
}

#[tokio::test]
async fn insert_failure_surfaces_as_store_error() {
    let (store, product_id) = store_with_watch(3).await;
    store.set_fail_on_insert_order(true).await;
    let service = OrderService::new(store.clone());

    let err = service
        .place_order(draft(product_id, "03001234567", 1))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Store(_)));
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn duplicate_submissions_store_two_orders() {
    let (store, product_id) = store_with_watch(3).await;
    let service = OrderService::new(store.clone());

    let first = service
        .place_order(draft(product_id, "03001234567", 1))
        .await
        .unwrap();
    let second = service
        .place_order(draft(product_id, "03001234567", 1))
        .await
        .unwrap();

    assert_ne!(first.order.id, second.order.id);
    assert_eq!(store.order_count().await, 2);
}

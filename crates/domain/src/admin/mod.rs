//! Admin mutations over products and orders.
//!
//! Every mutation is a single independent store call followed by a re-fetch
//! of the affected collection, which is handed back to the caller so the
//! back office always renders current rows. Access is checked by the caller
//! against an [`AdminPolicy`] before any of these run.

mod access;
mod images;

use std::sync::Arc;

use common::{OrderId, OrderStatus, ProductId};
use serde::Serialize;
use store::{
    Direction, NewProduct, ObjectStore, Order, Product, ProductColumn, ProductPatch, ProductQuery,
    Store, StoreExt,
};

use crate::error::{DomainError, Result};
use crate::product::{validate_new_product, validate_patch};

pub use access::{AccessError, AdminPolicy};
pub use images::{ImageUpload, UploadReport};

/// A mutated row together with its re-fetched collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Refreshed<T> {
    /// The row the mutation touched; `None` after a delete.
    pub changed: Option<T>,
    pub items: Vec<T>,
}

/// Service for back-office operations.
pub struct AdminService<S: Store> {
    store: S,
    objects: Arc<dyn ObjectStore>,
}

impl<S: Store> AdminService<S> {
    /// Creates a new admin service over the given row and object stores.
    pub fn new(store: S, objects: Arc<dyn ObjectStore>) -> Self {
        Self { store, objects }
    }

    /// Returns all orders, newest first.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        Ok(self.store.list_orders().await?)
    }

    /// Returns one order.
    pub async fn get_order(&self, id: OrderId) -> Result<Order> {
        self.store
            .require_order(id)
            .await
            .map_err(|e| DomainError::for_order(e, id))
    }

    /// Returns all products, inactive ones included, newest first.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self
            .store
            .query_products(
                &ProductQuery::new().order_by(ProductColumn::CreatedAt, Direction::Descending),
            )
            .await?)
    }

    /// Overwrites an order's status. Any status may follow any other.
    #[tracing::instrument(skip(self))]
    pub async fn set_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Refreshed<Order>> {
        let order = self
            .store
            .update_order_status(id, status)
            .await
            .map_err(|e| DomainError::for_order(e, id))?;
        record_mutation("set_order_status");
        tracing::info!(order_id = %id, status = %status, "order status updated");

        Ok(Refreshed {
            changed: Some(order),
            items: self.list_orders().await?,
        })
    }

    /// Adds a product to the catalog.
    #[tracing::instrument(skip(self, product), fields(title = %product.title))]
    pub async fn create_product(&self, product: NewProduct) -> Result<Refreshed<Product>> {
        validate_new_product(&product)?;
        let product = self.store.insert_product(product).await?;
        record_mutation("create_product");
        tracing::info!(product_id = %product.id, "product created");

        self.refreshed(Some(product)).await
    }

    /// Applies a validated partial edit to a product.
    #[tracing::instrument(skip(self, patch))]
    pub async fn edit_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Refreshed<Product>> {
        validate_patch(&patch)?;
        let product = self
            .store
            .update_product(id, patch)
            .await
            .map_err(|e| DomainError::for_product(e, id))?;
        record_mutation("edit_product");

        self.refreshed(Some(product)).await
    }

    /// Flips a product's active flag. Inactive products disappear from the
    /// storefront but stay in the admin list.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_product_active(&self, id: ProductId) -> Result<Refreshed<Product>> {
        let current = self
            .store
            .require_product(id)
            .await
            .map_err(|e| DomainError::for_product(e, id))?;
        let product = self
            .store
            .update_product(id, ProductPatch::set_active(!current.is_active))
            .await
            .map_err(|e| DomainError::for_product(e, id))?;
        record_mutation("toggle_product_active");
        tracing::info!(product_id = %id, is_active = product.is_active, "product visibility changed");

        self.refreshed(Some(product)).await
    }

    /// Hard-deletes a product. Refused unless `confirmed` is set.
    ///
    /// Existing orders keep their product snapshot.
    #[tracing::instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId, confirmed: bool) -> Result<Refreshed<Product>> {
        if !confirmed {
            return Err(DomainError::DeleteNotConfirmed(id));
        }
        self.store
            .delete_product(id)
            .await
            .map_err(|e| DomainError::for_product(e, id))?;
        record_mutation("delete_product");
        tracing::info!(product_id = %id, "product deleted");

        self.refreshed(None).await
    }

    /// Uploads a batch of images and appends their URLs to the product.
    ///
    /// The product never holds more than five images: files past the limit
    /// are ignored. A failed upload is logged and skipped without aborting
    /// the rest of the batch.
    #[tracing::instrument(skip(self, files), fields(files = files.len()))]
    pub async fn upload_images(
        &self,
        id: ProductId,
        files: Vec<ImageUpload>,
    ) -> Result<UploadReport> {
        let product = self
            .store
            .require_product(id)
            .await
            .map_err(|e| DomainError::for_product(e, id))?;

        let (accepted, overflow) = images::split_at_capacity(product.image_urls.len(), files);
        if !overflow.is_empty() {
            tracing::warn!(
                ignored = overflow.len(),
                existing = product.image_urls.len(),
                "image limit reached, ignoring extra files"
            );
        }

        let mut uploaded = Vec::with_capacity(accepted.len());
        let mut failed = Vec::new();
        for file in accepted {
            let key = file.object_key(id);
            match self.objects.put(&key, file.bytes, &file.content_type).await {
                Ok(()) => uploaded.push(self.objects.public_url(&key)),
                Err(e) => {
                    tracing::warn!(file = %file.file_name, error = %e, "image upload failed, skipping");
                    failed.push(file.file_name);
                }
            }
        }

        let product = if uploaded.is_empty() {
            product
        } else {
            let mut image_urls = product.image_urls;
            image_urls.extend(uploaded.iter().cloned());
            let updated = self
                .store
                .update_product(id, ProductPatch::set_images(image_urls))
                .await
                .map_err(|e| DomainError::for_product(e, id))?;
            metrics::counter!("product_images_uploaded_total").increment(uploaded.len() as u64);
            record_mutation("upload_images");
            updated
        };

        Ok(UploadReport {
            product,
            uploaded,
            failed,
            ignored: overflow.into_iter().map(|f| f.file_name).collect(),
        })
    }

    async fn refreshed(&self, changed: Option<Product>) -> Result<Refreshed<Product>> {
        Ok(Refreshed {
            changed,
            items: self.list_products().await?,
        })
    }
}

fn record_mutation(operation: &'static str) {
    metrics::counter!("admin_mutations_total", "operation" => operation).increment(1);
}

#[cfg(test)]
mod tests {
    use common::Money;
    use store::{InMemoryObjectStore, InMemoryStore, NewOrder};

    use super::*;
    use crate::ValidationError;

    struct Fixture {
        store: InMemoryStore,
        objects: InMemoryObjectStore,
        service: AdminService<InMemoryStore>,
    }

    fn fixture() -> Fixture {
        let store = InMemoryStore::new();
        let objects = InMemoryObjectStore::new(
            "https://cdn.example/storage/v1/object/public",
            "product-images",
        );
        let service = AdminService::new(store.clone(), Arc::new(objects.clone()));
        Fixture {
            store,
            objects,
            service,
        }
    }

    fn watch() -> NewProduct {
        NewProduct::new("Smart Watch", Money::from_rupees(3000), "Watches").with_stock(5)
    }

    #[tokio::test]
    async fn create_validates_and_refetches() {
        let f = fixture();
        let refreshed = f.service.create_product(watch()).await.unwrap();
        assert_eq!(refreshed.items.len(), 1);
        assert_eq!(refreshed.changed.unwrap().title, "Smart Watch");

        let err = f
            .service
            .create_product(NewProduct::new("", Money::from_rupees(10), "Watches"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationError::MissingField("title"))
        ));
        assert_eq!(f.store.product_count().await, 1);
    }

    #[tokio::test]
    async fn toggle_flips_active_and_keeps_product_listed() {
        let f = fixture();
        let product = f.store.insert_product(watch()).await.unwrap();

        let refreshed = f.service.toggle_product_active(product.id).await.unwrap();
        assert!(!refreshed.changed.unwrap().is_active);
        assert_eq!(refreshed.items.len(), 1);

        let refreshed = f.service.toggle_product_active(product.id).await.unwrap();
        assert!(refreshed.changed.unwrap().is_active);
    }

    #[tokio::test]
    async fn edit_rejects_invalid_patch() {
        let f = fixture();
        let product = f.store.insert_product(watch()).await.unwrap();

        let err = f
            .service
            .edit_product(
                product.id,
                ProductPatch {
                    stock_quantity: Some(-1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let refreshed = f
            .service
            .edit_product(
                product.id,
                ProductPatch {
                    price: Some(Money::from_rupees(2500)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(refreshed.items[0].price, Money::from_rupees(2500));
    }

    #[tokio::test]
    async fn edit_missing_product_is_not_found() {
        let f = fixture();
        let err = f
            .service
            .edit_product(ProductId::new(9), ProductPatch::set_active(true))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let f = fixture();
        let product = f.store.insert_product(watch()).await.unwrap();

        let err = f
            .service
            .delete_product(product.id, false)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DeleteNotConfirmed(_)));
        assert_eq!(f.store.product_count().await, 1);

        let refreshed = f.service.delete_product(product.id, true).await.unwrap();
        assert!(refreshed.changed.is_none());
        assert!(refreshed.items.is_empty());
    }

    #[tokio::test]
    async fn status_changes_are_unrestricted() {
        let f = fixture();
        let order = f
            .store
            .insert_order(NewOrder {
                customer_name: "Ali".to_string(),
                phone: "03001234567".to_string(),
                city: "Lahore".to_string(),
                address: "Street 1".to_string(),
                product_id: ProductId::new(1),
                product_title: "Smart Watch".to_string(),
                product_price: Money::from_rupees(3000),
                quantity: 1,
                total_amount: Money::from_rupees(3000),
                status: OrderStatus::Pending,
            })
            .await
            .unwrap();

        for status in [
            OrderStatus::Delivered,
            OrderStatus::Pending,
            OrderStatus::OrderedOnMarketplace,
        ] {
            let refreshed = f.service.set_order_status(order.id, status).await.unwrap();
            assert_eq!(refreshed.items[0].status, status);
        }

        let err = f
            .service
            .set_order_status(OrderId::new(99), OrderStatus::Shipped)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::OrderNotFound(_)));
    }

    #[tokio::test]
    async fn upload_caps_batch_at_five_images() {
        let f = fixture();
        let product = f
            .store
            .insert_product(watch().with_images(vec![
                "https://cdn.example/a.png".to_string(),
                "https://cdn.example/b.png".to_string(),
            ]))
            .await
            .unwrap();

        let files: Vec<_> = (0..5)
            .map(|i| ImageUpload::new(format!("{i}.png"), "image/png", vec![0; 4]))
            .collect();
        let report = f.service.upload_images(product.id, files).await.unwrap();

        assert_eq!(report.uploaded.len(), 3);
        assert_eq!(report.ignored, vec!["3.png", "4.png"]);
        assert_eq!(report.product.image_urls.len(), 5);
        assert!(report.uploaded[0].starts_with(
            "https://cdn.example/storage/v1/object/public/product-images/1/"
        ));
        assert_eq!(f.objects.object_count().await, 3);
    }

    #[tokio::test]
    async fn failed_uploads_are_skipped() {
        let f = fixture();
        let product = f.store.insert_product(watch()).await.unwrap();
        f.objects.set_max_object_bytes(10).await;

        let files = vec![
            ImageUpload::new("small.png", "image/png", vec![0; 4]),
            ImageUpload::new("huge.png", "image/png", vec![0; 64]),
            ImageUpload::new("other.jpg", "image/jpeg", vec![0; 8]),
        ];
        let report = f.service.upload_images(product.id, files).await.unwrap();

        assert_eq!(report.uploaded.len(), 2);
        assert_eq!(report.failed, vec!["huge.png"]);
        assert_eq!(report.product.image_urls, report.uploaded);
    }

    #[tokio::test]
    async fn upload_to_missing_product_is_not_found() {
        let f = fixture();
        let err = f
            .service
            .upload_images(
                ProductId::new(5),
                vec![ImageUpload::new("a.png", "image/png", vec![1])],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(_)));
        assert_eq!(f.objects.object_count().await, 0);
    }
}

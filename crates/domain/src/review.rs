//! Customer reviews.

use common::ProductId;
use serde::{Deserialize, Serialize};
use store::{NewReview, Review, Store};

use crate::error::{DomainError, Result, ValidationError};

/// A review as submitted from the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub customer_name: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    /// Checks the review fields.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::MissingField("customer_name"));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::InvalidRating(self.rating));
        }
        if self.comment.trim().is_empty() {
            return Err(ValidationError::MissingField("comment"));
        }
        Ok(())
    }
}

/// Service for writing product reviews.
pub struct ReviewService<S: Store> {
    store: S,
}

impl<S: Store> ReviewService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stores a review for a product that is for sale.
    ///
    /// Reviews left from the product page are never marked as verified
    /// purchases.
    #[tracing::instrument(skip(self, draft), fields(rating = draft.rating))]
    pub async fn submit(&self, product_id: ProductId, draft: ReviewDraft) -> Result<Review> {
        draft.validate()?;

        self.store
            .get_product(product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(DomainError::ProductNotFound(product_id))?;

        let review = self
            .store
            .insert_review(NewReview {
                product_id,
                customer_name: draft.customer_name.trim().to_string(),
                rating: draft.rating,
                comment: Some(draft.comment.trim().to_string()),
                verified_purchase: false,
            })
            .await?;

        metrics::counter!("reviews_submitted_total").increment(1);
        tracing::info!(review_id = %review.id, "review submitted");
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use common::Money;
    use store::{InMemoryStore, NewProduct};

    use super::*;

    fn draft(rating: u8) -> ReviewDraft {
        ReviewDraft {
            customer_name: "Sara".to_string(),
            rating,
            comment: "Great value".to_string(),
        }
    }

    #[test]
    fn rating_must_be_one_to_five() {
        assert!(draft(1).validate().is_ok());
        assert!(draft(5).validate().is_ok());
        assert_eq!(draft(0).validate(), Err(ValidationError::InvalidRating(0)));
        assert_eq!(draft(6).validate(), Err(ValidationError::InvalidRating(6)));
    }

    #[test]
    fn blank_comment_is_rejected() {
        let mut d = draft(4);
        d.comment = " ".to_string();
        assert_eq!(d.validate(), Err(ValidationError::MissingField("comment")));
    }

    #[tokio::test]
    async fn submitted_reviews_are_stored_unverified() {
        let store = InMemoryStore::new();
        let product = store
            .insert_product(NewProduct::new("Watch", Money::from_rupees(3000), "Watches"))
            .await
            .unwrap();
        let service = ReviewService::new(store.clone());

        let first = service.submit(product.id, draft(5)).await.unwrap();
        assert!(!first.verified_purchase);
        service.submit(product.id, draft(3)).await.unwrap();

        let reviews = store.reviews_for_product(product.id).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, 3);
    }

    #[tokio::test]
    async fn submit_for_missing_product_fails() {
        let service = ReviewService::new(InMemoryStore::new());
        let err = service
            .submit(ProductId::new(42), draft(5))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn submit_for_inactive_product_fails() {
        let store = InMemoryStore::new();
        let product = store
            .insert_product(
                NewProduct::new("Watch", Money::from_rupees(3000), "Watches").active(false),
            )
            .await
            .unwrap();
        let service = ReviewService::new(store.clone());

        let err = service.submit(product.id, draft(4)).await.unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(id) if id == product.id));
        assert!(store.reviews_for_product(product.id).await.unwrap().is_empty());
    }
}

//! The order writer.

use common::{CURRENCY_CODE, Money, OrderStatus, ProductId};
use serde::{Deserialize, Serialize};
use store::{NewOrder, Order, Store};

use crate::error::{DomainError, Result, ValidationError};
use crate::phone::PhoneNumber;

/// Where the client shows the order confirmation.
pub const CONFIRMATION_PATH: &str = "/order-success";

/// How long the client waits before redirecting to the confirmation view.
pub const REDIRECT_DELAY_MS: u64 = 2000;

/// Largest quantity a single order can carry; order rows store it as a
/// signed 32-bit integer.
pub const MAX_ORDER_QUANTITY: u32 = i32::MAX as u32;

fn default_quantity() -> u32 {
    1
}

/// A cash-on-delivery order as submitted by a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_name: String,
    pub phone: String,
    pub city: String,
    pub address: String,
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl OrderDraft {
    /// Checks the format rules that need no store access.
    ///
    /// Returns the validated phone number.
    pub fn validate(&self) -> std::result::Result<PhoneNumber, ValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::MissingField("customer_name"));
        }
        let phone = PhoneNumber::parse(&self.phone)?;
        if self.city.trim().is_empty() {
            return Err(ValidationError::MissingField("city"));
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::MissingField("address"));
        }
        if !(1..=MAX_ORDER_QUANTITY).contains(&self.quantity) {
            return Err(ValidationError::InvalidQuantity(self.quantity));
        }
        Ok(phone)
    }
}

/// Returned to the client after an order is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order: Order,
    pub message: String,
    pub redirect_to: &'static str,
    pub redirect_after_ms: u64,
}

impl OrderConfirmation {
    fn for_order(order: Order) -> Self {
        Self {
            order,
            message: "Order placed! We'll call you within 24 hours to confirm your order."
                .to_string(),
            redirect_to: CONFIRMATION_PATH,
            redirect_after_ms: REDIRECT_DELAY_MS,
        }
    }
}

/// Service accepting cash-on-delivery orders.
///
/// Each submission is a single insert with no idempotency key: submitting
/// the same draft twice stores two orders. Stock is not decremented.
pub struct OrderService<S: Store> {
    store: S,
}

impl<S: Store> OrderService<S> {
    /// Creates a new order service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates a draft and stores it as a `Pending` order.
    ///
    /// Format errors are reported before the store is contacted. The product
    /// title and price are copied into the order, so later price edits do not
    /// change it.
    #[tracing::instrument(skip(self, draft), fields(product_id = %draft.product_id, quantity = draft.quantity))]
    pub async fn place_order(&self, draft: OrderDraft) -> Result<OrderConfirmation> {
        let phone = draft.validate().inspect_err(|e| {
            metrics::counter!("order_validation_failures_total").increment(1);
            tracing::info!(error = %e, "order rejected by validation");
        })?;

        let product = self
            .store
            .get_product(draft.product_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(DomainError::ProductNotFound(draft.product_id))?;

        if !product.in_stock() {
            return Err(DomainError::OutOfStock(product.id));
        }

        let total_amount = product
            .price
            .checked_multiply(draft.quantity)
            .ok_or(ValidationError::TotalOverflow)?;

        let new_order = NewOrder {
            customer_name: draft.customer_name.trim().to_string(),
            phone: phone.into(),
            city: draft.city.trim().to_string(),
            address: draft.address.trim().to_string(),
            product_id: product.id,
            product_title: product.title,
            product_price: product.price,
            quantity: draft.quantity,
            total_amount,
            status: OrderStatus::Pending,
        };

        let order = self.store.insert_order(new_order).await.inspect_err(|e| {
            tracing::error!(error = %e, "failed to store order");
        })?;

        record_conversion(&order);
        Ok(OrderConfirmation::for_order(order))
    }
}

/// Records the purchase conversion for analytics.
fn record_conversion(order: &Order) {
    metrics::counter!("orders_placed_total").increment(1);
    metrics::counter!("order_revenue_total").increment(order.total_amount.rupees().max(0) as u64);
    tracing::info!(
        event = "purchase",
        order_id = %order.id,
        product_id = %order.product_id,
        value = order.total_amount.rupees(),
        currency = CURRENCY_CODE,
        quantity = order.quantity,
        "order placed"
    );
}

//! Cash-on-delivery order submission.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{OrderConfirmation, OrderDraft};
use store::Store;

use crate::error::ApiError;
use crate::state::AppState;

/// POST /orders: place an order.
///
/// Responds 201 with the stored order and where the client should redirect.
#[tracing::instrument(skip(state, draft))]
pub async fn create<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<OrderConfirmation>), ApiError> {
    let confirmation = state.orders.place_order(draft).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

//! Back-office endpoints. Every handler requires an [`AdminSession`].

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use common::{OrderId, OrderStatus, ProductId};
use domain::{ImageUpload, Refreshed, UploadReport, orders_to_csv, relay_text, whatsapp_link};
use serde::{Deserialize, Serialize};
use store::{NewProduct, Order, Product, ProductPatch, Store};

use crate::auth::AdminSession;
use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

// -- Response types --

#[derive(Serialize)]
pub struct RelayResponse {
    pub order_id: OrderId,
    pub text: String,
    pub whatsapp_link: String,
}

// -- Handlers --

/// GET /admin/orders: all orders, newest first.
#[tracing::instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn list_orders<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.admin.list_orders().await?))
}

/// GET /admin/orders/export.csv: the order list as CSV.
#[tracing::instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn export_orders<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
) -> Result<impl IntoResponse, ApiError> {
    let orders = state.admin.list_orders().await?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"orders.csv\""),
        ],
        orders_to_csv(&orders),
    ))
}

/// PUT /admin/orders/{id}/status: overwrite an order's status.
#[tracing::instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn set_order_status<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
    Path(id): Path<OrderId>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Refreshed<Order>>, ApiError> {
    Ok(Json(state.admin.set_order_status(id, req.status).await?))
}

/// GET /admin/orders/{id}/relay: address block and a WhatsApp link
/// carrying it to the business number.
#[tracing::instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn relay<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
    Path(id): Path<OrderId>,
) -> Result<Json<RelayResponse>, ApiError> {
    let order = state.admin.get_order(id).await?;
    let text = relay_text(&order);
    Ok(Json(RelayResponse {
        order_id: order.id,
        whatsapp_link: whatsapp_link(&state.whatsapp_number, &text),
        text,
    }))
}

/// GET /admin/products: all products, inactive included.
#[tracing::instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn list_products<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.admin.list_products().await?))
}

/// POST /admin/products: add a product.
#[tracing::instrument(skip(state, admin, product), fields(admin = %admin.0.email))]
pub async fn create_product<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
    Json(product): Json<NewProduct>,
) -> Result<(StatusCode, Json<Refreshed<Product>>), ApiError> {
    let refreshed = state.admin.create_product(product).await?;
    Ok((StatusCode::CREATED, Json(refreshed)))
}

/// PATCH /admin/products/{id}: edit product fields.
#[tracing::instrument(skip(state, admin, patch), fields(admin = %admin.0.email))]
pub async fn edit_product<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Refreshed<Product>>, ApiError> {
    Ok(Json(state.admin.edit_product(id, patch).await?))
}

/// POST /admin/products/{id}/toggle-active: show or hide a product.
#[tracing::instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn toggle_active<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
    Path(id): Path<ProductId>,
) -> Result<Json<Refreshed<Product>>, ApiError> {
    Ok(Json(state.admin.toggle_product_active(id).await?))
}

/// DELETE /admin/products/{id}?confirm=true: hard-delete a product.
#[tracing::instrument(skip(state, admin), fields(admin = %admin.0.email))]
pub async fn delete_product<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
    Path(id): Path<ProductId>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Refreshed<Product>>, ApiError> {
    Ok(Json(state.admin.delete_product(id, params.confirm).await?))
}

/// POST /admin/products/{id}/images: multipart image upload.
///
/// Every part with a file name is treated as an image.
#[tracing::instrument(skip(state, admin, multipart), fields(admin = %admin.0.email))]
pub async fn upload_images<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    admin: AdminSession,
    Path(id): Path<ProductId>,
    mut multipart: Multipart,
) -> Result<Json<UploadReport>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        files.push(ImageUpload::new(file_name, content_type, bytes.to_vec()));
    }

    if files.is_empty() {
        return Err(ApiError::BadRequest("No image files in upload".to_string()));
    }

    Ok(Json(state.admin.upload_images(id, files).await?))
}

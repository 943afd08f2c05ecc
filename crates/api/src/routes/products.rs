//! Storefront product, category and review endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use catalog::{
    CatalogProduct, CatalogQuery, CategoryListing, CategorySummary, ProductDetail, SortKey,
};
use common::{Money, ProductId};
use domain::{ReviewDraft, product_whatsapp_link};
use serde::{Deserialize, Serialize};
use store::{Review, Store};

use crate::error::ApiError;
use crate::state::AppState;

fn default_true() -> bool {
    true
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort: Option<String>,
    #[serde(default = "default_true")]
    pub with_ratings: bool,
}

impl ListParams {
    fn into_query(self) -> Result<CatalogQuery, ApiError> {
        let mut query = CatalogQuery::new()
            .sort(parse_sort(self.sort.as_deref())?)
            .with_ratings(self.with_ratings)
            .price_range(
                self.min_price.map(Money::from_rupees),
                self.max_price.map(Money::from_rupees),
            );
        if let Some(category) = self.category.filter(|c| !c.trim().is_empty()) {
            query = query.category(category);
        }
        if let Some(search) = self.search {
            query = query.search(search);
        }
        Ok(query)
    }
}

#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub sort: Option<String>,
}

fn parse_sort(sort: Option<&str>) -> Result<SortKey, ApiError> {
    match sort {
        None | Some("") => Ok(SortKey::default()),
        Some(raw) => raw.parse().map_err(|e| ApiError::BadRequest(format!("{e}"))),
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct ProductPageResponse {
    #[serde(flatten)]
    pub detail: ProductDetail,
    pub whatsapp_link: String,
}

// -- Handlers --

/// GET /products: filtered, sorted catalog listing of active products.
///
/// Hidden products are only listed through the admin routes.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CatalogProduct>>, ApiError> {
    let query = params.into_query()?;
    Ok(Json(state.catalog.list(&query).await?))
}

/// GET /products/{id}: product page data.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductPageResponse>, ApiError> {
    let detail = state.catalog.product_detail(id).await?;
    let whatsapp_link = product_whatsapp_link(&state.whatsapp_number, &detail.product.product);
    Ok(Json(ProductPageResponse {
        detail,
        whatsapp_link,
    }))
}

/// GET /products/{id}/reviews: reviews, newest first.
#[tracing::instrument(skip(state))]
pub async fn reviews<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.catalog.reviews(id).await?))
}

/// POST /products/{id}/reviews: leave a review.
#[tracing::instrument(skip(state, draft))]
pub async fn add_review<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ProductId>,
    Json(draft): Json<ReviewDraft>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = state.reviews.submit(id, draft).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// GET /categories: categories of active products with counts.
#[tracing::instrument(skip(state))]
pub async fn categories<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<CategorySummary>>, ApiError> {
    Ok(Json(state.catalog.categories().await?))
}

/// GET /categories/{slug}: a category page.
#[tracing::instrument(skip(state))]
pub async fn category<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(slug): Path<String>,
    Query(params): Query<SortParams>,
) -> Result<Json<CategoryListing>, ApiError> {
    let sort = parse_sort(params.sort.as_deref())?;
    Ok(Json(state.catalog.category_listing(&slug, sort).await?))
}

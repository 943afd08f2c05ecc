//! Crawler documents and structured data.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use catalog::CatalogQuery;
use common::ProductId;
use seo::OpenGraph;
use serde::Serialize;
use serde_json::Value;
use store::Store;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ProductSeoResponse {
    pub json_ld: Value,
    pub open_graph: OpenGraph,
}

/// GET /seo/products/{id}: JSON-LD and Open Graph for a product page.
#[tracing::instrument(skip(state))]
pub async fn product<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductSeoResponse>, ApiError> {
    let detail = state.catalog.product_detail(id).await?;
    let product = &detail.product.product;

    Ok(Json(ProductSeoResponse {
        json_ld: seo::product_json_ld(
            &state.seo,
            product,
            detail.product.rating(),
            detail.product.review_count(),
        ),
        open_graph: OpenGraph::for_product(&state.seo, product),
    }))
}

/// GET /seo/organization: site-wide Organization JSON-LD.
pub async fn organization<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<Value> {
    Json(seo::organization_json_ld(&state.seo))
}

/// GET /sitemap.xml
#[tracing::instrument(skip(state))]
pub async fn sitemap<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories: Vec<String> = state
        .catalog
        .categories()
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    let products: Vec<_> = state
        .catalog
        .list(&CatalogQuery::new().with_ratings(false))
        .await?
        .into_iter()
        .map(|item| item.product)
        .collect();

    let xml = seo::sitemap_xml(&state.seo, &categories, &products)?;
    Ok(([(CONTENT_TYPE, "application/xml")], xml))
}

/// GET /robots.txt
pub async fn robots<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        seo::robots_txt(&state.seo),
    )
}

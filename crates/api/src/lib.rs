//! HTTP API for the storefront.
//!
//! Serves the public catalog, order and review endpoints, the admin
//! back office, and crawler documents, with structured logging (tracing)
//! and Prometheus metrics.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, patch, post, put};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{InMemorySessionStore, ObjectStore, Session, Store};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use state::AppState;

/// Largest accepted multipart body for image uploads.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let system_router = Router::new()
        .route("/health", get(routes::system::health))
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    let storefront = Router::new()
        .route("/products", get(routes::products::list::<S>))
        .route("/products/{id}", get(routes::products::get::<S>))
        .route(
            "/products/{id}/reviews",
            get(routes::products::reviews::<S>).post(routes::products::add_review::<S>),
        )
        .route("/categories", get(routes::products::categories::<S>))
        .route("/categories/{slug}", get(routes::products::category::<S>))
        .route("/orders", post(routes::orders::create::<S>))
        .route("/seo/products/{id}", get(routes::seo::product::<S>))
        .route("/seo/organization", get(routes::seo::organization::<S>))
        .route("/sitemap.xml", get(routes::seo::sitemap::<S>))
        .route("/robots.txt", get(routes::seo::robots::<S>));

    let admin = Router::new()
        .route("/admin/orders", get(routes::admin::list_orders::<S>))
        .route(
            "/admin/orders/export.csv",
            get(routes::admin::export_orders::<S>),
        )
        .route(
            "/admin/orders/{id}/status",
            put(routes::admin::set_order_status::<S>),
        )
        .route("/admin/orders/{id}/relay", get(routes::admin::relay::<S>))
        .route(
            "/admin/products",
            get(routes::admin::list_products::<S>).post(routes::admin::create_product::<S>),
        )
        .route(
            "/admin/products/{id}",
            patch(routes::admin::edit_product::<S>)
                .delete(routes::admin::delete_product::<S>),
        )
        .route(
            "/admin/products/{id}/toggle-active",
            post(routes::admin::toggle_active::<S>),
        )
        .route(
            "/admin/products/{id}/images",
            post(routes::admin::upload_images::<S>)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        );

    storefront
        .merge(admin)
        .with_state(state)
        .merge(system_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Builds application state over `store`, seeding the session store with
/// the configured admin tokens.
pub async fn create_state<S: Store + Clone + 'static>(
    store: S,
    objects: Arc<dyn ObjectStore>,
    config: &Config,
) -> Arc<AppState<S>> {
    let sessions = InMemorySessionStore::new();
    for (token, email) in &config.admin_sessions {
        sessions.insert(token.clone(), Session::new(email.clone())).await;
    }
    Arc::new(AppState::new(store, objects, Arc::new(sessions), config))
}

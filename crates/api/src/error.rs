//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use domain::{AccessError, DomainError};
use seo::SeoError;
use store::StoreError;

/// Message shown for failures the client cannot act on.
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// No valid session.
    Unauthorized,
    /// Valid session without admin rights.
    Forbidden(String),
    /// Domain logic error.
    Domain(DomainError),
    /// Catalog read error.
    Catalog(CatalogError),
    /// Backend error outside a domain operation.
    Store(StoreError),
    /// Document rendering error.
    Seo(SeoError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                AccessError::Unauthenticated.to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::Catalog(err) => catalog_error_to_response(err),
            ApiError::Store(err) => store_error_to_response(err),
            ApiError::Seo(err) => internal(err.to_string()),
        };

        metrics::counter!("api_error_responses_total", "status" => status.as_str().to_string())
            .increment(1);
        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn internal(detail: String) -> (StatusCode, String) {
    tracing::error!(error = %detail, "internal server error");
    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
}

fn store_error_to_response(err: StoreError) -> (StatusCode, String) {
    if err.is_not_found() {
        (StatusCode::NOT_FOUND, err.to_string())
    } else {
        internal(err.to_string())
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match err {
        DomainError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        DomainError::ProductNotFound(_) | DomainError::OrderNotFound(_) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        DomainError::OutOfStock(_) => (StatusCode::CONFLICT, err.to_string()),
        DomainError::DeleteNotConfirmed(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        DomainError::Store(err) => store_error_to_response(err),
    }
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String) {
    match err {
        CatalogError::ProductNotFound(_) | CatalogError::CategoryNotFound(_) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        CatalogError::Store(err) => store_error_to_response(err),
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<SeoError> for ApiError {
    fn from(err: SeoError) -> Self {
        ApiError::Seo(err)
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => ApiError::Unauthorized,
            AccessError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use common::ProductId;
    use domain::ValidationError;

    use super::*;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(
            status_of(DomainError::Validation(ValidationError::InvalidQuantity(0))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DomainError::ProductNotFound(ProductId::new(1))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::OutOfStock(ProductId::new(1))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DomainError::DeleteNotConfirmed(ProductId::new(1))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(DomainError::Store(StoreError::Unavailable("down".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn access_errors_map_to_401_and_403() {
        assert_eq!(
            status_of(AccessError::Unauthenticated),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AccessError::Forbidden("a@b.c".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn store_not_found_is_404() {
        assert_eq!(
            status_of(StoreError::NotFound {
                collection: "orders",
                id: 3
            }),
            StatusCode::NOT_FOUND
        );
    }
}

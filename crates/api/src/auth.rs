//! Admin authentication extractor.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use store::{Session, Store};

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated, allow-listed admin session.
///
/// Resolved per request from an `Authorization: Bearer <token>` header. A
/// missing, unknown or expired token is rejected with 401; a session whose
/// email is not allow-listed with 403.
#[derive(Debug, Clone)]
pub struct AdminSession(pub Session);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<Arc<AppState<S>>> for AdminSession
where
    S: Store + Clone + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let session = match bearer_token(parts) {
            Some(token) => state.sessions.lookup(token).await?,
            None => None,
        };

        let session = state
            .policy
            .authorize(session, chrono::Utc::now())
            .inspect_err(|e| {
                tracing::info!(error = %e, path = %parts.uri.path(), "admin access refused");
            })?;
        Ok(AdminSession(session))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/admin/orders");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(Some("Bearer tok-1"))), Some("tok-1"));
        assert_eq!(bearer_token(&parts(Some("bearer  tok-1 "))), Some("tok-1"));
        assert_eq!(bearer_token(&parts(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }
}

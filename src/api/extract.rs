//! Request extractors
//!
//! [`AdminOnly`] runs the Admin policy before a handler body. Listing it as a
//! handler argument is what marks an endpoint as Admin-only.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use tracing::warn;

use super::AppState;
use crate::auth::{authorize, Identity, ADMIN_POLICY};
use crate::error::AppError;

/// The authorized caller of an Admin-only endpoint.
#[derive(Debug, Clone)]
pub struct AdminOnly(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AdminOnly {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = match bearer_token(&parts.headers) {
            Some(token) => state.resolve_identity(token).await,
            None => None,
        };

        if let Err(denial) = authorize(identity.as_ref(), &ADMIN_POLICY) {
            warn!(path = %parts.uri.path(), ?denial, "request rejected by authorization gate");
            return Err(denial.into());
        }

        identity
            .map(AdminOnly)
            .ok_or_else(|| AppError::Unauthorized("Missing or invalid bearer token".to_string()))
    }
}

/// Extracts the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

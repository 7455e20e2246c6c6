//! Bearer-token authentication extractor.
//!
//! Provides an extractor that verifies the `Authorization` header and hands
//! the decoded identity claims to route handlers.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::services::token::{Claims, parse_bearer};
use crate::state::AppState;

/// Extractor that requires a verified bearer token.
///
/// Rejects with `BadRequest` when the header is absent and `Unauthorized`
/// when verification fails.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(claims): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.first_name)
/// }
/// ```
pub struct CurrentUser(pub Claims);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = parse_bearer(header)?;
        let claims = state.tokens().verify(token)?;

        Ok(Self(claims))
    }
}

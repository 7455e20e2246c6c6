//! User account route handlers.
//!
//! Signup and signin answer with a signed bearer token; the auth endpoint
//! introspects a presented token.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::CurrentUser;
use crate::services::AuthService;
use crate::services::auth::RegisterParams;
use crate::services::token::{Claims, TokenError};
use crate::state::AppState;

/// Signup request body.
///
/// Every field defaults to empty so that missing credentials surface as a
/// bad request, not a deserialization error.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Signin request body.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Token response for signup and signin.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a new account.
///
/// POST /api/user/signup
///
/// # Errors
///
/// Returns `AppError` if credentials are missing or the email is taken.
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<Json<TokenResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let token = auth
        .register(RegisterParams {
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// Verify credentials and issue a token.
///
/// POST /api/user/signin
///
/// # Errors
///
/// Returns `AppError` if the account is unknown or the password is wrong.
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<Json<TokenResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());
    let token = auth.login(&body.email, &body.password).await?;

    Ok(Json(TokenResponse { token }))
}

/// Introspect the presented token and return its decoded payload.
///
/// POST /api/user/auth
///
/// The payload is returned as decoded; no storage round-trip happens here.
///
/// # Errors
///
/// Returns `AppError` if the token is missing, fails verification, or
/// lacks an email claim.
pub async fn auth(CurrentUser(claims): CurrentUser) -> Result<Json<Claims>> {
    if claims.email.is_none() {
        return Err(TokenError::MissingClaim("email").into());
    }

    Ok(Json(claims))
}

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;

/// Header the dashboards send the token in
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Authenticated caller, extracted from the bearer token
///
/// Reads `x-auth-token`, falling back to `Authorization: Bearer <token>`.
/// The caller's identity always comes from here, never from the body.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(AuthUser(user_id): AuthUser) -> String {
///     format!("Hello user {}", user_id)
/// }
/// ```
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .or_else(|| {
                parts
                    .headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
            })
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

        let user_id = state.identity.validate_token(token)?;

        Ok(AuthUser(user_id))
    }
}

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::user::{Address, MobileNumber, NewUser, Role, Username};

/// Minimum accepted password length at registration
pub const MIN_PASSWORD_LEN: usize = 8;

/// Request body for user registration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub user_type: String,
    pub address: Option<Address>,
    pub vehicle_details: Option<String>,
    pub service_area: Option<String>,
}

impl RegisterRequest {
    /// Validates the raw body into domain registration data
    fn into_new_user(self) -> Result<NewUser, ApiError> {
        let username = Username::new(&self.username).map_err(ApiError::bad_request)?;
        let mobile_number = MobileNumber::new(&self.mobile_number).map_err(ApiError::bad_request)?;
        let role = self.user_type.parse::<Role>().map_err(ApiError::bad_request)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::bad_request(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Ok(NewUser {
            username,
            mobile_number,
            password: self.password,
            role,
            address: self.address,
            vehicle_details: non_blank(self.vehicle_details),
            service_area: non_blank(self.service_area),
        })
    }
}

/// Response from successful registration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub message: String,
}

/// Request body for user login
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Username or mobile number
    #[serde(default)]
    pub email_or_username: String,
    #[serde(default)]
    pub password: String,
}

/// Response from successful login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_type: Role,
}

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let new_user = req.into_new_user()?;

    let user = state.identity.register(new_user).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login with username or mobile number
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    if req.email_or_username.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Username and password are required"));
    }

    let user = state
        .identity
        .authenticate(&req.email_or_username, &req.password)
        .await?;
    let token = state.identity.issue_token(user.id)?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        token,
        user_type: user.role,
    }))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /
pub async fn root() -> &'static str {
    "API Running"
}

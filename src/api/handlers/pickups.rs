use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::AuthUser;
use crate::api::state::AppState;
use crate::domain::pickup::{Party, PickupStatus, PickupView, WasteItem};
use crate::services::SubmitPickup;

/// One waste line as sent by the dashboard
#[derive(Debug, Deserialize)]
pub struct WasteItemInput {
    #[serde(rename = "type", default)]
    pub waste_type: String,
    pub weight: Option<f64>,
}

/// Request body for scheduling a pickup
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePickupRequest {
    #[serde(default)]
    pub waste_items: Vec<WasteItemInput>,
    pub total_value: Option<f64>,
    #[serde(default)]
    pub pickup_address: String,
}

impl CreatePickupRequest {
    fn into_submission(self) -> Result<SubmitPickup, ApiError> {
        let missing = || ApiError::bad_request("Please provide all required pickup details");

        if self.waste_items.is_empty() {
            return Err(missing());
        }
        let total_value = self.total_value.ok_or_else(missing)?;

        let waste_items = self
            .waste_items
            .into_iter()
            .map(|item| {
                let weight = item.weight.ok_or_else(missing)?;
                WasteItem::new(&item.waste_type, weight).map_err(ApiError::bad_request)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SubmitPickup {
            waste_items,
            total_value,
            pickup_address: self.pickup_address,
        })
    }
}

/// Customer or collector reference attached to a pickup
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResponse {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
}

impl From<&Party> for PartyResponse {
    fn from(party: &Party) -> Self {
        Self {
            id: party.id,
            username: party.username.clone(),
            mobile_number: party.mobile_number.clone(),
        }
    }
}

/// Pickup record as returned by every pickup endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupResponse {
    pub id: Uuid,
    pub customer: PartyResponse,
    pub collector: Option<PartyResponse>,
    pub waste_items: Vec<WasteItem>,
    pub total_value: f64,
    pub pickup_address: String,
    pub status: PickupStatus,
    pub completion_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&PickupView> for PickupResponse {
    fn from(view: &PickupView) -> Self {
        let pickup = &view.pickup;
        Self {
            id: pickup.id(),
            customer: PartyResponse::from(&view.customer),
            collector: view.collector.as_ref().map(PartyResponse::from),
            waste_items: pickup.waste_items().to_vec(),
            total_value: pickup.total_value(),
            pickup_address: pickup.pickup_address().to_string(),
            status: pickup.status(),
            completion_time: pickup.completion_time(),
            created_at: pickup.created_at(),
            updated_at: pickup.updated_at(),
        }
    }
}

/// Unwraps the `:id` segment, rejecting malformed ids with the usual JSON body
fn pickup_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::bad_request(e.body_text()))
}

fn to_responses(views: &[PickupView]) -> Json<Vec<PickupResponse>> {
    Json(views.iter().map(PickupResponse::from).collect())
}

/// Schedule a new pickup (customers)
///
/// POST /api/pickups
pub async fn create_pickup(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreatePickupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PickupResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let submission = req.into_submission()?;

    let view = state.pickups.submit(user_id, submission).await?;

    Ok((StatusCode::CREATED, Json(PickupResponse::from(&view))))
}

/// Get a pickup the caller is party to
///
/// GET /api/pickups/:id
pub async fn get_pickup(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PickupResponse>, ApiError> {
    let id = pickup_id(id)?;
    let view = state.pickups.view(user_id, id).await?;
    Ok(Json(PickupResponse::from(&view)))
}

/// GET /api/pickups/collector/available
pub async fn list_available(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<PickupResponse>>, ApiError> {
    let views = state.pickups.list_available(user_id).await?;
    Ok(to_responses(&views))
}

/// GET /api/pickups/collector/active
pub async fn list_active(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<PickupResponse>>, ApiError> {
    let views = state.pickups.list_active_for_collector(user_id).await?;
    Ok(to_responses(&views))
}

/// GET /api/pickups/collector/history
pub async fn list_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<PickupResponse>>, ApiError> {
    let views = state.pickups.list_history_for_collector(user_id).await?;
    Ok(to_responses(&views))
}

/// GET /api/pickups/customer
pub async fn list_for_customer(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<PickupResponse>>, ApiError> {
    let views = state.pickups.list_for_customer(user_id).await?;
    Ok(to_responses(&views))
}

/// PUT /api/pickups/accept/:id
pub async fn accept_pickup(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PickupResponse>, ApiError> {
    let id = pickup_id(id)?;
    let view = state.pickups.accept(user_id, id).await?;
    Ok(Json(PickupResponse::from(&view)))
}

/// PUT /api/pickups/complete/:id
pub async fn complete_pickup(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PickupResponse>, ApiError> {
    let id = pickup_id(id)?;
    let view = state.pickups.complete(user_id, id).await?;
    Ok(Json(PickupResponse::from(&view)))
}

/// PUT /api/pickups/cancel/:id
pub async fn cancel_pickup(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PickupResponse>, ApiError> {
    let id = pickup_id(id)?;
    let view = state.pickups.cancel(user_id, id).await?;
    Ok(Json(PickupResponse::from(&view)))
}

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::infrastructure::classifier::Classification;

/// Multipart field the dashboard uploads the photo in
pub const IMAGE_FIELD: &str = "wasteImage";

/// Forward a waste photo to the classification service
///
/// POST /api/waste/detect
pub async fn detect_waste(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Classification>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| ApiError::bad_request("No image uploaded."))?;

    let classification = state
        .classifier
        .classify(file_name, bytes.to_vec())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, url = state.classifier.url(), "Error calling AI service");
            ApiError::internal_server_error("Error processing image")
        })?;

    Ok(Json(classification))
}

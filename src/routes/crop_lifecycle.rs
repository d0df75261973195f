use axum::extract::State;
use axum::Json;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::models::CropLifecycleRequest;
use crate::services::lifecycle::{generate_lifecycle, CropLifecycleResponse};

/// Generate a dated crop calendar with weather-aware schedules.
///
/// Weather alerts and rain-adjusted irrigation advice need the forecast
/// service; when it is unavailable the calendar is still returned without them.
#[utoipa::path(
    post,
    path = "/api/crop-lifecycle/generate",
    tag = "Crop Lifecycle",
    request_body = CropLifecycleRequest,
    responses(
        (status = 200, description = "Crop lifecycle calendar", body = CropLifecycleResponse),
        (status = 400, description = "Invalid numeric field or location name", body = ErrorResponse),
        (status = 422, description = "Unknown crop or malformed body"),
    )
)]
pub async fn generate_crop_lifecycle(
    State(state): State<AppState>,
    Json(request): Json<CropLifecycleRequest>,
) -> Result<Json<CropLifecycleResponse>, AppError> {
    let request = request.validate()?;
    let calendar = generate_lifecycle(&state.weather, &request).await;

    tracing::info!(
        crop = %request.crop_type,
        current_stage = %calendar.current_stage,
        alerts = calendar.weather_alerts.len(),
        "Crop lifecycle generated for {}",
        request.location_name
    );

    Ok(Json(calendar))
}

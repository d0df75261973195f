use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::errors::{AppError, ErrorResponse};
use crate::models::AdviceRequest;
use crate::services::advice::{build_advice_cards, AdviceCard};

#[derive(Debug, Serialize, ToSchema)]
pub struct AdviceResponse {
    pub knowledge_base: Vec<AdviceCard>,
}

/// Contextual agronomy advice for a field.
#[utoipa::path(
    post,
    path = "/api/advice",
    tag = "Advice",
    request_body = AdviceRequest,
    responses(
        (status = 200, description = "Advice cards in display order", body = AdviceResponse),
        (status = 400, description = "Invalid numeric field or location name", body = ErrorResponse),
        (status = 422, description = "Unknown category or malformed body"),
    )
)]
pub async fn generate_advice(
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceResponse>, AppError> {
    let farmer = request.farmer.validate()?;
    let knowledge_base = build_advice_cards(&farmer);

    tracing::debug!(
        crop = %farmer.crop_type,
        predicted_yield = request.predicted_yield,
        cards = knowledge_base.len(),
        "Advice generated"
    );

    Ok(Json(AdviceResponse { knowledge_base }))
}

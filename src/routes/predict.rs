use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;
use crate::errors::{AppError, ErrorResponse};
use crate::models::FarmerInput;
use crate::services::yield_model::YieldEstimate;

/// One point of the synthetic yield trend.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoricalYield {
    /// Season label (e.g. "Kharif 23", "Current")
    pub season: String,
    pub yield_t_per_ha: f64,
}

/// Response for POST /api/yield/predict.
#[derive(Debug, Serialize, ToSchema)]
pub struct YieldPredictionResponse {
    /// Predicted yield in t/ha, 2 decimal places
    pub predicted_yield: f64,
    /// Always "tons_per_hectare"
    pub unit: String,
    /// Model confidence between 0 and 1
    pub confidence: f64,
    /// Typical yield for this crop on this soil
    pub baseline_yield: f64,
    /// Five seasons, oldest first, ending with the current prediction
    pub historical_yields: Vec<HistoricalYield>,
    pub risk_alerts: Vec<String>,
    /// Between one and four practices
    pub recommended_practices: Vec<String>,
    /// Keys: summary, rainfallOutlook, temperatureTrend
    pub weather_outlook: BTreeMap<String, String>,
}

impl From<YieldEstimate> for YieldPredictionResponse {
    fn from(e: YieldEstimate) -> Self {
        Self {
            predicted_yield: e.value,
            unit: e.unit.to_string(),
            confidence: e.confidence,
            baseline_yield: e.baseline,
            historical_yields: e
                .history
                .into_iter()
                .map(|(season, value)| HistoricalYield {
                    season: season.to_string(),
                    yield_t_per_ha: value,
                })
                .collect(),
            risk_alerts: e.risks.iter().map(|r| r.to_string()).collect(),
            recommended_practices: e.practices.iter().map(|p| p.to_string()).collect(),
            weather_outlook: e.weather.to_map(),
        }
    }
}

/// Predict crop yield for a field.
///
/// Categories must be lowercase ids from `/api/reference/options`; unknown
/// values are rejected by the JSON extractor with 422.
#[utoipa::path(
    post,
    path = "/api/yield/predict",
    tag = "Yield",
    request_body = FarmerInput,
    responses(
        (status = 200, description = "Yield estimate with risks and practices", body = YieldPredictionResponse),
        (status = 400, description = "Invalid numeric field or location name", body = ErrorResponse),
        (status = 422, description = "Unknown category or malformed body"),
    )
)]
pub async fn predict_yield(
    State(state): State<AppState>,
    Json(input): Json<FarmerInput>,
) -> Result<Json<YieldPredictionResponse>, AppError> {
    let farmer = input.validate()?;
    let estimate = state.model.predict(&farmer);

    tracing::info!(
        crop = %farmer.crop_type,
        soil = %farmer.soil_type,
        irrigation = %farmer.irrigation_type,
        predicted_yield = estimate.value,
        risks = estimate.risks.len(),
        "Yield predicted for {}",
        farmer.location_name
    );

    Ok(Json(YieldPredictionResponse::from(estimate)))
}

//! Reference data for building input forms: every crop, soil and irrigation
//! option with a display label.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CropType, IrrigationType, SoilType};

#[derive(Debug, Serialize, ToSchema)]
pub struct CropOption {
    pub id: CropType,
    pub name: String,
    /// Typical season length, e.g. "120 days"
    pub duration: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SoilOption {
    pub id: SoilType,
    pub name: String,
    pub suitability: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IrrigationOption {
    pub id: IrrigationType,
    pub name: String,
    #[serde(rename = "waterUse")]
    pub water_use: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReferenceOptions {
    pub crops: Vec<CropOption>,
    pub soils: Vec<SoilOption>,
    pub irrigation: Vec<IrrigationOption>,
}

fn crop_label(crop: CropType) -> (&'static str, &'static str) {
    match crop {
        CropType::Wheat => ("Wheat", "120 days"),
        CropType::Rice => ("Rice", "135 days"),
        CropType::Maize => ("Maize", "110 days"),
        CropType::Cotton => ("Cotton", "180 days"),
        CropType::Soybean => ("Soybean", "105 days"),
        CropType::Sugarcane => ("Sugarcane", "300 days"),
    }
}

fn soil_label(soil: SoilType) -> (&'static str, &'static str) {
    match soil {
        SoilType::Alluvial => ("Alluvial", "High fertility"),
        SoilType::Black => ("Black (Regur)", "Moisture retentive"),
        SoilType::Red => ("Red", "Good drainage"),
        SoilType::Laterite => ("Laterite", "Acidic"),
        SoilType::Loamy => ("Loamy", "Balanced texture"),
        SoilType::Sandy => ("Sandy", "Fast draining"),
    }
}

fn irrigation_label(irrigation: IrrigationType) -> (&'static str, &'static str) {
    match irrigation {
        IrrigationType::Rainfed => ("Rainfed", "Seasonal rainfall"),
        IrrigationType::Drip => ("Drip", "Precise low volume"),
        IrrigationType::Sprinkler => ("Sprinkler", "Moderate"),
        IrrigationType::Canal => ("Canal", "Surface flow"),
    }
}

/// List selectable crops, soils and irrigation methods.
#[utoipa::path(
    get,
    path = "/api/reference/options",
    tag = "Reference",
    responses(
        (status = 200, description = "All selectable options", body = ReferenceOptions),
    )
)]
pub async fn get_options() -> Json<ReferenceOptions> {
    Json(reference_options())
}

pub fn reference_options() -> ReferenceOptions {
    ReferenceOptions {
        crops: CropType::ALL
            .into_iter()
            .map(|id| {
                let (name, duration) = crop_label(id);
                CropOption {
                    id,
                    name: name.to_string(),
                    duration: duration.to_string(),
                }
            })
            .collect(),
        soils: SoilType::ALL
            .into_iter()
            .map(|id| {
                let (name, suitability) = soil_label(id);
                SoilOption {
                    id,
                    name: name.to_string(),
                    suitability: suitability.to_string(),
                }
            })
            .collect(),
        irrigation: IrrigationType::ALL
            .into_iter()
            .map(|id| {
                let (name, water_use) = irrigation_label(id);
                IrrigationOption {
                    id,
                    name: name.to_string(),
                    water_use: water_use.to_string(),
                }
            })
            .collect(),
    }
}

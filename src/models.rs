//! Categorical farm parameters and the HTTP input records built from them.
//!
//! Crop, soil and irrigation types are closed enumerations, so every table
//! lookup downstream is an exhaustive `match`. Strings only exist at the JSON
//! boundary, where unknown values are rejected with [`UnknownCategory`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::helpers::title_case;
use crate::services::yield_model::FarmerContext;

const LOCATION_NAME_MIN_CHARS: usize = 2;
const LOCATION_NAME_MAX_CHARS: usize = 120;

/// A category string that is not part of the fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownCategory {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

fn unknown<T: Copy + fmt::Display>(kind: &'static str, value: &str, all: &[T]) -> UnknownCategory {
    UnknownCategory {
        kind,
        value: value.to_string(),
        expected: all
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CropType {
    Wheat,
    Rice,
    Maize,
    Cotton,
    Soybean,
    Sugarcane,
}

impl CropType {
    pub const ALL: [CropType; 6] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Maize,
        CropType::Cotton,
        CropType::Soybean,
        CropType::Sugarcane,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CropType::Wheat => "wheat",
            CropType::Rice => "rice",
            CropType::Maize => "maize",
            CropType::Cotton => "cotton",
            CropType::Soybean => "soybean",
            CropType::Sugarcane => "sugarcane",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Laterite,
    Loamy,
    Sandy,
}

impl SoilType {
    pub const ALL: [SoilType; 6] = [
        SoilType::Alluvial,
        SoilType::Black,
        SoilType::Red,
        SoilType::Laterite,
        SoilType::Loamy,
        SoilType::Sandy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SoilType::Alluvial => "alluvial",
            SoilType::Black => "black",
            SoilType::Red => "red",
            SoilType::Laterite => "laterite",
            SoilType::Loamy => "loamy",
            SoilType::Sandy => "sandy",
        }
    }

    /// Acidic soils that benefit from liming.
    pub fn is_acidic(self) -> bool {
        matches!(self, SoilType::Red | SoilType::Laterite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum IrrigationType {
    Rainfed,
    Drip,
    Sprinkler,
    Canal,
}

impl IrrigationType {
    pub const ALL: [IrrigationType; 4] = [
        IrrigationType::Rainfed,
        IrrigationType::Drip,
        IrrigationType::Sprinkler,
        IrrigationType::Canal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IrrigationType::Rainfed => "rainfed",
            IrrigationType::Drip => "drip",
            IrrigationType::Sprinkler => "sprinkler",
            IrrigationType::Canal => "canal",
        }
    }

    /// Pressurised systems whose emitters/nozzles need calibration.
    pub fn is_pressurised(self) -> bool {
        matches!(self, IrrigationType::Drip | IrrigationType::Sprinkler)
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for IrrigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| unknown("crop type", s, &Self::ALL))
    }
}

impl FromStr for SoilType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| unknown("soil type", s, &Self::ALL))
    }
}

impl FromStr for IrrigationType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| unknown("irrigation type", s, &Self::ALL))
    }
}

impl TryFrom<String> for CropType {
    type Error = UnknownCategory;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for SoilType {
    type Error = UnknownCategory;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<String> for IrrigationType {
    type Error = UnknownCategory;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ---------------------------------------------------------------------------
// Request records
// ---------------------------------------------------------------------------

/// Field parameters supplied by the farmer.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FarmerInput {
    /// Latitude in decimal degrees, -90..=90
    pub latitude: f64,
    /// Longitude in decimal degrees, -180..=180
    pub longitude: f64,
    /// Free-text location label (2-120 characters)
    pub location_name: String,
    pub crop_type: CropType,
    pub soil_type: SoilType,
    pub irrigation_type: IrrigationType,
    /// Field size in acres (> 0)
    pub acreage: f64,
    /// Seasonal rainfall in mm (>= 0)
    pub rainfall: f64,
    /// Fertilizer usage in kg/ha (>= 0)
    pub fertilizer_usage: f64,
    /// Sowing date (YYYY-MM-DD)
    pub sowing_date: NaiveDate,
}

impl FarmerInput {
    /// Check numeric bounds and normalise the location label, producing the
    /// context consumed by the yield model.
    pub fn validate(self) -> Result<FarmerContext, AppError> {
        validate_coordinates(self.latitude, self.longitude)?;
        let location_name = normalize_location_name(&self.location_name)?;
        validate_positive("acreage", self.acreage)?;
        validate_non_negative("rainfall", self.rainfall)?;
        validate_non_negative("fertilizer_usage", self.fertilizer_usage)?;

        Ok(FarmerContext {
            latitude: self.latitude,
            longitude: self.longitude,
            location_name,
            crop_type: self.crop_type,
            soil_type: self.soil_type,
            irrigation_type: self.irrigation_type,
            acreage: self.acreage,
            rainfall: self.rainfall,
            fertilizer_usage: self.fertilizer_usage,
            sowing_date: self.sowing_date,
        })
    }
}

/// Request body for contextual advice.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AdviceRequest {
    pub farmer: FarmerInput,
    /// Yield previously predicted for this field, in t/ha
    pub predicted_yield: f64,
}

/// Request body for the crop lifecycle calendar.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CropLifecycleRequest {
    pub crop_type: CropType,
    /// Planting date (YYYY-MM-DD)
    pub planting_date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub acreage: f64,
}

impl CropLifecycleRequest {
    pub fn validate(mut self) -> Result<Self, AppError> {
        validate_coordinates(self.latitude, self.longitude)?;
        self.location_name = normalize_location_name(&self.location_name)?;
        validate_positive("acreage", self.acreage)?;
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

// NaN passes range comparisons, so finiteness is checked first everywhere.

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), AppError> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(AppError::BadRequest(
            "latitude must be between -90 and 90".to_string(),
        ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(AppError::BadRequest(
            "longitude must be between -180 and 180".to_string(),
        ));
    }
    Ok(())
}

fn validate_positive(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::BadRequest(format!(
            "{} must be a finite number greater than 0",
            field
        )));
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::BadRequest(format!(
            "{} must be a finite number >= 0",
            field
        )));
    }
    Ok(())
}

fn normalize_location_name(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if !(LOCATION_NAME_MIN_CHARS..=LOCATION_NAME_MAX_CHARS).contains(&len) {
        return Err(AppError::BadRequest(format!(
            "location_name must be between {} and {} characters",
            LOCATION_NAME_MIN_CHARS, LOCATION_NAME_MAX_CHARS
        )));
    }
    Ok(title_case(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> FarmerInput {
        FarmerInput {
            latitude: 20.0,
            longitude: 77.0,
            location_name: "  nagpur district ".to_string(),
            crop_type: CropType::Wheat,
            soil_type: SoilType::Loamy,
            irrigation_type: IrrigationType::Drip,
            acreage: 2.5,
            rainfall: 80.0,
            fertilizer_usage: 110.0,
            sowing_date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
        }
    }

    #[test]
    fn test_category_round_trip_strings() {
        for crop in CropType::ALL {
            assert_eq!(crop.as_str().parse::<CropType>().unwrap(), crop);
        }
        for soil in SoilType::ALL {
            assert_eq!(soil.as_str().parse::<SoilType>().unwrap(), soil);
        }
        for irrigation in IrrigationType::ALL {
            assert_eq!(irrigation.as_str().parse::<IrrigationType>().unwrap(), irrigation);
        }
    }

    #[test]
    fn test_unknown_category_message() {
        let err = "clay".parse::<SoilType>().unwrap_err();
        assert_eq!(err.kind, "soil type");
        assert_eq!(err.value, "clay");
        assert!(err.to_string().contains("alluvial, black, red, laterite, loamy, sandy"));
    }

    #[test]
    fn test_category_parsing_is_case_sensitive() {
        assert!("Wheat".parse::<CropType>().is_err());
    }

    #[test]
    fn test_deserialize_farmer_input() {
        let json = serde_json::json!({
            "latitude": 20.0,
            "longitude": 77.0,
            "location_name": "Nagpur",
            "crop_type": "sugarcane",
            "soil_type": "black",
            "irrigation_type": "canal",
            "acreage": 1.0,
            "rainfall": 200.0,
            "fertilizer_usage": 250.0,
            "sowing_date": "2024-06-15"
        });
        let input: FarmerInput = serde_json::from_value(json).unwrap();
        assert_eq!(input.crop_type, CropType::Sugarcane);
        assert_eq!(input.soil_type, SoilType::Black);
        assert_eq!(input.irrigation_type, IrrigationType::Canal);
        assert_eq!(input.sowing_date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }

    #[test]
    fn test_deserialize_rejects_unknown_crop() {
        let json = serde_json::json!({
            "latitude": 20.0,
            "longitude": 77.0,
            "location_name": "Nagpur",
            "crop_type": "barley",
            "soil_type": "black",
            "irrigation_type": "canal",
            "acreage": 1.0,
            "rainfall": 200.0,
            "fertilizer_usage": 250.0,
            "sowing_date": "2024-06-15"
        });
        let err = serde_json::from_value::<FarmerInput>(json).unwrap_err();
        assert!(err.to_string().contains("unknown crop type 'barley'"));
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(IrrigationType::Sprinkler).unwrap(),
            serde_json::json!("sprinkler")
        );
    }

    #[test]
    fn test_validate_normalises_location() {
        let ctx = sample_input().validate().unwrap();
        assert_eq!(ctx.location_name, "Nagpur District");
        assert_eq!(ctx.crop_type, CropType::Wheat);
    }

    #[test]
    fn test_validate_rejects_out_of_range_latitude() {
        let mut input = sample_input();
        input.latitude = 91.0;
        assert!(matches!(input.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_validate_rejects_nan_longitude() {
        let mut input = sample_input();
        input.longitude = f64::NAN;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_acreage() {
        let mut input = sample_input();
        input.acreage = 0.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_rainfall() {
        let mut input = sample_input();
        input.rainfall = -1.0;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_zero_fertilizer() {
        let mut input = sample_input();
        input.fertilizer_usage = 0.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_location() {
        let mut input = sample_input();
        input.location_name = "  x ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_lifecycle_request_validate() {
        let req = CropLifecycleRequest {
            crop_type: CropType::Rice,
            planting_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            latitude: 12.9,
            longitude: 77.6,
            location_name: "bengaluru rural".to_string(),
            acreage: 3.0,
        };
        let req = req.validate().unwrap();
        assert_eq!(req.location_name, "Bengaluru Rural");

        let bad = CropLifecycleRequest {
            acreage: -2.0,
            ..req
        };
        assert!(bad.validate().is_err());
    }
}

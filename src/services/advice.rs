//! Rule-based agronomy advice cards.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::IrrigationType;
use crate::services::yield_model::FarmerContext;

/// Rainfall (mm) under which the water conservation card is added.
const DRY_SEASON_RAINFALL_MM: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdviceCategory {
    Soil,
    Water,
    Nutrition,
    Pest,
}

/// A knowledge-base card shown next to a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdviceCard {
    pub title: String,
    pub summary: String,
    pub actions: Vec<String>,
    pub category: AdviceCategory,
}

impl AdviceCard {
    fn new(title: &str, summary: &str, category: AdviceCategory, actions: [&str; 3]) -> Self {
        Self {
            title: title.to_string(),
            summary: summary.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            category,
        }
    }
}

/// Build the advice cards for a field.
///
/// Nutrition and pest cards are always present (first and last); the water
/// card is added for dry or rainfed fields and the soil card for acidic soils.
pub fn build_advice_cards(farmer: &FarmerContext) -> Vec<AdviceCard> {
    let mut cards = vec![AdviceCard::new(
        "Soil Nutrition Plan",
        "Align nutrient application with crop demand curves.",
        AdviceCategory::Nutrition,
        [
            "Split nitrogen doses across three growth stages.",
            "Incorporate micronutrient mix (Zn, B) based on soil tests.",
            "Adopt fertigation if drip irrigation is available.",
        ],
    )];

    if farmer.rainfall < DRY_SEASON_RAINFALL_MM
        || farmer.irrigation_type == IrrigationType::Rainfed
    {
        cards.push(AdviceCard::new(
            "Water Conservation Toolkit",
            "Boost soil moisture retention to buffer dry spells.",
            AdviceCategory::Water,
            [
                "Lay straw mulch or crop residue between rows.",
                "Construct contour bunds or field channels for rainwater harvesting.",
                "Schedule irrigation during early morning or late evening.",
            ],
        ));
    }

    if farmer.soil_type.is_acidic() {
        cards.push(AdviceCard::new(
            "Soil Health Booster",
            "Improve pH balance and microbial activity.",
            AdviceCategory::Soil,
            [
                "Apply farmyard manure at 5 t/ha before sowing.",
                "Use green manuring crops in the off-season.",
                "Consider dolomite liming if pH < 5.5.",
            ],
        ));
    }

    cards.push(AdviceCard::new(
        "Pest & Disease Watchlist",
        "Monitor hotspots linked to current weather outlook.",
        AdviceCategory::Pest,
        [
            "Deploy pheromone traps at the field boundary.",
            "Scout for early signs of fungal infection after rainfall.",
            "Rotate active ingredients to avoid pesticide resistance.",
        ],
    ));

    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropType, SoilType};
    use chrono::NaiveDate;

    fn context(rainfall: f64, soil: SoilType, irrigation: IrrigationType) -> FarmerContext {
        FarmerContext {
            latitude: 18.5,
            longitude: 73.8,
            location_name: "Pune".to_string(),
            crop_type: CropType::Soybean,
            soil_type: soil,
            irrigation_type: irrigation,
            acreage: 1.5,
            rainfall,
            fertilizer_usage: 80.0,
            sowing_date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
        }
    }

    fn categories(cards: &[AdviceCard]) -> Vec<AdviceCategory> {
        cards.iter().map(|c| c.category).collect()
    }

    #[test]
    fn test_minimal_cards() {
        let cards = build_advice_cards(&context(100.0, SoilType::Loamy, IrrigationType::Drip));
        assert_eq!(
            categories(&cards),
            vec![AdviceCategory::Nutrition, AdviceCategory::Pest]
        );
        assert_eq!(cards[0].title, "Soil Nutrition Plan");
        assert_eq!(cards[1].actions.len(), 3);
    }

    #[test]
    fn test_water_card_for_low_rainfall() {
        let cards = build_advice_cards(&context(59.9, SoilType::Loamy, IrrigationType::Canal));
        assert_eq!(
            categories(&cards),
            vec![
                AdviceCategory::Nutrition,
                AdviceCategory::Water,
                AdviceCategory::Pest
            ]
        );
    }

    #[test]
    fn test_water_card_for_rainfed() {
        let cards = build_advice_cards(&context(200.0, SoilType::Black, IrrigationType::Rainfed));
        assert!(categories(&cards).contains(&AdviceCategory::Water));
    }

    #[test]
    fn test_all_cards_for_dry_laterite() {
        let cards = build_advice_cards(&context(20.0, SoilType::Laterite, IrrigationType::Rainfed));
        assert_eq!(
            categories(&cards),
            vec![
                AdviceCategory::Nutrition,
                AdviceCategory::Water,
                AdviceCategory::Soil,
                AdviceCategory::Pest
            ]
        );
    }

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(AdviceCategory::Nutrition).unwrap(),
            serde_json::json!("nutrition")
        );
    }
}

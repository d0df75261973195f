//! Heuristic yield estimation.
//!
//! A closed-form agronomic heuristic, not a trained model. The estimate is the
//! product of seven factors:
//!
//! ```text
//! crop_base × soil × irrigation × rainfall_window × fertilizer_window
//!           × phenology × microclimate
//! ```
//!
//! plus a synthetic five-season trend, rule-based risk alerts and practices,
//! and a weather blurb drawn from a generator seeded only by the coordinates.
//! The model holds no state; identical inputs on the same evaluation date give
//! identical estimates.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::helpers::{linspace, round_2dp};
use crate::models::{CropType, IrrigationType, SoilType};

/// Unit tag carried by every estimate.
pub const YIELD_UNIT: &str = "tons_per_hectare";

/// Factor applied when a value lies inside its ideal window.
pub const WINDOW_BONUS: f64 = 1.05;
/// Lowest factor a value outside its window can decay to.
const WINDOW_DECAY_FLOOR: f64 = 0.6;

/// Days after sowing at which the phenology factor plateaus.
const PHENOLOGY_PLATEAU_DAYS: f64 = 120.0;
const PHENOLOGY_START: f64 = 0.85;
const PHENOLOGY_SPAN: f64 = 0.2;
/// Phenology factor for a sowing date that has not happened yet.
const PHENOLOGY_NOT_SOWN: f64 = 0.8;

/// Sugarcane's base is cane tonnage; estimates are reported at 1/10 scale.
const SUGARCANE_SCALE: f64 = 10.0;
/// Baseline is the soil-adjusted crop base, discounted 5%.
const BASELINE_DISCOUNT: f64 = 0.95;

const MAX_CONFIDENCE: f64 = 0.85;
const MIN_CONFIDENCE: f64 = 0.55;
const CONFIDENCE_PENALTY_PER_RISK: f64 = 0.08;

const MAX_PRACTICES: usize = 4;

/// Season labels of the synthetic trend, oldest first.
pub const HISTORY_SEASONS: [&str; 5] = ["Kharif 22", "Rabi 22", "Kharif 23", "Rabi 23", "Current"];

pub const RISK_LOW_RAINFALL: &str = "Low rainfall detected; plan supplemental irrigation.";
pub const RISK_RAINFALL_WINDOW: &str = "Rainfall outside optimal window; monitor moisture levels.";
pub const RISK_LOW_FERTILIZER: &str = "Nutrient application below target; review fertiliser plan.";
pub const RISK_SANDY_RAINFED: &str = "Sandy soil under rainfed conditions increases drought risk.";

pub const PRACTICE_ORGANIC_MATTER: &str = "Incorporate organic matter to improve soil structure.";
pub const PRACTICE_SCOUTING: &str = "Schedule field scouting twice a week during vegetative growth.";
pub const PRACTICE_MULCHING: &str = "Adopt mulching to conserve soil moisture.";
pub const PRACTICE_CALIBRATE: &str = "Calibrate irrigation equipment for uniform coverage.";
pub const PRACTICE_MICRO_IRRIGATION: &str = "Explore micro-irrigation subsidy programmes in your area.";
pub const PRACTICE_LIME: &str = "Plan lime application to balance soil pH.";

/// Rainfall below this many mm always raises a low-rainfall alert.
const LOW_RAINFALL_MM: f64 = 50.0;
/// Window factors below this raise an out-of-window alert.
const WINDOW_RISK_THRESHOLD: f64 = 0.75;

const OUTLOOK_CONDITIONS: [&str; 3] = ["stable", "favourable", "cautious"];

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Base yield in t/ha under ideal conditions.
pub fn crop_base(crop: CropType) -> f64 {
    match crop {
        CropType::Wheat => 3.2,
        CropType::Rice => 3.6,
        CropType::Maize => 4.1,
        CropType::Cotton => 2.4,
        CropType::Soybean => 2.8,
        CropType::Sugarcane => 80.0,
    }
}

pub fn soil_multiplier(soil: SoilType) -> f64 {
    match soil {
        SoilType::Alluvial => 1.1,
        SoilType::Black => 1.05,
        SoilType::Red => 0.95,
        SoilType::Laterite => 0.9,
        SoilType::Loamy => 1.0,
        SoilType::Sandy => 0.8,
    }
}

pub fn irrigation_multiplier(irrigation: IrrigationType) -> f64 {
    match irrigation {
        IrrigationType::Rainfed => 0.92,
        IrrigationType::Drip => 1.12,
        IrrigationType::Sprinkler => 1.05,
        IrrigationType::Canal => 1.0,
    }
}

/// Ideal seasonal rainfall window in mm, inclusive.
pub fn rainfall_optimum(crop: CropType) -> (f64, f64) {
    match crop {
        CropType::Wheat => (40.0, 120.0),
        CropType::Rice => (120.0, 220.0),
        CropType::Maize => (80.0, 160.0),
        CropType::Cotton => (60.0, 130.0),
        CropType::Soybean => (70.0, 150.0),
        CropType::Sugarcane => (180.0, 280.0),
    }
}

/// Ideal fertilizer window in kg/ha, inclusive.
pub fn fertilizer_optimum(crop: CropType) -> (f64, f64) {
    match crop {
        CropType::Wheat => (80.0, 140.0),
        CropType::Rice => (100.0, 160.0),
        CropType::Maize => (90.0, 150.0),
        CropType::Cotton => (70.0, 130.0),
        CropType::Soybean => (60.0, 110.0),
        CropType::Sugarcane => (220.0, 320.0),
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Validated field parameters. Built by the HTTP layer from `FarmerInput`.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmerContext {
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub crop_type: CropType,
    pub soil_type: SoilType,
    pub irrigation_type: IrrigationType,
    /// Accepted for bookkeeping; not used by the formula.
    pub acreage: f64,
    pub rainfall: f64,
    pub fertilizer_usage: f64,
    pub sowing_date: NaiveDate,
}

/// Coordinate-seeded weather blurb. Display flavour only, not a forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherOutlook {
    pub summary: String,
    pub rainfall_outlook: String,
    pub temperature_trend: String,
}

impl WeatherOutlook {
    /// The three fixed keys used on the wire.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("summary".to_string(), self.summary.clone()),
            ("rainfallOutlook".to_string(), self.rainfall_outlook.clone()),
            ("temperatureTrend".to_string(), self.temperature_trend.clone()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldEstimate {
    /// Predicted yield in t/ha, 2 dp
    pub value: f64,
    pub unit: &'static str,
    pub confidence: f64,
    /// Typical yield for the crop/soil pair, 2 dp
    pub baseline: f64,
    /// Exactly five (season, t/ha) points, oldest first
    pub history: Vec<(&'static str, f64)>,
    /// Distinct alerts in evaluation order
    pub risks: Vec<&'static str>,
    /// Between 1 and 4 practices, baseline practices first
    pub practices: Vec<&'static str>,
    pub weather: WeatherOutlook,
}

/// Individual multipliers behind an estimate, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldFactors {
    pub crop_base: f64,
    pub soil: f64,
    pub irrigation: f64,
    pub rainfall: f64,
    pub fertilizer: f64,
    pub phenology: f64,
    pub microclimate: f64,
}

impl YieldFactors {
    /// Product of every factor, on the crop's native scale.
    pub fn product(&self) -> f64 {
        self.crop_base
            * self.soil
            * self.irrigation
            * self.rainfall
            * self.fertilizer
            * self.phenology
            * self.microclimate
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Stateless heuristic calculator; cheap to copy into handler state.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicYieldModel;

impl HeuristicYieldModel {
    pub fn new() -> Self {
        Self
    }

    /// Estimate yield with today's local date as the evaluation date.
    pub fn predict(&self, farmer: &FarmerContext) -> YieldEstimate {
        self.predict_on(farmer, chrono::Local::now().date_naive())
    }

    /// Estimate yield as of `today`.
    pub fn predict_on(&self, farmer: &FarmerContext, today: NaiveDate) -> YieldEstimate {
        let factors = self.factors(farmer, today);

        let mut predicted = factors.product();
        if farmer.crop_type == CropType::Sugarcane {
            predicted /= SUGARCANE_SCALE;
        }
        let baseline = factors.crop_base * factors.soil * BASELINE_DISCOUNT;

        let history = history(baseline, predicted);
        let risks = risks(farmer, factors.rainfall, factors.fertilizer);
        let practices = practices(farmer, &risks);
        let weather = weather_outlook(farmer.latitude, farmer.longitude);
        let confidence = confidence(risks.len());

        YieldEstimate {
            value: round_2dp(predicted),
            unit: YIELD_UNIT,
            confidence,
            baseline: round_2dp(baseline),
            history,
            risks,
            practices,
            weather,
        }
    }

    /// Resolve every multiplier for `farmer` as of `today`.
    pub fn factors(&self, farmer: &FarmerContext, today: NaiveDate) -> YieldFactors {
        let crop = farmer.crop_type;
        YieldFactors {
            crop_base: crop_base(crop),
            soil: soil_multiplier(farmer.soil_type),
            irrigation: irrigation_multiplier(farmer.irrigation_type),
            rainfall: range_factor(farmer.rainfall, rainfall_optimum(crop)),
            fertilizer: range_factor(farmer.fertilizer_usage, fertilizer_optimum(crop)),
            phenology: phenology_factor((today - farmer.sowing_date).num_days()),
            microclimate: microclimate_factor(farmer.latitude, farmer.longitude),
        }
    }
}

/// Window-decay rule.
///
/// Inside `[lower, upper]` the factor is the 1.05 bonus. Outside, it decays
/// linearly with distance to the nearer bound, normalised by the window width,
/// and never drops below 0.6. The `+ 1` keeps the divisor positive.
pub fn range_factor(value: f64, (lower, upper): (f64, f64)) -> f64 {
    if (lower..=upper).contains(&value) {
        return WINDOW_BONUS;
    }
    let distance = (value - lower).abs().min((value - upper).abs());
    (1.0 - (distance / (upper - lower + 1.0)) * 0.5).max(WINDOW_DECAY_FLOOR)
}

/// Growth-stage factor from days elapsed since sowing.
///
/// Rises linearly from 0.85 on the sowing day to 1.05 at day 120 and stays
/// there. Negative `elapsed_days` (not yet sown) gives 0.8.
pub fn phenology_factor(elapsed_days: i64) -> f64 {
    if elapsed_days < 0 {
        return PHENOLOGY_NOT_SOWN;
    }
    let growth_stage = (elapsed_days as f64 / PHENOLOGY_PLATEAU_DAYS).min(1.0);
    PHENOLOGY_START + growth_stage * PHENOLOGY_SPAN
}

/// Deterministic geographic perturbation: `1 + 0.05·sin(2·lat) + 0.03·cos(lon)`.
pub fn microclimate_factor(latitude: f64, longitude: f64) -> f64 {
    let lat_rad = latitude.to_radians();
    let lon_rad = longitude.to_radians();
    1.0 + 0.05 * (lat_rad * 2.0).sin() + 0.03 * lon_rad.cos()
}

/// Straight line from `baseline × 0.95` to `predicted` over the fixed seasons.
fn history(baseline: f64, predicted: f64) -> Vec<(&'static str, f64)> {
    let progression = linspace(baseline * BASELINE_DISCOUNT, predicted, HISTORY_SEASONS.len());
    HISTORY_SEASONS
        .into_iter()
        .zip(progression)
        .map(|(season, value)| (season, round_2dp(value)))
        .collect()
}

fn risks(farmer: &FarmerContext, rainfall_factor: f64, fertilizer_factor: f64) -> Vec<&'static str> {
    let mut risks = Vec::new();
    if farmer.rainfall < LOW_RAINFALL_MM {
        risks.push(RISK_LOW_RAINFALL);
    }
    if rainfall_factor < WINDOW_RISK_THRESHOLD {
        risks.push(RISK_RAINFALL_WINDOW);
    }
    if fertilizer_factor < WINDOW_RISK_THRESHOLD {
        risks.push(RISK_LOW_FERTILIZER);
    }
    if farmer.irrigation_type == IrrigationType::Rainfed && farmer.soil_type == SoilType::Sandy {
        risks.push(RISK_SANDY_RAINFED);
    }
    risks
}

/// Two baseline practices, then conditional ones in a fixed order, capped at 4.
fn practices(farmer: &FarmerContext, risks: &[&str]) -> Vec<&'static str> {
    let mut practices = vec![PRACTICE_ORGANIC_MATTER, PRACTICE_SCOUTING];
    if risks
        .iter()
        .any(|risk| risk.to_lowercase().contains("rainfall"))
    {
        practices.push(PRACTICE_MULCHING);
    }
    if farmer.irrigation_type.is_pressurised() {
        practices.push(PRACTICE_CALIBRATE);
    } else {
        practices.push(PRACTICE_MICRO_IRRIGATION);
    }
    if farmer.soil_type.is_acidic() {
        practices.push(PRACTICE_LIME);
    }
    practices.truncate(MAX_PRACTICES);
    practices
}

/// Each risk costs 0.08 confidence, floored at 0.55.
pub fn confidence(risk_count: usize) -> f64 {
    (MAX_CONFIDENCE - risk_count as f64 * CONFIDENCE_PENALTY_PER_RISK).max(MIN_CONFIDENCE)
}

/// Seed for the weather blurb: `trunc((lat + 90)·1000 + (lon + 180)·1000)`.
///
/// Both terms are non-negative for valid coordinates, so the truncation is a floor.
pub fn outlook_seed(latitude: f64, longitude: f64) -> u64 {
    ((latitude + 90.0) * 1000.0 + (longitude + 180.0) * 1000.0) as u64
}

/// Coordinate-keyed weather blurb.
///
/// Draws from ChaCha8 seeded by [`outlook_seed`]: rainfall delta uniform in
/// [-20, 30] %, temperature anomaly uniform in [-1.5, 2.5] °C, then one of
/// stable/favourable/cautious. ChaCha output is stable across platforms and
/// releases, so a given coordinate pair always gets the same blurb.
pub fn weather_outlook(latitude: f64, longitude: f64) -> WeatherOutlook {
    let mut rng = ChaCha8Rng::seed_from_u64(outlook_seed(latitude, longitude));
    let rainfall_delta: f64 = rng.gen_range(-20.0..=30.0);
    let temp_trend: f64 = rng.gen_range(-1.5..=2.5);
    let summary = OUTLOOK_CONDITIONS[rng.gen_range(0..OUTLOOK_CONDITIONS.len())];

    WeatherOutlook {
        summary: capitalize(summary),
        rainfall_outlook: format_rainfall_delta(rainfall_delta),
        temperature_trend: format!("{:+.1}°C anomaly", temp_trend),
    }
}

/// "+12% vs normal" / "-5% vs normal"
fn format_rainfall_delta(delta: f64) -> String {
    let sign = if delta >= 0.0 { "+" } else { "" };
    format!("{}{:.0}% vs normal", sign, delta)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

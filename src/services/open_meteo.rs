//! Open-Meteo daily forecast client.
//!
//! Fetches up to 16 days of daily aggregates (no API key required).
//! See: https://open-meteo.com/en/docs

use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;

const DAILY_VARIABLES: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,precipitation_probability_max,windspeed_10m_max";

/// Client for the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    forecast_days: u8,
}

/// One day of forecast. Any variable may be missing for a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub temperature_max_c: Option<f64>,
    pub temperature_min_c: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub precipitation_probability_pct: Option<f64>,
    pub windspeed_max_kmh: Option<f64>,
}

/// Daily forecast for one location, in date order as returned by the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyForecast {
    pub days: Vec<DailyWeather>,
}

impl DailyForecast {
    pub fn on(&self, date: NaiveDate) -> Option<&DailyWeather> {
        self.days.iter().find(|d| d.date == date)
    }
}

// --- Open-Meteo JSON response types ---

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<OpenMeteoDaily>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    #[serde(default)]
    time: Vec<NaiveDate>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    windspeed_10m_max: Vec<Option<f64>>,
}

/// Value at `i`, treating short arrays like explicit nulls.
fn at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

impl From<OpenMeteoResponse> for DailyForecast {
    fn from(response: OpenMeteoResponse) -> Self {
        let Some(daily) = response.daily else {
            return DailyForecast::default();
        };
        let days = daily
            .time
            .iter()
            .enumerate()
            .map(|(i, &date)| DailyWeather {
                date,
                temperature_max_c: at(&daily.temperature_2m_max, i),
                temperature_min_c: at(&daily.temperature_2m_min, i),
                precipitation_mm: at(&daily.precipitation_sum, i),
                precipitation_probability_pct: at(&daily.precipitation_probability_max, i),
                windspeed_max_kmh: at(&daily.windspeed_10m_max, i),
            })
            .collect();
        DailyForecast { days }
    }
}

impl OpenMeteoClient {
    pub fn new(base_url: &str, timeout: Duration, forecast_days: u8) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
            forecast_days,
        })
    }

    /// Fetch the daily forecast for a location. Timezone is resolved by the
    /// API from the coordinates, so dates are local to the field.
    pub async fn fetch_daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<DailyForecast, AppError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("daily", DAILY_VARIABLES.to_string()),
                ("forecast_days", self.forecast_days.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("Open-Meteo request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "Open-Meteo returned HTTP {}",
                response.status()
            )));
        }

        let body: OpenMeteoResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Open-Meteo JSON parse error: {}", e))
        })?;

        let forecast = DailyForecast::from(body);
        tracing::debug!(
            "Open-Meteo returned {} forecast days for ({}, {})",
            forecast.days.len(),
            latitude,
            longitude
        );
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn client_for(server: &MockServer) -> OpenMeteoClient {
        OpenMeteoClient::new(
            &format!("{}/v1/forecast", server.uri()),
            Duration::from_secs(5),
            16,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_daily_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "18.5"))
            .and(query_param("longitude", "73.8"))
            .and(query_param("forecast_days", "16"))
            .and(query_param("timezone", "auto"))
            .and(query_param("daily", DAILY_VARIABLES))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 18.5,
                "longitude": 73.8,
                "daily": {
                    "time": ["2025-07-01", "2025-07-02"],
                    "temperature_2m_max": [36.1, null],
                    "temperature_2m_min": [24.0, 23.5],
                    "precipitation_sum": [0.0, 55.2],
                    "precipitation_probability_max": [10, 90],
                    "windspeed_10m_max": [12.3, 41.0]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let forecast = client_for(&server)
            .fetch_daily_forecast(18.5, 73.8)
            .await
            .unwrap();

        assert_eq!(forecast.days.len(), 2);
        let first = forecast.on(date(2025, 7, 1)).unwrap();
        assert_eq!(first.temperature_max_c, Some(36.1));
        assert_eq!(first.precipitation_probability_pct, Some(10.0));
        let second = forecast.on(date(2025, 7, 2)).unwrap();
        assert_eq!(second.temperature_max_c, None);
        assert_eq!(second.precipitation_mm, Some(55.2));
        assert_eq!(second.windspeed_max_kmh, Some(41.0));
        assert!(forecast.on(date(2025, 7, 3)).is_none());
    }

    #[tokio::test]
    async fn test_short_arrays_are_missing_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "daily": {
                    "time": ["2025-07-01", "2025-07-02"],
                    "precipitation_sum": [3.0]
                }
            })))
            .mount(&server)
            .await;

        let forecast = client_for(&server)
            .fetch_daily_forecast(0.0, 0.0)
            .await
            .unwrap();

        assert_eq!(forecast.days[0].precipitation_mm, Some(3.0));
        assert_eq!(forecast.days[1].precipitation_mm, None);
        assert_eq!(forecast.days[1].windspeed_max_kmh, None);
    }

    #[tokio::test]
    async fn test_missing_daily_block_is_empty_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "latitude": 0.0
            })))
            .mount(&server)
            .await;

        let forecast = client_for(&server)
            .fetch_daily_forecast(0.0, 0.0)
            .await
            .unwrap();
        assert!(forecast.days.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_is_external_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_daily_forecast(0.0, 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_external_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_daily_forecast(0.0, 0.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }
}

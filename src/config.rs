/// Default forecast endpoint (Open-Meteo, no API key required).
const DEFAULT_OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
/// Open-Meteo serves at most 16 days of daily forecast.
const MAX_FORECAST_DAYS: u8 = 16;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration, parsed once from environment variables at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub project_name: String,
    pub port: u16,
    /// Prefix under which all API routes are nested (e.g. "/api").
    pub api_prefix: String,
    pub cors_origins: Vec<String>,
    pub open_meteo_url: String,
    pub weather_timeout_secs: u64,
    /// Days of daily forecast requested for lifecycle weather alerts.
    pub forecast_days: u8,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to defaults; present but malformed values are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid u16",
                value: raw.clone(),
            })?,
            None => 8000,
        };

        let api_prefix = lookup("API_PREFIX").unwrap_or_else(|| "/api".to_string());
        if !api_prefix.starts_with('/') || api_prefix.len() < 2 || api_prefix.ends_with('/') {
            return Err(ConfigError::Invalid {
                name: "API_PREFIX",
                expected: "a path like '/api'",
                value: api_prefix,
            });
        }

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let weather_timeout_secs = match lookup("WEATHER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "WEATHER_TIMEOUT_SECS",
                        expected: "a positive number of seconds",
                        value: raw,
                    })
                }
            },
            None => 10,
        };

        let forecast_days = match lookup("FORECAST_DAYS") {
            Some(raw) => match raw.trim().parse::<u8>() {
                Ok(days) if (1..=MAX_FORECAST_DAYS).contains(&days) => days,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "FORECAST_DAYS",
                        expected: "between 1 and 16",
                        value: raw,
                    })
                }
            },
            None => MAX_FORECAST_DAYS,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "LOG_FORMAT",
                    expected: "'pretty' or 'json'",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            project_name: lookup("PROJECT_NAME").unwrap_or_else(|| "SmartYield API".to_string()),
            port,
            api_prefix,
            cors_origins,
            open_meteo_url: lookup("OPEN_METEO_URL")
                .unwrap_or_else(|| DEFAULT_OPEN_METEO_URL.to_string()),
            weather_timeout_secs,
            forecast_days,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.project_name, "SmartYield API");
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.open_meteo_url.contains("open-meteo"));
        assert_eq!(config.weather_timeout_secs, 10);
        assert_eq!(config.forecast_days, 16);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("API_PREFIX", "/v2"),
            ("CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("FORECAST_DAYS", "7"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.api_prefix, "/v2");
        assert_eq!(
            config.cors_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.forecast_days, 7);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_prefix() {
        assert!(config_from(&[("API_PREFIX", "api")]).is_err());
        assert!(config_from(&[("API_PREFIX", "/api/")]).is_err());
    }

    #[test]
    fn test_forecast_days_out_of_range() {
        assert!(config_from(&[("FORECAST_DAYS", "0")]).is_err());
        assert!(config_from(&[("FORECAST_DAYS", "17")]).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(config_from(&[("WEATHER_TIMEOUT_SECS", "0")]).is_err());
    }
}

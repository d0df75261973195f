// SmartYield API v0.1
use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod helpers;
mod models;
mod routes;
mod services;

use config::{AppConfig, LogFormat};
use routes::AppState;
use services::open_meteo::OpenMeteoClient;
use services::yield_model::HeuristicYieldModel;

/// Prefix the documented paths are written against.
const DOCUMENTED_PREFIX: &str = "/api";

/// OpenAPI document for the SmartYield API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SmartYield API",
        version = "0.1.0",
        description = "Crop yield advisory API. Estimates yield from field parameters with a \
            transparent heuristic model, lists risks and recommended practices, builds \
            agronomy advice cards and generates weather-aware crop lifecycle calendars \
            using Open-Meteo forecasts.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Reference", description = "Selectable crops, soils and irrigation methods"),
        (name = "Yield", description = "Heuristic yield prediction"),
        (name = "Advice", description = "Agronomy advice cards"),
        (name = "Crop Lifecycle", description = "Growth stage calendar with weather alerts"),
    ),
    paths(
        routes::health::health_check,
        routes::reference::get_options,
        routes::predict::predict_yield,
        routes::advice::generate_advice,
        routes::crop_lifecycle::generate_crop_lifecycle,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::reference::ReferenceOptions,
            routes::reference::CropOption,
            routes::reference::SoilOption,
            routes::reference::IrrigationOption,
            models::CropType,
            models::SoilType,
            models::IrrigationType,
            models::FarmerInput,
            models::AdviceRequest,
            models::CropLifecycleRequest,
            routes::predict::YieldPredictionResponse,
            routes::predict::HistoricalYield,
            routes::advice::AdviceResponse,
            services::advice::AdviceCard,
            services::advice::AdviceCategory,
            services::lifecycle::CropLifecycleResponse,
            services::lifecycle::CropStage,
            services::lifecycle::WeatherAlert,
            services::lifecycle::IrrigationScheduleEntry,
            services::lifecycle::FertilizerScheduleEntry,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

/// The OpenAPI document with paths moved under the configured prefix.
fn api_doc(config: &AppConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = config.project_name.clone();
    if config.api_prefix != DOCUMENTED_PREFIX {
        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| match path.strip_prefix(DOCUMENTED_PREFIX) {
                Some(rest) if rest.starts_with('/') => {
                    (format!("{}{}", config.api_prefix, rest), item)
                }
                _ => (path, item),
            })
            .collect();
    }
    doc
}

/// CORS for the configured browser origins. Unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Assemble the full router: health at the root, API routes under the prefix.
fn app(state: AppState, config: &AppConfig) -> Router {
    let api_routes = Router::new()
        .route("/reference/options", get(routes::reference::get_options))
        .route("/yield/predict", post(routes::predict::predict_yield))
        .route("/advice", post(routes::advice::generate_advice))
        .route(
            "/crop-lifecycle/generate",
            post(routes::crop_lifecycle::generate_crop_lifecycle),
        );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest(&config.api_prefix, api_routes)
        .with_state(state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url(format!("{}/openapi.json", config.api_prefix), api_doc(config)),
        )
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "smartyield_api=debug,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with((format == LogFormat::Pretty).then(tracing_subscriber::fmt::layer))
        .with((format == LogFormat::Json).then(|| tracing_subscriber::fmt::layer().json()))
        .init();
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    let weather = match OpenMeteoClient::new(
        &config.open_meteo_url,
        Duration::from_secs(config.weather_timeout_secs),
        config.forecast_days,
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create forecast client: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        service_name: config.project_name.clone(),
        model: HeuristicYieldModel::new(),
        weather,
    };

    let app = app(state, &config);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("{} listening on {}", config.project_name, addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server terminated unexpectedly: {}", e);
        std::process::exit(1);
    }
}

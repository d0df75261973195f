use crate::services::open_meteo::OpenMeteoClient;
use crate::services::yield_model::HeuristicYieldModel;

pub mod advice;
pub mod crop_lifecycle;
pub mod health;
pub mod predict;
pub mod reference;

/// Shared application state for all handlers.
#[derive(Clone)]
pub(crate) struct AppState {
    /// Reported by the health endpoint.
    pub(crate) service_name: String,
    pub(crate) model: HeuristicYieldModel,
    pub(crate) weather: OpenMeteoClient,
}

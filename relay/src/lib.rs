use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub mod api;
pub mod config;
pub mod downstream;
pub mod error;
pub mod logging;

pub use config::RelayConfig;
pub use downstream::PredictionClient;
pub use error::RelayError;

#[derive(Clone)]
pub struct AppState {
    pub predictions: Arc<PredictionClient>,
}

impl AppState {
    pub fn new(predictions: PredictionClient) -> Self {
        Self {
            predictions: Arc::new(predictions),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::welcome))
        .route("/predict", post(api::predict))
        .layer(middleware::from_fn(logging::log_request))
        .with_state(state)
}

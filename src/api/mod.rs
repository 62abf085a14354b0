pub mod auth;
pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::extract::Request;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::errors::ClarityError;
use crate::pipeline::Orchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator, config: AppConfig) -> Self {
        Self { orchestrator, config: Arc::new(config) }
    }
}

pub fn create_app_state(config: AppConfig) -> Result<AppState, ClarityError> {
    let orchestrator = Orchestrator::from_config(&config)?;
    Ok(AppState::new(orchestrator, config))
}

pub fn build_router(state: AppState) -> Router {
    let ai = Router::new()
        .route("/chat", post(routes::ai::chat))
        .route("/generate", post(routes::ai::generate))
        .route("/generate-tests", post(routes::ai::generate_tests))
        .route("/summarize", post(routes::ai::summarize))
        .route("/analyze", post(routes::ai::analyze))
        .route("/analyze-transaction", post(routes::ai::analyze_transaction))
        .route("/analyze-contract", post(routes::ai::analyze_contract))
        .route("/decode", post(routes::decode::decode))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::api_auth_middleware));

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .nest("/api/ai", ai)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    id = %uuid::Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

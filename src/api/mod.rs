pub mod evaluate;
pub mod health;

use crate::config::Config;
use crate::engine::RuleEngine;
use crate::resolver::RuleSetResolver;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<dyn RuleSetResolver>,
    pub config: Config,
    pub engine: RuleEngine,
}

impl AppState {
    pub fn new(resolver: Arc<dyn RuleSetResolver>, config: Config) -> Self {
        Self {
            resolver,
            config,
            engine: RuleEngine::new(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/evaluate", post(evaluate::evaluate))
        .layer(cors)
        .with_state(state)
}

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    handlers::{health, treatment},
    server::CalculatorServer,
};

/// Create health check routes
pub fn health_routes() -> Router<CalculatorServer> {
    Router::new()
        .route("/", get(health::service_index))
        .route("/health", get(health::health_check))
}

/// Create treatment estimate routes
pub fn treatment_routes() -> Router<CalculatorServer> {
    Router::new().route("/calculate-treatment", post(treatment::calculate_treatment))
}

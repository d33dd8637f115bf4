use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::server::CalculatorServer;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: String,
    /// Service name from configuration
    pub service: String,
    /// API version
    pub version: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
    /// Uptime in seconds
    pub uptime: u64,
}

/// Health check handler
pub async fn health_check(State(server): State<CalculatorServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: server.uptime_seconds(),
    })
}

/// Routes exposed by this server
#[derive(Debug, Serialize, Deserialize)]
pub struct EndpointIndex {
    pub health: String,
    pub calculate_treatment: String,
    pub calculate_treatment_v1: String,
}

/// Root response: service status plus where to find things
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceIndexResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub endpoints: EndpointIndex,
}

/// Root handler
pub async fn service_index(State(server): State<CalculatorServer>) -> Json<ServiceIndexResponse> {
    Json(ServiceIndexResponse {
        status: "healthy".to_string(),
        service: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: EndpointIndex {
            health: "/health".to_string(),
            calculate_treatment: "/calculate-treatment".to_string(),
            calculate_treatment_v1: "/api/v1/calculate-treatment".to_string(),
        },
    })
}

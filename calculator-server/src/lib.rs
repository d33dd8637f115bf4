//! Calculator Server - HTTP API for dental treatment cost estimates
//!
//! Thin JSON boundary around the `treatment-calculator` crate. Benefit
//! extraction and any presentation concerns live with the caller.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::*;
pub use server::CalculatorServer;

use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router with all routes and middleware
pub fn create_app(server: CalculatorServer) -> Router {
    Router::new()
        .merge(routes::health_routes())
        // Unversioned path kept for existing clients
        .merge(routes::treatment_routes())
        .nest("/api/v1", routes::treatment_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

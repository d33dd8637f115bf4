use std::sync::Arc;
use std::time::Instant;

use error_common::{Result, ServiceError};
use treatment_calculator::TreatmentCostAllocator;

use crate::config::ServerConfig;

/// Shared server state.
///
/// The allocator is stateless, so handlers share one copy without locking.
#[derive(Clone)]
pub struct CalculatorServer {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Allocator built from the configured policy
    pub allocator: TreatmentCostAllocator,
    started_at: Instant,
}

impl CalculatorServer {
    /// Create server state from configuration
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ConfigError`] if the allocation policy is invalid.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let allocator = TreatmentCostAllocator::with_policy(config.policy)
            .map_err(|e| ServiceError::ConfigError(e.reason().to_string()))?;

        Ok(Self {
            config: Arc::new(config),
            allocator,
            started_at: Instant::now(),
        })
    }

    /// Seconds since the server state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

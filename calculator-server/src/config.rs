use config::{Config, Environment, File};
use error_common::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use treatment_calculator::AllocationPolicy;

/// Prefix for environment overrides, e.g. `CALCULATOR__PORT=9000`
pub const ENV_PREFIX: &str = "CALCULATOR";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Service name reported by the health endpoint
    pub name: String,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Allocation rules applied to every calculation
    pub policy: AllocationPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Dental Cost Estimator".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            policy: AllocationPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional YAML file, then `CALCULATOR__*`
    /// environment variables. Missing values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::ConfigError`] if a source cannot be parsed or
    /// the resulting allocation policy is invalid.
    pub fn load(path: &str) -> Result<Self> {
        Self::from_sources(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn from_sources(path: &str, environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| ServiceError::ConfigError(format!("Failed to read configuration: {e}")))?;

        let config: ServerConfig = settings
            .try_deserialize()
            .map_err(|e| ServiceError::ConfigError(format!("Invalid configuration: {e}")))?;

        config
            .policy
            .validate()
            .map_err(|e| ServiceError::ConfigError(e.reason().to_string()))?;

        Ok(config)
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

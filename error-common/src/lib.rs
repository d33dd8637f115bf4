//! Common error handling utilities for the dental cost estimator services
//!
//! Process-level failures (configuration, binding, serving) share one error
//! enum so binaries can return a single `Result` from `main`. Every variant
//! maps to a stable code from [`codes`] that is safe to expose in API
//! responses and logs.
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, ServiceError};
//!
//! let err = ServiceError::ConfigError("port must be non-zero".to_string());
//! assert_eq!(err.code(), codes::configuration::INVALID_CONFIG);
//! ```

pub mod codes;
pub mod types;

pub use types::*;

// Stable error codes shared by the estimator services

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MALFORMED_REQUEST: &str = "VALIDATION_1002";
}

pub mod configuration {
    pub const INVALID_CONFIG: &str = "CONFIG_2001";
}

pub mod server {
    pub const NETWORK_FAILURE: &str = "SERVER_3001";
    pub const SERVE_FAILURE: &str = "SERVER_3002";
    pub const INTERNAL: &str = "SERVER_3003";
}

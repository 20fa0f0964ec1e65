use crate::presentation::config::{Environment, LoggingSettings};

/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub service: &'static str,
    pub environment: String,
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_settings(
        service: &'static str,
        environment: Environment,
        logging: &LoggingSettings,
    ) -> Self {
        Self {
            service,
            environment: environment.to_string(),
            level: logging.level.clone(),
            json_format: logging.json,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service: "shastra",
            environment: std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            level: "info".to_string(),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}

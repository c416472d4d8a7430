//! Configuration validation module

use crate::config::{LlmConfig, LoggingConfig, ServerConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },

    #[error("LLM configuration error: {message}")]
    Llm { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // u16 cannot exceed 65535, so only 0 is out of range
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(ValidationError::logging(format!(
                "Unknown log format '{}', expected 'json' or 'pretty'",
                other
            ))),
        }
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let has_key = self
            .google_ai
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return Err(ValidationError::llm(
                "Google AI API key is required (set GOOGLE_API_KEY or TRACEMAP__LLM__GOOGLE_AI__API_KEY)",
            ));
        }

        if self.google_ai.base_url.is_empty() {
            return Err(ValidationError::llm("Google AI base URL cannot be empty"));
        }

        if self.default_model.is_empty() {
            return Err(ValidationError::llm("Default model cannot be empty"));
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError::llm("LLM timeout must be > 0"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::llm(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.resilience.enabled && self.resilience.circuit_breaker_threshold == 0 {
            return Err(ValidationError::llm(
                "Circuit breaker threshold must be greater than 0",
            ));
        }

        Ok(())
    }
}

//! LLM-specific error types
//!
//! Every variant is recoverable from the caller's point of view: the request
//! handlers substitute canned text for any of them.

/// LLM operation error
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    /// Authentication failed (invalid API key, expired token, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limited by the provider
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Seconds to wait before retrying (if provided)
        retry_after: Option<u64>,
        message: String,
    },

    /// Request was rejected as malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Content was blocked by the provider's safety systems
    #[error("Content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Network/connection error
    #[error("Network error: {0}")]
    Network(String),

    /// Request did not complete in time
    #[error("Request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Service temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Provider returned an unexpected response
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider is not configured correctly
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Circuit breaker is open
    #[error("Circuit breaker open for: {circuit}")]
    CircuitOpen { circuit: String },
}

impl LlmError {
    /// Whether the failure says something about provider health
    /// (as opposed to a problem with this particular request)
    pub fn counts_against_provider(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimited { .. }
                | LlmError::Network(_)
                | LlmError::Timeout { .. }
                | LlmError::ServiceUnavailable(_)
                | LlmError::Authentication(_)
        )
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            retry_after: None,
            message: message.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout { seconds: 0 }
        } else if err.is_connect() {
            LlmError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            LlmError::InvalidResponse(format!("Undecodable body: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}

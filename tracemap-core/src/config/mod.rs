//! Configuration management

pub mod validation;

pub use validation::{Validate, ValidationError};

use serde::{Deserialize, Serialize};

/// Environment variable conventionally holding the Google Generative Language key
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether to expose interactive API docs (Swagger UI).
    pub enable_docs: bool,
    /// Global request timeout in seconds applied at the HTTP layer.
    pub request_timeout_seconds: u64,
    /// Allowed CORS origins. Use ["*"] to allow any. Empty vector -> no external origins.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_docs: true,
            request_timeout_seconds: 30,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    /// Output format: "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

/// Explanation service (LLM) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Google AI (Gemini) configuration
    pub google_ai: GoogleAIConfig,
    /// Model used for risk explanations
    pub default_model: String,
    /// Temperature for generation
    pub temperature: f64,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Upper bound on a single explanation call, in seconds
    pub timeout_seconds: u64,
    /// Circuit breaker around the provider
    pub resilience: LlmResilienceConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            google_ai: GoogleAIConfig::default(),
            default_model: "gemini-1.5-flash".to_string(),
            temperature: 0.4,
            max_tokens: 512,
            timeout_seconds: 8,
            resilience: LlmResilienceConfig::default(),
        }
    }
}

/// Google AI (Gemini) provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleAIConfig {
    /// API Key (also read from GOOGLE_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
}

impl Default for GoogleAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

/// LLM resilience configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmResilienceConfig {
    /// Wrap the provider in a circuit breaker
    pub enabled: bool,
    /// Number of consecutive failures before the circuit opens
    pub circuit_breaker_threshold: u32,
    /// Seconds before an open circuit lets a trial call request through
    pub circuit_breaker_timeout_secs: u64,
    /// Trial requests allowed while half-open
    pub half_open_max_requests: u32,
}

impl Default for LlmResilienceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            circuit_breaker_threshold: 5,
            circuit_breaker_timeout_secs: 30,
            half_open_max_requests: 1,
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.logging.validate()?;
        self.llm.validate()?;
        Ok(())
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        // Add environment-specific config if ENV is set
        if let Ok(env) = std::env::var("ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{}", env)).required(false));
        }

        // Add local config and environment variables last (highest priority)
        builder = builder
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("TRACEMAP").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;

        if let Ok(api_key) = std::env::var(GOOGLE_API_KEY_ENV)
            && !api_key.trim().is_empty()
        {
            config.llm.google_ai.api_key = Some(api_key);
        }

        config.validate()?;

        Ok(config)
    }
}

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Configuration file error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Validation(#[from] ValidationError),
}

//! TraceMap Core - Foundation crate for the TraceMap exposure service
//!
//! This crate provides shared functionality used by every other TraceMap crate:
//!
//! # Modules
//!
//! - [`config`]: Strongly-typed configuration with TOML and environment variable support
//! - [`logging`]: Structured logging with tracing
//!
//! # Configuration
//!
//! Load configuration from files and environment:
//!
//! ```rust,ignore
//! use tracemap_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `TRACEMAP__` prefix with double underscore separators.
//! The Google Generative Language credential is also read from `GOOGLE_API_KEY`:
//!
//! ```bash
//! TRACEMAP__SERVER__PORT=5000
//! TRACEMAP__LLM__TIMEOUT_SECONDS=8
//! GOOGLE_API_KEY=...
//! ```
//!
//! # Logging
//!
//! ```rust,ignore
//! use tracemap_core::init_tracing;
//!
//! init_tracing(&config.logging)?;
//! ```

pub mod config;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;

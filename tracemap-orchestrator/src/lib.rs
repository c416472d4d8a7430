//! TraceMap Orchestrator - HTTP surface of the exposure scoring service
//!
//! Every request is handled independently: authorize, score, ask the
//! explanation service once, and fall back to canned text if that call fails.
//!
//! # API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/analyze-email` | POST | Flagship four-signal email analysis |
//! | `/analyze` | POST | Alias, answers 307 to `/analyze-email` |
//! | `/analyze/text-osint` | POST | Text module analysis |
//! | `/analyze/image-osint` | POST | Image module analysis |
//! | `/analyze/location-osint` | POST | Location module analysis |
//! | `/analyze/code-osint` | POST | Code module analysis |
//! | `/health` | GET | Health check |

pub mod application;
pub mod presentation;

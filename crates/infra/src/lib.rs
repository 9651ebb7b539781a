//! # Slotify Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP client with retry/backoff
//! - Configuration loading (environment variables and files)
//! - External service integrations: the Gemini structured-extraction
//!   service and the Google Calendar backend
//!
//! ## Architecture
//! - Implements traits defined in `slotify-core`
//! - Depends on `slotify-domain` and `slotify-core`
//! - Contains all "impure" code (I/O, network)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;

pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::gcal::GoogleCalendarClient;
pub use integrations::gemini::GeminiClient;

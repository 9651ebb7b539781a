//! Gemini structured-extraction integration.

pub mod client;
pub mod types;

pub use client::GeminiClient;

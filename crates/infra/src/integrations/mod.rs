//! External service integrations.

pub mod gcal;
pub mod gemini;

//! Google Calendar integration.

pub mod client;
pub mod types;

pub use client::GoogleCalendarClient;

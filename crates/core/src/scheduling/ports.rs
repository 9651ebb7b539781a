//! Port interfaces for the calendar backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use slotify_domain::{Result, TimeWindow};

/// Durable event created by the backend; the link is opaque and used only
/// for user display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedSlot {
    pub html_link: String,
}

/// Trait for calendar backend operations.
#[async_trait]
pub trait CalendarPort: Send + Sync {
    /// Check whether a window is free. Read-only; true means free.
    async fn check_availability(&self, window: &TimeWindow) -> Result<bool>;

    /// Create a durable event for the window and return its display
    /// reference.
    async fn book_slot(&self, title: &str, window: &TimeWindow) -> Result<BookedSlot>;
}

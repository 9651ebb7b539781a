//! Port interface for the structured-extraction service
//!
//! The text-understanding backend is swappable/mockable behind this narrow
//! capability trait; resolver logic never sees the transport.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use slotify_domain::Result;

/// Partial scheduling fields as returned by the text-understanding service.
///
/// Every field is optional; the intent extractor applies defaults. Unknown
/// keys in the payload are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct PartialFields {
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl PartialFields {
    /// True when the service produced no field at all.
    pub fn is_empty(&self) -> bool {
        self.intent.is_none() && self.date.is_none() && self.time.is_none() && self.reason.is_none()
    }
}

/// Trait for the external text-understanding service.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    /// Extract scheduling fields from free text, given today's date.
    ///
    /// Implementations may fail (network, malformed payload); the intent
    /// extractor degrades such failures to field defaults.
    async fn extract(&self, text: &str, today: NaiveDate) -> Result<PartialFields>;
}

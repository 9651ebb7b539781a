//! Shared test doubles for the pipeline integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use slotify_core::{BookedSlot, CalendarPort, PartialFields, StructuredExtractor};
use slotify_domain::{Result, SlotifyError, TimeWindow};

/// Extractor double returning one scripted payload for every call.
pub struct ScriptedExtractor {
    payload: std::result::Result<PartialFields, String>,
}

impl ScriptedExtractor {
    pub fn returning(fields: PartialFields) -> Self {
        Self { payload: Ok(fields) }
    }

    pub fn empty() -> Self {
        Self { payload: Ok(PartialFields::default()) }
    }

    pub fn failing(message: &str) -> Self {
        Self { payload: Err(message.to_string()) }
    }
}

#[async_trait]
impl StructuredExtractor for ScriptedExtractor {
    async fn extract(&self, _text: &str, _today: chrono::NaiveDate) -> Result<PartialFields> {
        self.payload.clone().map_err(SlotifyError::Network)
    }
}

/// Calendar double serving availability answers in call order and recording
/// every booking write.
pub struct RecordingCalendar {
    availability: Mutex<Vec<bool>>,
    bookings: Mutex<Vec<(String, TimeWindow)>>,
}

impl RecordingCalendar {
    pub fn with_availability(answers: Vec<bool>) -> Self {
        Self { availability: Mutex::new(answers), bookings: Mutex::new(Vec::new()) }
    }

    pub fn bookings(&self) -> Vec<(String, TimeWindow)> {
        self.bookings.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarPort for RecordingCalendar {
    async fn check_availability(&self, _window: &TimeWindow) -> Result<bool> {
        let mut answers = self.availability.lock().unwrap();
        if answers.is_empty() {
            return Ok(false);
        }
        Ok(answers.remove(0))
    }

    async fn book_slot(&self, title: &str, window: &TimeWindow) -> Result<BookedSlot> {
        self.bookings.lock().unwrap().push((title.to_string(), *window));
        Ok(BookedSlot { html_link: "https://calendar.example/booked".into() })
    }
}

//! Google Calendar API client implementing the calendar port.

use async_trait::async_trait;
use reqwest::Method;
use slotify_core::{BookedSlot, CalendarPort};
use slotify_domain::{Result, SlotifyError, TimeWindow};
use tracing::{debug, info};

use super::types::{EventTime, EventsListResponse, EventResource, InsertEventRequest};
use crate::http::HttpClient;

const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar client bound to one calendar.
///
/// A window counts as free when the events listing for its exact span is
/// empty; any event overlapping the span makes it busy.
pub struct GoogleCalendarClient {
    http_client: HttpClient,
    access_token: String,
    calendar_id: String,
    api_base: String,
}

impl GoogleCalendarClient {
    pub fn new(access_token: String, calendar_id: String, http_client: HttpClient) -> Self {
        Self {
            http_client,
            access_token,
            calendar_id,
            api_base: GOOGLE_CALENDAR_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (for testing against a mock server).
    #[cfg(test)]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn events_url(&self) -> String {
        format!("{}/calendars/{}/events", self.api_base, self.calendar_id)
    }

    async fn error_from(response: reqwest::Response) -> SlotifyError {
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
        SlotifyError::Backend(format!("calendar API error ({}): {}", status, body))
    }
}

#[async_trait]
impl CalendarPort for GoogleCalendarClient {
    async fn check_availability(&self, window: &TimeWindow) -> Result<bool> {
        let request = self
            .http_client
            .request(Method::GET, self.events_url())
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", window.start().to_rfc3339()),
                ("timeMax", window.end().to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ]);

        let response = self.http_client.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let listing: EventsListResponse = response
            .json()
            .await
            .map_err(|e| SlotifyError::Backend(format!("malformed events listing: {}", e)))?;

        debug!(
            start = %window.start(),
            events = listing.items.len(),
            "availability listing fetched"
        );
        Ok(listing.items.is_empty())
    }

    async fn book_slot(&self, title: &str, window: &TimeWindow) -> Result<BookedSlot> {
        let time_zone = window.start().timezone().name().to_string();
        let payload = InsertEventRequest {
            summary: title.to_string(),
            start: EventTime {
                date_time: window.start().to_rfc3339(),
                time_zone: time_zone.clone(),
            },
            end: EventTime { date_time: window.end().to_rfc3339(), time_zone },
        };

        let request = self
            .http_client
            .request(Method::POST, self.events_url())
            .bearer_auth(&self.access_token)
            .json(&payload);

        let response = self.http_client.send(request).await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let event: EventResource = response
            .json()
            .await
            .map_err(|e| SlotifyError::Backend(format!("malformed event resource: {}", e)))?;

        let html_link = event
            .html_link
            .ok_or_else(|| SlotifyError::Backend("created event carried no htmlLink".into()))?;

        info!(start = %window.start(), title, "calendar event created");
        Ok(BookedSlot { html_link })
    }
}

//! Request/response types for the Google Calendar v3 events API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct EventsListResponse {
    #[serde(default)]
    pub items: Vec<EventResource>,
}

#[derive(Debug, Deserialize)]
pub struct EventResource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "htmlLink")]
    pub html_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InsertEventRequest {
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

#[derive(Debug, Serialize)]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
}

//! Explicit clock-range extraction
//!
//! Recognizes spans of the form `3-5pm`, `10:30 to 11am`, `9 until 10` in
//! the raw text, independent of any structured fields already known. The
//! extractor only produces the end instant; the start is supplied by the
//! resolver.

use chrono::{DateTime, NaiveTime};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RANGE_RE: Regex = Regex::new(
        r"(?i)(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\s*(?:-|to|until)\s*(\d{1,2})(?::(\d{2}))?\s*(am|pm)?"
    )
    .unwrap();
}

/// Search `input` for a textual clock range and resolve its end instant on
/// the date of `start`.
///
/// When only one side carries an AM/PM marker it is applied to both sides,
/// so "3-5pm" resolves both endpoints to PM. Minutes default to 0. Returns
/// `None` when no range-shaped substring exists or when the computed end is
/// not strictly after `start` - the caller applies its own default duration
/// in that case.
///
/// The pattern is not anchored to word boundaries, so digit runs inside an
/// ISO date can match as a pseudo-range: "2025-12-01" yields "25-12" and an
/// end of 12:00. An accepted quirk, see DESIGN.md; hour validation still
/// rejects most of these ("2025-13-01" has no valid end hour).
pub fn extract_time_range(input: &str, start: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let caps = RANGE_RE.captures(input)?;

    let start_marker = caps.get(3).map(|m| m.as_str());
    let end_marker = caps.get(6).map(|m| m.as_str());

    let end_hour: u32 = caps.get(4)?.as_str().parse().ok()?;
    let end_minute: u32 = caps.get(5).map_or(Some(0), |m| m.as_str().parse().ok())?;

    let (hour, minute) = to_24h(end_hour, end_minute, end_marker.or(start_marker))?;
    let end_time = NaiveTime::from_hms_opt(hour, minute, 0)?;

    let end = start.with_time(end_time).single()?;
    (end > start).then_some(end)
}

/// Convert a 12-hour clock reading to 24-hour, leaving unmarked readings
/// untouched.
fn to_24h(hour: u32, minute: u32, marker: Option<&str>) -> Option<(u32, u32)> {
    if hour > 23 || minute > 59 {
        return None;
    }

    let hour = match marker.map(str::to_ascii_lowercase).as_deref() {
        Some("pm") if hour != 12 => hour.checked_add(12)?,
        Some("am") if hour == 12 => 0,
        _ => hour,
    };

    (hour <= 23).then_some((hour, minute))
}

//! Natural-language date/time parsing
//!
//! Fallback parser used by the resolver when the structured extraction
//! produced no usable date/time fields. Parses human-friendly expressions
//! like:
//! - Relative words: `today`, `tomorrow`, `day after tomorrow`
//! - Weekdays: `friday`, `next tuesday`
//! - Relative offsets: `in 2 days`, `in 3 hours`
//! - Explicit dates: `2025-07-04`, `july 4`, `4 july 2025`
//! - Clock times: `10am`, `3:30pm`, `14:30`, `at 10`
//!
//! Parsing is relative to an injected `now` and prefers future occurrences:
//! a bare weekday or time that already passed rolls forward.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_DATE_RE: Regex = Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap();
    static ref WEEKDAY_RE: Regex = Regex::new(
        r"(?i)\b(?:(next|this)\s+)?(monday|mon|tuesday|tues|tue|wednesday|wed|thursday|thurs|thu|friday|fri|saturday|sat|sunday|sun)\b"
    )
    .unwrap();
    static ref IN_OFFSET_RE: Regex =
        Regex::new(r"(?i)\bin\s+(\d+)\s+(minutes?|mins?|hours?|hrs?|days?|weeks?)\b").unwrap();
    static ref MONTH_DAY_RE: Regex = Regex::new(
        r"(?i)\b(january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sept|sep|october|oct|november|nov|december|dec)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?\b"
    )
    .unwrap();
    static ref DAY_MONTH_RE: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sept|sep|october|oct|november|nov|december|dec)\.?(?:,?\s+(\d{4}))?\b"
    )
    .unwrap();
    static ref TIME_12H_RE: Regex =
        Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").unwrap();
    static ref TIME_24H_RE: Regex = Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap();
    static ref AT_HOUR_RE: Regex = Regex::new(r"(?i)\bat\s+(\d{1,2})\b").unwrap();
}

/// A parsed natural-language instant.
#[derive(Debug, Clone, Copy)]
pub struct NaturalParse {
    pub instant: DateTime<Tz>,
    /// Whether the minute component was stated in the text (controls
    /// whole-hour truncation in the resolver)
    pub explicit_minute: bool,
}

/// How the date component was obtained; drives the prefer-future roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateKind {
    /// Explicitly stated (ISO or month-name date); never rolled
    Explicit,
    /// `today` / `tomorrow` / `day after tomorrow`; never rolled
    Relative,
    /// Bare weekday; rolls forward a week if already past
    Weekday,
    /// No date in the text; rolls forward a day if already past
    Missing,
}

/// Parse `input` relative to `now`, preferring future occurrences, in the
/// timezone of `now`. Returns `None` when the text contains neither a date
/// nor a time expression.
pub fn parse_natural(input: &str, now: DateTime<Tz>) -> Option<NaturalParse> {
    let lowered = input.to_lowercase();

    // "in N units" produces a complete instant on its own
    if let Some(parsed) = parse_in_offset(&lowered, now) {
        return Some(parsed);
    }

    let (date, date_kind) = parse_date_part(&lowered, now);
    let time = parse_time_part(&lowered);

    if date_kind == DateKind::Missing && time.is_none() {
        return None;
    }

    let (clock, explicit_minute) = match time {
        Some((clock, explicit_minute)) => (clock, explicit_minute),
        // RELATIVE_BASE semantics: a date-only expression keeps the base time
        None => (now.time(), false),
    };

    let naive = date.and_time(clock);
    let mut instant = now.timezone().from_local_datetime(&naive).earliest()?;

    // Prefer future occurrences for underspecified dates
    if instant <= now {
        match date_kind {
            DateKind::Weekday => instant = instant + Duration::days(7),
            DateKind::Missing => instant = instant + Duration::days(1),
            DateKind::Explicit | DateKind::Relative => {}
        }
    }

    Some(NaturalParse { instant, explicit_minute })
}

fn parse_in_offset(lowered: &str, now: DateTime<Tz>) -> Option<NaturalParse> {
    let caps = IN_OFFSET_RE.captures(lowered)?;
    let amount: i64 = caps.get(1)?.as_str().parse().ok()?;

    let delta = match caps.get(2)?.as_str() {
        unit if unit.starts_with("min") => Duration::minutes(amount),
        unit if unit.starts_with("h") => Duration::hours(amount),
        unit if unit.starts_with("day") => Duration::days(amount),
        unit if unit.starts_with("week") => Duration::weeks(amount),
        _ => return None,
    };

    Some(NaturalParse { instant: now + delta, explicit_minute: false })
}

fn parse_date_part(lowered: &str, now: DateTime<Tz>) -> (NaiveDate, DateKind) {
    let today = now.date_naive();

    // Ordering matters: "day after tomorrow" contains "tomorrow"
    if lowered.contains("day after tomorrow") {
        return (today + Duration::days(2), DateKind::Relative);
    }
    if lowered.contains("tomorrow") {
        return (today + Duration::days(1), DateKind::Relative);
    }
    if lowered.contains("today") || lowered.contains("tonight") {
        return (today, DateKind::Relative);
    }

    if let Some(caps) = ISO_DATE_RE.captures(lowered) {
        let date = caps
            .get(1)
            .zip(caps.get(2))
            .zip(caps.get(3))
            .and_then(|((year, month), day)| {
                NaiveDate::from_ymd_opt(
                    year.as_str().parse().ok()?,
                    month.as_str().parse().ok()?,
                    day.as_str().parse().ok()?,
                )
            });
        if let Some(date) = date {
            return (date, DateKind::Explicit);
        }
    }

    if let Some(date) = parse_month_day(lowered, today) {
        return (date, DateKind::Explicit);
    }

    if let Some(caps) = WEEKDAY_RE.captures(lowered) {
        let qualifier = caps.get(1).map(|m| m.as_str().to_ascii_lowercase());
        if let Some(weekday) = weekday_from_name(caps.get(2).map_or("", |m| m.as_str())) {
            let mut ahead = i64::from(
                (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7,
            );
            if ahead == 0 && qualifier.as_deref() == Some("next") {
                ahead = 7;
            }
            return (today + Duration::days(ahead), DateKind::Weekday);
        }
    }

    (today, DateKind::Missing)
}

fn parse_month_day(lowered: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (month_name, day, year) = if let Some(caps) = MONTH_DAY_RE.captures(lowered) {
        (caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3).map(|m| m.as_str()))
    } else if let Some(caps) = DAY_MONTH_RE.captures(lowered) {
        (caps.get(2)?.as_str(), caps.get(1)?.as_str(), caps.get(3).map(|m| m.as_str()))
    } else {
        return None;
    };

    let month = month_from_name(month_name)?;
    let day: u32 = day.parse().ok()?;
    let year: i32 = match year {
        Some(year) => year.parse().ok()?,
        None => today.year(),
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match &name.to_ascii_lowercase()[..3.min(name.len())] {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    match &name.to_ascii_lowercase()[..3.min(name.len())] {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

/// Returns the clock time and whether its minute was stated.
fn parse_time_part(lowered: &str) -> Option<(NaiveTime, bool)> {
    if let Some(caps) = TIME_12H_RE.captures(lowered) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps.get(2).map_or(Some(0), |m| m.as_str().parse().ok())?;
        let hour = match caps.get(3)?.as_str().to_ascii_lowercase().as_str() {
            "pm" if hour != 12 => hour + 12,
            "am" if hour == 12 => 0,
            _ => hour,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| (time, caps.get(2).is_some()));
    }

    if let Some(caps) = TIME_24H_RE.captures(lowered) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
        if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
            return Some((time, true));
        }
    }

    if let Some(caps) = AT_HOUR_RE.captures(lowered) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        if let Some(time) = NaiveTime::from_hms_opt(hour, 0, 0) {
            return Some((time, false));
        }
    }

    None
}

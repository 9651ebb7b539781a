//! DateTime resolution
//!
//! Merges the intent candidate, the vague-time lexicon, the time-range
//! extractor, and the natural-language parser into one timezone-aware
//! [`TimeWindow`]. Resolution order, first success wins:
//!
//! 1. candidate date + time construct the start directly;
//! 2. a still-default "12:00" time is overridden by a vague-time keyword
//!    found in the raw text (never an explicitly numeric time);
//! 3. with no usable fields, the natural-language parser runs over the
//!    whole input, preferring future occurrences relative to `now`;
//! 4. otherwise the request is unresolvable.
//!
//! Normalization on every path: seconds zeroed, minutes zeroed unless the
//! source stated them, and a calendar date strictly before today has its
//! year rewritten to the current year (extraction past-year fix - it does
//! not guarantee futurity).

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;
use slotify_domain::constants::DEFAULT_DURATION_MINUTES;
use slotify_domain::{IntentCandidate, TimeWindow};
use tracing::debug;

use crate::lexicon;
use crate::natural;
use crate::timerange;

/// Resolve the requested time window from the raw input and the candidate.
///
/// Returns `None` when no resolution path produces a valid instant; the
/// caller reports that as an unresolvable request, not an error.
pub fn resolve_window(
    input: &str,
    candidate: &IntentCandidate,
    now: DateTime<Tz>,
) -> Option<TimeWindow> {
    let start = resolve_start(input, candidate, now)?;

    let end = timerange::extract_time_range(input, start)
        .unwrap_or_else(|| start + Duration::minutes(DEFAULT_DURATION_MINUTES));

    debug!(%start, %end, "resolved time window");
    TimeWindow::new(start, end).ok()
}

fn resolve_start(
    input: &str,
    candidate: &IntentCandidate,
    now: DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.date_naive();

    let localized = if let (Some(date), Some(time)) = (candidate.date, candidate.time) {
        // Vague phrasing overrides the bland 12:00 default, never an
        // explicitly numeric time
        let (time, explicit_minute) = if is_default_time(time) {
            match lexicon::vague_time_in(input) {
                Some(mapped) => (mapped, false),
                None => (time, candidate.explicit_minute),
            }
        } else {
            (time, candidate.explicit_minute)
        };

        let time = normalize_time(time, explicit_minute)?;
        tz.from_local_datetime(&date.and_time(time)).earliest()?
    } else {
        let parsed = natural::parse_natural(input, now)?;
        let time = normalize_time(parsed.instant.time(), parsed.explicit_minute)?;
        parsed.instant.with_time(time).earliest()?
    };

    Some(fix_past_year(localized, today))
}

/// The generic default injected by the intent extractor when the service
/// gave no time.
fn is_default_time(time: NaiveTime) -> bool {
    time.hour() == 12 && time.minute() == 0 && time.second() == 0
}

/// Zero seconds always; truncate to the whole hour when the minute was not
/// stated by the source.
fn normalize_time(time: NaiveTime, explicit_minute: bool) -> Option<NaiveTime> {
    let minute = if explicit_minute { time.minute() } else { 0 };
    NaiveTime::from_hms_opt(time.hour(), minute, 0)
}

/// Reinterpret a date strictly before today as the same month/day in the
/// current year - a correction for extraction mistakes that infer a past
/// year from ambiguous phrasing.
fn fix_past_year(start: DateTime<Tz>, today: chrono::NaiveDate) -> DateTime<Tz> {
    if start.date_naive() >= today {
        return start;
    }
    // with_year fails for Feb 29 in a non-leap year; keep the original then
    start.with_year(today.year()).unwrap_or(start)
}

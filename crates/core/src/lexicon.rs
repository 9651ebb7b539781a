//! Vague-time lexicon
//!
//! Maps qualitative time-of-day words to canonical clock times. Lookup is
//! keyword-containment against the lowercased input; first match wins, so
//! the table keeps "afternoon" ahead of its substring "noon".

use chrono::NaiveTime;

/// Qualitative keyword to (hour, minute) mapping, in match-priority order.
const VAGUE_TIMES: &[(&str, (u32, u32))] = &[
    ("morning", (10, 0)),
    ("afternoon", (15, 0)),
    ("evening", (18, 0)),
    ("night", (20, 0)),
    ("noon", (12, 0)),
];

/// Find the first vague-time keyword contained in `text` and return its
/// canonical clock time. Returns `None` when no keyword is present.
pub fn vague_time_in(text: &str) -> Option<NaiveTime> {
    let lowered = text.to_lowercase();
    VAGUE_TIMES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .and_then(|(_, (hour, minute))| NaiveTime::from_hms_opt(*hour, *minute, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn maps_each_keyword() {
        assert_eq!(vague_time_in("meet me in the morning"), Some(hm(10, 0)));
        assert_eq!(vague_time_in("around noon works"), Some(hm(12, 0)));
        assert_eq!(vague_time_in("tomorrow evening"), Some(hm(18, 0)));
        assert_eq!(vague_time_in("late at night"), Some(hm(20, 0)));
    }

    #[test]
    fn afternoon_wins_over_its_noon_substring() {
        assert_eq!(vague_time_in("book team sync tomorrow afternoon"), Some(hm(15, 0)));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(vague_time_in("Tomorrow MORNING please"), Some(hm(10, 0)));
    }

    #[test]
    fn returns_none_without_keyword() {
        assert_eq!(vague_time_in("book a meeting at 3pm"), None);
    }
}

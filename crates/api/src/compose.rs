//! Response composer
//!
//! Renders a pipeline outcome as user-facing chat text. The structured
//! decision rides along so callers (tests, a future API surface) are not
//! forced to parse prose.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use slotify_core::Outcome;
use slotify_domain::SchedulingDecision;

/// One reply to one user message.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub text: String,
    /// Present when the full pipeline ran; absent for small-talk.
    pub decision: Option<SchedulingDecision>,
}

/// Render an outcome into a chat reply.
pub fn compose(outcome: Outcome) -> ChatReply {
    match outcome {
        Outcome::Conversational(text) => ChatReply { text, decision: None },
        Outcome::Decision { decision, reason, .. } => {
            let text = decision_text(&decision, &reason);
            ChatReply { text, decision: Some(decision) }
        }
    }
}

fn decision_text(decision: &SchedulingDecision, reason: &str) -> String {
    match decision {
        SchedulingDecision::Available { .. } => "That time slot is available.".to_string(),
        SchedulingDecision::Booked { reference, .. } => format!(
            "Your meeting '{}' has been booked. Calendar link: {}",
            reason, reference
        ),
        SchedulingDecision::Conflict { suggestions, .. } if suggestions.is_empty() => {
            "That time slot is already booked. Please try another time.".to_string()
        }
        SchedulingDecision::Conflict { suggestions, .. } => {
            let mut text =
                String::from("That time slot is already booked. Here are some free alternatives:");
            for suggestion in suggestions {
                text.push_str("\n- ");
                text.push_str(&format_instant(suggestion.start()));
            }
            text
        }
        SchedulingDecision::Unresolvable { .. } => {
            "I couldn't determine the date or time. Please try again or say 'help'.".to_string()
        }
    }
}

fn format_instant(instant: DateTime<Tz>) -> String {
    instant.format("%A %d %B, %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use chrono_tz::Asia::Kolkata;
    use slotify_domain::{Intent, TimeWindow};

    use super::*;

    fn window_at(hour: u32, minute: u32) -> TimeWindow {
        let start = Kolkata.with_ymd_and_hms(2025, 7, 11, hour, minute, 0).unwrap();
        TimeWindow::from_start(start, Duration::hours(1)).unwrap()
    }

    fn decision_outcome(decision: SchedulingDecision) -> Outcome {
        Outcome::Decision { decision, intent: Intent::Book, reason: "Team sync".to_string() }
    }

    #[test]
    fn conversational_reply_carries_no_decision() {
        let reply = compose(Outcome::Conversational("Hello!".to_string()));
        assert_eq!(reply.text, "Hello!");
        assert!(reply.decision.is_none());
    }

    #[test]
    fn booked_reply_names_the_meeting_and_link() {
        let reply = compose(decision_outcome(SchedulingDecision::Booked {
            window: window_at(15, 0),
            reference: "https://calendar.example/evt-1".to_string(),
        }));

        assert_eq!(
            reply.text,
            "Your meeting 'Team sync' has been booked. Calendar link: https://calendar.example/evt-1"
        );
    }

    #[test]
    fn available_reply_is_short() {
        let reply =
            compose(decision_outcome(SchedulingDecision::Available { window: window_at(10, 0) }));
        assert_eq!(reply.text, "That time slot is available.");
    }

    #[test]
    fn conflict_without_alternatives_asks_for_another_time() {
        let reply = compose(decision_outcome(SchedulingDecision::Conflict {
            window: window_at(15, 0),
            suggestions: vec![],
        }));
        assert_eq!(reply.text, "That time slot is already booked. Please try another time.");
    }

    #[test]
    fn conflict_lists_each_alternative() {
        let reply = compose(decision_outcome(SchedulingDecision::Conflict {
            window: window_at(15, 0),
            suggestions: vec![window_at(16, 0), window_at(16, 30)],
        }));

        assert!(reply.text.starts_with("That time slot is already booked."));
        assert!(reply.text.contains("- Friday 11 July, 16:00"));
        assert!(reply.text.contains("- Friday 11 July, 16:30"));
    }

    #[test]
    fn unresolvable_reply_asks_to_retry() {
        let reply = compose(decision_outcome(SchedulingDecision::Unresolvable {
            reason: "no usable date".to_string(),
        }));
        assert!(reply.text.contains("couldn't determine the date or time"));
    }
}

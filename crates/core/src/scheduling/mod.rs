//! Scheduling decision engine
//!
//! State machine over the resolved window and intent: queries availability,
//! books, reports conflicts, or collects alternative suggestions.

pub mod ports;
pub mod suggester;

use std::sync::Arc;

use slotify_domain::{AvailabilitySnapshot, Intent, Result, SchedulingDecision, TimeWindow};
use tracing::info;

use self::ports::CalendarPort;

/// Drives the booking decision for one resolved request.
///
/// The availability read and the subsequent event write are two independent
/// backend calls with a time-of-check/time-of-use gap: two concurrent
/// requests targeting the same window can both observe "free" and both
/// write. This double-booking race is an accepted risk, documented rather
/// than fixed; see DESIGN.md.
pub struct SchedulingService {
    calendar: Arc<dyn CalendarPort>,
}

impl SchedulingService {
    pub fn new(calendar: Arc<dyn CalendarPort>) -> Self {
        Self { calendar }
    }

    /// Decide what to do with the resolved window.
    ///
    /// `check` never attaches suggestions; `book` writes at most once per
    /// request and only when the slot is free; `unknown` terminates without
    /// touching the backend.
    ///
    /// # Errors
    /// Backend failures (availability read or event write) propagate as
    /// `SlotifyError::Backend`/`Network` - distinct from a normal conflict
    /// and not retried here.
    pub async fn decide(
        &self,
        intent: Intent,
        window: TimeWindow,
        reason: &str,
    ) -> Result<SchedulingDecision> {
        if intent == Intent::Unknown {
            return Ok(SchedulingDecision::Unresolvable {
                reason: "could not tell whether to book or check".to_string(),
            });
        }

        let snapshot = AvailabilitySnapshot {
            window,
            free: self.calendar.check_availability(&window).await?,
        };
        info!(start = %window.start(), free = snapshot.free, ?intent, "availability checked");

        match (intent, snapshot.free) {
            (Intent::Check, true) => Ok(SchedulingDecision::Available { window }),
            (Intent::Check, false) => {
                // Suggestions are a book-only courtesy
                Ok(SchedulingDecision::Conflict { window, suggestions: Vec::new() })
            }
            (Intent::Book, true) => {
                let slot = self.calendar.book_slot(reason, &window).await?;
                info!(start = %window.start(), reason, "slot booked");
                Ok(SchedulingDecision::Booked { window, reference: slot.html_link })
            }
            (Intent::Book, false) => {
                let suggestions =
                    suggester::suggest_alternatives(self.calendar.as_ref(), &window).await?;
                info!(count = suggestions.len(), "conflict; alternatives collected");
                Ok(SchedulingDecision::Conflict { window, suggestions })
            }
            (Intent::Unknown, _) => unreachable!("handled above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use chrono_tz::Asia::Kolkata;
    use slotify_domain::SlotifyError;

    use super::*;

    /// Scripted calendar: availability answers are served in call order;
    /// bookings are recorded.
    struct ScriptedCalendar {
        availability: Mutex<Vec<bool>>,
        bookings: Mutex<Vec<String>>,
        fail_reads: bool,
    }

    impl ScriptedCalendar {
        fn new(availability: Vec<bool>) -> Self {
            Self {
                availability: Mutex::new(availability),
                bookings: Mutex::new(Vec::new()),
                fail_reads: false,
            }
        }

        fn failing() -> Self {
            Self {
                availability: Mutex::new(Vec::new()),
                bookings: Mutex::new(Vec::new()),
                fail_reads: true,
            }
        }

        fn booking_count(&self) -> usize {
            self.bookings.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CalendarPort for ScriptedCalendar {
        async fn check_availability(&self, _window: &TimeWindow) -> Result<bool> {
            if self.fail_reads {
                return Err(SlotifyError::Backend("calendar unreachable".into()));
            }
            let mut answers = self.availability.lock().unwrap();
            if answers.is_empty() {
                return Ok(false);
            }
            Ok(answers.remove(0))
        }

        async fn book_slot(&self, title: &str, _window: &TimeWindow) -> Result<ports::BookedSlot> {
            self.bookings.lock().unwrap().push(title.to_string());
            Ok(ports::BookedSlot { html_link: "https://calendar.example/evt-1".into() })
        }
    }

    fn window_at(hour: u32) -> TimeWindow {
        let start = Kolkata.with_ymd_and_hms(2025, 7, 11, hour, 0, 0).unwrap();
        TimeWindow::from_start(start, Duration::hours(1)).unwrap()
    }

    #[tokio::test]
    async fn check_free_is_available_with_no_write() {
        let calendar = Arc::new(ScriptedCalendar::new(vec![true]));
        let service = SchedulingService::new(calendar.clone());

        let decision = service.decide(Intent::Check, window_at(10), "Sync").await.unwrap();

        assert!(matches!(decision, SchedulingDecision::Available { .. }));
        assert_eq!(calendar.booking_count(), 0);
    }

    #[tokio::test]
    async fn check_conflict_carries_no_suggestions() {
        let calendar = Arc::new(ScriptedCalendar::new(vec![false]));
        let service = SchedulingService::new(calendar.clone());

        let decision = service.decide(Intent::Check, window_at(10), "Sync").await.unwrap();

        match decision {
            SchedulingDecision::Conflict { suggestions, .. } => assert!(suggestions.is_empty()),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(calendar.booking_count(), 0);
    }

    #[tokio::test]
    async fn book_free_slot_writes_once() {
        let calendar = Arc::new(ScriptedCalendar::new(vec![true]));
        let service = SchedulingService::new(calendar.clone());

        let decision = service.decide(Intent::Book, window_at(15), "Demo").await.unwrap();

        match decision {
            SchedulingDecision::Booked { reference, .. } => {
                assert_eq!(reference, "https://calendar.example/evt-1");
            }
            other => panic!("expected booked, got {:?}", other),
        }
        assert_eq!(calendar.booking_count(), 1);
    }

    #[tokio::test]
    async fn book_conflict_collects_ordered_suggestions() {
        // Requested slot taken; probes at +30/+60/+90/+120: second and
        // fourth are free
        let calendar =
            Arc::new(ScriptedCalendar::new(vec![false, false, true, false, true]));
        let service = SchedulingService::new(calendar.clone());

        let requested = window_at(15);
        let decision = service.decide(Intent::Book, requested, "Demo").await.unwrap();

        match decision {
            SchedulingDecision::Conflict { suggestions, .. } => {
                assert_eq!(suggestions.len(), 2);
                assert_eq!(
                    suggestions[0].start(),
                    requested.start() + Duration::minutes(60)
                );
                assert_eq!(
                    suggestions[1].start(),
                    requested.start() + Duration::minutes(120)
                );
            }
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(calendar.booking_count(), 0);
    }

    #[tokio::test]
    async fn suggestions_are_bounded_at_three() {
        // All four probes would be free; only three are returned and the
        // fourth offset is never probed
        let calendar = Arc::new(ScriptedCalendar::new(vec![false, true, true, true, true]));
        let service = SchedulingService::new(calendar.clone());

        let requested = window_at(15);
        let decision = service.decide(Intent::Book, requested, "Demo").await.unwrap();

        match decision {
            SchedulingDecision::Conflict { suggestions, .. } => {
                assert_eq!(suggestions.len(), 3);
                let offsets: Vec<i64> = suggestions
                    .iter()
                    .map(|s| (s.start() - requested.start()).num_minutes())
                    .collect();
                assert_eq!(offsets, vec![30, 60, 90]);
            }
            other => panic!("expected conflict, got {:?}", other),
        }
        // One probe answer must remain unconsumed (the +120 offset)
        assert_eq!(calendar.availability.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_free_probe_yields_empty_suggestions() {
        let calendar = Arc::new(ScriptedCalendar::new(vec![false; 5]));
        let service = SchedulingService::new(calendar.clone());

        let decision = service.decide(Intent::Book, window_at(15), "Demo").await.unwrap();

        match decision {
            SchedulingDecision::Conflict { suggestions, .. } => assert!(suggestions.is_empty()),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_intent_never_touches_the_backend() {
        let calendar = Arc::new(ScriptedCalendar::failing());
        let service = SchedulingService::new(calendar);

        let decision = service.decide(Intent::Unknown, window_at(15), "Demo").await.unwrap();

        assert!(matches!(decision, SchedulingDecision::Unresolvable { .. }));
    }

    #[tokio::test]
    async fn backend_failure_is_not_a_conflict() {
        let calendar = Arc::new(ScriptedCalendar::failing());
        let service = SchedulingService::new(calendar);

        let result = service.decide(Intent::Check, window_at(15), "Demo").await;

        assert!(matches!(result, Err(SlotifyError::Backend(_))));
    }
}

//! Assistant pipeline
//!
//! End-to-end flow for one user message: conversational gate, intent
//! extraction, datetime resolution, scheduling decision. Each stage either
//! short-circuits with a terminal outcome or hands a richer value to the
//! next.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use slotify_domain::{Config, Intent, Result, SchedulingDecision};
use tracing::{debug, info};

use crate::conversation::ConversationalGate;
use crate::extraction::ports::StructuredExtractor;
use crate::extraction::IntentExtractor;
use crate::resolver;
use crate::scheduling::ports::CalendarPort;
use crate::scheduling::SchedulingService;

/// Terminal outcome of one processed message.
#[derive(Debug)]
pub enum Outcome {
    /// The gate intercepted small-talk; no scheduling machinery ran.
    Conversational(String),
    /// The full pipeline ran and produced a decision.
    Decision {
        decision: SchedulingDecision,
        intent: Intent,
        reason: String,
    },
}

/// The scheduling assistant: wires the gate, extractor, resolver and
/// decision engine behind a single entry point.
pub struct Assistant {
    timezone: Tz,
    gate: ConversationalGate,
    extractor: IntentExtractor,
    scheduler: SchedulingService,
}

impl Assistant {
    pub fn new(
        config: &Config,
        provider: Arc<dyn StructuredExtractor>,
        calendar: Arc<dyn CalendarPort>,
    ) -> Result<Self> {
        Ok(Self {
            timezone: config.tz()?,
            gate: ConversationalGate::new(config.response_seed),
            extractor: IntentExtractor::new(provider),
            scheduler: SchedulingService::new(calendar),
        })
    }

    /// Process one message against the current wall clock.
    pub async fn process(&self, input: &str) -> Result<Outcome> {
        self.process_at(input, Utc::now().with_timezone(&self.timezone)).await
    }

    /// Process one message with an explicit reference instant. All relative
    /// phrasing ("tomorrow", weekday names, past-year correction) resolves
    /// against `now`.
    pub async fn process_at(&self, input: &str, now: DateTime<Tz>) -> Result<Outcome> {
        if let Some(reply) = self.gate.intercept(input) {
            debug!("conversational input intercepted");
            return Ok(Outcome::Conversational(reply));
        }

        let candidate = self.extractor.extract(input, now.date_naive()).await;
        info!(
            intent = ?candidate.intent,
            source = ?candidate.source,
            usable = candidate.has_usable_fields(),
            "intent extracted"
        );

        let Some(window) = resolver::resolve_window(input, &candidate, now) else {
            return Ok(Outcome::Decision {
                decision: SchedulingDecision::Unresolvable {
                    reason: "could not work out a date and time from the request".to_string(),
                },
                intent: candidate.intent,
                reason: candidate.reason,
            });
        };

        let decision =
            self.scheduler.decide(candidate.intent, window, &candidate.reason).await?;

        Ok(Outcome::Decision { decision, intent: candidate.intent, reason: candidate.reason })
    }
}

//! Intent extraction
//!
//! Combines the structured-extraction signal (delegated to an external
//! text-understanding service behind [`StructuredExtractor`]) with
//! deterministic fallbacks to produce an [`IntentCandidate`]. Malformed or
//! missing service output degrades to field defaults; this component never
//! fails a request.

pub mod ports;

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Timelike};
use slotify_domain::constants::{DEFAULT_INTENT_LABEL, DEFAULT_REASON, DEFAULT_TIME_LABEL};
use slotify_domain::{Intent, IntentCandidate, IntentSource};
use tracing::{debug, warn};

use self::ports::{PartialFields, StructuredExtractor};

/// Salvage one JSON object from a free-text service payload.
///
/// Tolerates code-fence wrapping and surrounding prose: strips ``` fences,
/// attempts a direct parse, then falls back to the first balanced `{...}`
/// region. Any parse failure yields the empty object rather than an error.
pub fn salvage_fields(payload: &str) -> PartialFields {
    let stripped: String = payload
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n");
    let stripped = stripped.trim();

    if let Ok(fields) = serde_json::from_str::<PartialFields>(stripped) {
        return fields;
    }

    balanced_object(stripped)
        .and_then(|region| serde_json::from_str::<PartialFields>(region).ok())
        .unwrap_or_default()
}

/// Locate the first balanced `{...}` region in `text`.
fn balanced_object(text: &str) -> Option<&str> {
    let open = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[open..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open..=open + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Produces one [`IntentCandidate`] per request from the structured signal
/// plus deterministic defaults.
pub struct IntentExtractor {
    provider: Arc<dyn StructuredExtractor>,
}

impl IntentExtractor {
    pub fn new(provider: Arc<dyn StructuredExtractor>) -> Self {
        Self { provider }
    }

    /// Extract a candidate from `input`. Never fails: a provider error or
    /// unusable payload degrades to an all-defaults candidate that the
    /// resolver completes via natural-language fallback.
    pub async fn extract(&self, input: &str, today: NaiveDate) -> IntentCandidate {
        let fields = match self.provider.extract(input, today).await {
            Ok(fields) => fields,
            Err(err) => {
                warn!(error = %err, "structured extraction failed; degrading to defaults");
                return Self::defaults(IntentSource::None);
            }
        };

        debug!(?fields, "structured extraction returned");
        Self::candidate_from_fields(fields)
    }

    fn candidate_from_fields(fields: PartialFields) -> IntentCandidate {
        let intent =
            Intent::from_label(fields.intent.as_deref().unwrap_or(DEFAULT_INTENT_LABEL));

        let date = fields.date.as_deref().and_then(parse_date_label);
        let time_label = fields.time.as_deref().unwrap_or(DEFAULT_TIME_LABEL);
        let time = parse_time_label(time_label).or_else(|| parse_time_label(DEFAULT_TIME_LABEL));
        let explicit_minute = time.is_some_and(|t| t.minute() != 0);

        let reason = fields
            .reason
            .as_deref()
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .unwrap_or(DEFAULT_REASON)
            .to_string();

        // No usable date means the resolver runs the natural-language
        // fallback over the raw text instead
        let source = if date.is_some() || fields.time.is_some() {
            IntentSource::StructuredService
        } else {
            IntentSource::FallbackParser
        };

        IntentCandidate { intent, date, time, explicit_minute, reason, source }
    }

    fn defaults(source: IntentSource) -> IntentCandidate {
        IntentCandidate {
            intent: Intent::Book,
            date: None,
            time: parse_time_label(DEFAULT_TIME_LABEL),
            explicit_minute: false,
            reason: DEFAULT_REASON.to_string(),
            source,
        }
    }
}

fn parse_date_label(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label.trim(), "%Y-%m-%d").ok()
}

fn parse_time_label(label: &str) -> Option<NaiveTime> {
    let trimmed = label.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}

//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Extraction defaults applied when the structured service omits fields
pub const DEFAULT_INTENT_LABEL: &str = "book";
pub const DEFAULT_TIME_LABEL: &str = "12:00";
pub const DEFAULT_REASON: &str = "Meeting";

// Scheduling configuration
pub const DEFAULT_DURATION_MINUTES: i64 = 60;
pub const SUGGESTION_OFFSETS_MINUTES: [i64; 4] = [30, 60, 90, 120];
pub const MAX_SUGGESTIONS: usize = 3;

// Conversational gate: inputs shorter than this (after trimming) are treated
// as conversational rather than scheduling requests
pub const MIN_SCHEDULING_INPUT_LEN: usize = 2;

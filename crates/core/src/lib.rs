//! # Slotify Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The natural-language intent and time-window resolution engine
//! - The scheduling decision engine and alternative-time suggester
//! - Port/adapter interfaces (traits) for the two external collaborators:
//!   the structured-extraction service and the calendar backend
//!
//! ## Architecture Principles
//! - Only depends on `slotify-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod conversation;
pub mod extraction;
pub mod lexicon;
pub mod natural;
pub mod pipeline;
pub mod resolver;
pub mod scheduling;
pub mod timerange;

// Re-export specific items to avoid ambiguity
pub use conversation::ConversationalGate;
pub use extraction::ports::{PartialFields, StructuredExtractor};
pub use extraction::IntentExtractor;
pub use pipeline::{Assistant, Outcome};
pub use resolver::resolve_window;
pub use scheduling::ports::{BookedSlot, CalendarPort};
pub use scheduling::suggester::suggest_alternatives;
pub use scheduling::SchedulingService;

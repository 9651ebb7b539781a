//! # Slotify Application
//!
//! User-facing layer: wires configuration and the service adapters into the
//! assistant, and renders scheduling decisions as chat replies.

pub mod compose;
pub mod context;

pub use compose::ChatReply;
pub use context::AppContext;

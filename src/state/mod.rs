//! State management module
//!
//! The persisted reminder record, the machine phases, the event types, and
//! the state machine that owns them all.

pub mod app_state;
pub mod events;
pub mod phase;
pub mod reminder_state;
pub mod store;

// Re-export main types
pub use app_state::{AppState, TickOutcome};
pub use events::{Decision, DecisionOutcome, ReminderDue};
pub use phase::Phase;
pub use reminder_state::{ReminderState, SCHEMA_VERSION};
pub use store::StateStore;

//! Scheduling core for tymr.
//!
//! Pure, synchronous functions over an in-memory event collection:
//! - `grid` builds the 42-cell month view and ISO week numbers
//! - `recurrence` expands a recurring event into its instances
//! - `conflict` finds events whose time ranges overlap a candidate
//! - `suggest` proposes free slots around existing commitments
//!
//! `schedule` wraps these around an owned collection, and `search`,
//! `stats`, `navigation` and `validation` cover the rest of what a
//! calendar front end needs.

pub mod config;
pub mod conflict;
pub mod error;
pub mod event;
pub mod grid;
pub mod navigation;
pub mod recurrence;
pub mod schedule;
pub mod search;
pub mod stats;
pub mod suggest;
pub mod time;
pub mod validation;

// Re-export the data model at crate root for convenience
pub use error::{TymrError, TymrResult};
pub use event::{Event, EventDraft, EventId, Priority, RecurringType};
pub use time::MinuteOfDay;

//! Cadence core data models.
//!
//! This crate defines the fundamental data structures that power the
//! habit recurrence and progress analytics engine.

#![warn(missing_docs)]

// Core identities
mod id;

// Goal definition and validation
mod goal;

// Completion / miss / mood records
mod record;
mod mood;

// Calendar primitives
mod weekday;
mod calendar;
mod clock;

// Validation errors
mod error;

// Re-exports
pub use id::GoalId;

// Goal
pub use goal::{Goal, GoalInput};

// Records
pub use record::{CompletionRecord, MissRecord, PairStatus};
pub use mood::{MoodEntry, MAX_MOOD_SCORE, MIN_MOOD_SCORE};

// Calendar
pub use weekday::Weekday;
pub use calendar::{days_in, month_bounds, month_label, month_of, trailing_months};
pub use clock::{Clock, FixedClock, SystemClock};

// Errors
pub use error::ValidationError;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

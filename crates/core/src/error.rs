//! Validation errors for user-supplied input.

use chrono::NaiveDate;

/// Errors raised when user input fails the model's integrity rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Goal title must not be empty
    #[error("goal title must not be empty")]
    EmptyTitle,

    /// Goal frequency must name at least one weekday
    #[error("goal frequency must include at least one weekday")]
    EmptyFrequency,

    /// End date precedes start date
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Goal start date
        start: NaiveDate,
        /// Offending end date
        end: NaiveDate,
    },

    /// Weekday name not one of Monday..Sunday
    #[error("unknown weekday name: {0}")]
    UnknownWeekday(String),

    /// Mood score outside [1, 10]
    #[error("mood score {0} is outside the 1-10 range")]
    MoodOutOfRange(u8),
}

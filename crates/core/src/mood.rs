//! Daily mood entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Time, ValidationError};

/// Lowest mood score a user can record.
pub const MIN_MOOD_SCORE: u8 = 1;

/// Highest mood score a user can record.
pub const MAX_MOOD_SCORE: u8 = 10;

/// One mood score per calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    /// Date the mood applies to
    pub date: NaiveDate,

    /// Score in [1, 10]
    pub score: u8,

    /// When the entry was recorded
    pub created_at: Time,
}

impl MoodEntry {
    /// Build a validated mood entry.
    pub fn new(date: NaiveDate, score: u8, created_at: Time) -> Result<Self, ValidationError> {
        if !(MIN_MOOD_SCORE..=MAX_MOOD_SCORE).contains(&score) {
            return Err(ValidationError::MoodOutOfRange(score));
        }
        Ok(Self {
            date,
            score,
            created_at,
        })
    }
}

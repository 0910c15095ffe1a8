//! Goal model - a recurring habit with a weekday frequency and active range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::GoalId;
use crate::{Time, ValidationError, Weekday};

/// A user-defined recurring goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: GoalId,

    /// Goal title
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Display color tag, opaque to the engine
    pub color: String,

    /// Weekdays the goal recurs on (non-empty)
    pub frequency: Vec<Weekday>,

    /// First date the goal is active
    pub start_date: NaiveDate,

    /// Last active date, open-ended when absent
    pub end_date: Option<NaiveDate>,

    /// Display start time, opaque to the engine
    pub start_time: String,

    /// Display end time, opaque to the engine
    pub end_time: String,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

/// Input for creating or editing a goal, before an id is assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
    /// Goal title (must be non-empty)
    pub title: String,

    /// Detailed description
    pub description: String,

    /// Display color tag
    pub color: String,

    /// Weekdays the goal recurs on (must be non-empty)
    pub frequency: Vec<Weekday>,

    /// First date the goal is active
    pub start_date: NaiveDate,

    /// Last active date, open-ended when absent
    pub end_date: Option<NaiveDate>,

    /// Display start time
    pub start_time: String,

    /// Display end time
    pub end_time: String,
}

impl GoalInput {
    /// Check the input against the model's integrity rules.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.frequency.is_empty() {
            return Err(ValidationError::EmptyFrequency);
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }
        Ok(())
    }

    /// Materialize a goal from validated input.
    pub fn into_goal(self, id: GoalId, now: Time) -> Goal {
        Goal {
            id,
            title: self.title,
            description: self.description,
            color: self.color,
            frequency: self.frequency,
            start_date: self.start_date,
            end_date: self.end_date,
            start_time: self.start_time,
            end_time: self.end_time,
            created_at: now,
            updated_at: now,
        }
    }
}

//! Completion and miss records.
//!
//! Both record kinds are keyed by the (goal, date) pair; the ledger keeps
//! them mutually exclusive so a pair occupies exactly one `PairStatus`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::GoalId;
use crate::Time;

/// Evidence that a due goal was completed on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Goal this completion belongs to
    pub goal_id: GoalId,

    /// Date the goal was completed
    pub completed_date: NaiveDate,
}

impl CompletionRecord {
    /// Build a completion for a (goal, date) pair.
    pub fn new(goal_id: GoalId, completed_date: NaiveDate) -> Self {
        Self {
            goal_id,
            completed_date,
        }
    }

    /// Whether this record is for the given pair.
    pub fn matches(&self, goal_id: GoalId, date: NaiveDate) -> bool {
        self.goal_id == goal_id && self.completed_date == date
    }
}

/// Evidence that a due goal was missed on a date, with optional reflection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissRecord {
    /// Goal this miss belongs to
    pub goal_id: GoalId,

    /// Date the goal was missed
    pub missed_date: NaiveDate,

    /// Why the goal was missed
    pub reason: Option<String>,

    /// Plan to succeed next time
    pub improvement_plan: Option<String>,

    /// When the miss was recorded
    pub recorded_at: Time,
}

impl MissRecord {
    /// Whether this record is for the given pair.
    pub fn matches(&self, goal_id: GoalId, date: NaiveDate) -> bool {
        self.goal_id == goal_id && self.missed_date == date
    }
}

/// Canonical state of a single (goal, date) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairStatus {
    /// No record exists for the pair
    Pending,
    /// A completion record exists
    Completed,
    /// A miss record exists
    Missed,
}

impl PairStatus {
    /// Whether the pair is completed.
    pub fn is_completed(self) -> bool {
        self == PairStatus::Completed
    }

    /// Whether the pair is missed.
    pub fn is_missed(self) -> bool {
        self == PairStatus::Missed
    }
}

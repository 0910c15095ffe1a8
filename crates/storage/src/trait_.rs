//! Storage trait abstraction.

use async_trait::async_trait;
use cadence_core::{CompletionRecord, Goal, GoalId, MissRecord, MoodEntry};
use chrono::NaiveDate;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Natural-key violation
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for Cadence data.
///
/// Date intervals are closed on both ends. Completion and miss records are
/// keyed by their (goal, date) pair; mood entries by date. The backends
/// enforce those natural keys: `insert_completion` conflicts on a
/// duplicate pair, `save_miss` and `save_mood` replace. Toggle and
/// mutual-exclusion semantics live in the ledger, not here.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Goal operations ===

    /// Save a goal (create or update).
    async fn save_goal(&mut self, goal: &Goal) -> Result<()>;

    /// Load a goal by ID.
    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>>;

    /// List all goals.
    async fn list_goals(&self) -> Result<Vec<Goal>>;

    /// Delete a goal.
    async fn delete_goal(&mut self, id: GoalId) -> Result<()>;

    // === Completion operations ===

    /// Insert a completion record; errors with `Conflict` if the
    /// (goal, date) pair already has one.
    async fn insert_completion(&mut self, record: &CompletionRecord) -> Result<()>;

    /// Remove the completion for a (goal, date) pair. Absence is not an
    /// error.
    async fn remove_completion(&mut self, goal_id: GoalId, date: NaiveDate) -> Result<()>;

    /// List completions whose date falls in `[start, end]`.
    async fn list_completions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompletionRecord>>;

    // === Miss operations ===

    /// Save a miss record, replacing any existing one for the pair.
    async fn save_miss(&mut self, record: &MissRecord) -> Result<()>;

    /// Remove the miss for a (goal, date) pair. Absence is not an error.
    async fn remove_miss(&mut self, goal_id: GoalId, date: NaiveDate) -> Result<()>;

    /// List misses whose date falls in `[start, end]`.
    async fn list_misses(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MissRecord>>;

    // === Mood operations ===

    /// Save a mood entry, replacing any existing one for the date.
    async fn save_mood(&mut self, entry: &MoodEntry) -> Result<()>;

    /// Load the mood entry for a date.
    async fn load_mood(&self, date: NaiveDate) -> Result<Option<MoodEntry>>;

    /// List mood entries whose date falls in `[start, end]`.
    async fn list_moods(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>>;
}

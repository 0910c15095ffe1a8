//! Ledger error type.

use cadence_core::{GoalId, ValidationError};
use cadence_storage::StorageError;

/// Errors surfaced by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Repository failure, propagated unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Input failed model validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Mutation referenced an unknown goal
    #[error("unknown goal: {0}")]
    GoalNotFound(GoalId),
}

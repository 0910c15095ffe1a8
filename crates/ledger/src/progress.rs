//! Completion and miss state for (goal, date) pairs.
//!
//! The ledger holds the records loaded for a date window (typically one
//! month, refetched on navigation) and owns the state machine for a pair:
//!
//! ```text
//! Pending <-> Completed   (toggle_completion)
//! Pending  -> Missed      (mark_missed; also Completed -> Missed,
//!                          clearing the completion)
//! Missed   -> Pending     (clear_miss)
//! ```
//!
//! Completed and Missed are mutually exclusive: completing clears a miss
//! and missing clears a completion. Every mutation persists first; the
//! in-memory window is updated only after a successful write, so a failed
//! write leaves loaded state untouched.

use std::sync::Arc;

use cadence_core::{CompletionRecord, GoalId, MissRecord, PairStatus, Time};
use cadence_storage::Storage;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{LedgerError, Result};

/// Records loaded for one date window.
#[derive(Debug, Clone, Default)]
struct Window {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    completions: Vec<CompletionRecord>,
    misses: Vec<MissRecord>,
}

impl Window {
    fn covers(&self, date: NaiveDate) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s <= date && date <= e)
    }
}

/// Window-scoped completion/miss ledger over an injected repository.
pub struct ProgressLedger<S: Storage> {
    storage: Arc<RwLock<S>>,
    window: Window,
}

impl<S: Storage> ProgressLedger<S> {
    /// Create a ledger with an empty window.
    pub fn new(storage: Arc<RwLock<S>>) -> Self {
        Self {
            storage,
            window: Window::default(),
        }
    }

    /// Fetch completions and misses for `[start, end]`, replacing the
    /// loaded window.
    ///
    /// Both fetches are issued concurrently and must both succeed; on any
    /// failure the previous window stays loaded and a single error
    /// surfaces.
    pub async fn load_window(&mut self, start: NaiveDate, end: NaiveDate) -> Result<()> {
        let (completions, misses) = {
            let storage = self.storage.read().await;
            tokio::try_join!(
                storage.list_completions(start, end),
                storage.list_misses(start, end),
            )?
        };

        debug!(
            %start, %end,
            completions = completions.len(),
            misses = misses.len(),
            "loaded progress window"
        );
        self.window = Window {
            start: Some(start),
            end: Some(end),
            completions,
            misses,
        };
        Ok(())
    }

    /// Bounds of the loaded window, if any.
    pub fn window_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.window.start.zip(self.window.end)
    }

    /// Completions currently loaded.
    pub fn completions(&self) -> &[CompletionRecord] {
        &self.window.completions
    }

    /// Misses currently loaded.
    pub fn misses(&self) -> &[MissRecord] {
        &self.window.misses
    }

    /// Canonical status of a (goal, date) pair, derived from the loaded
    /// window.
    ///
    /// A miss wins over a completion for pre-existing inconsistent data;
    /// after any mutation through this ledger the two cannot coexist.
    pub fn status(&self, goal_id: GoalId, date: NaiveDate) -> PairStatus {
        if self.window.misses.iter().any(|m| m.matches(goal_id, date)) {
            PairStatus::Missed
        } else if self
            .window
            .completions
            .iter()
            .any(|c| c.matches(goal_id, date))
        {
            PairStatus::Completed
        } else {
            PairStatus::Pending
        }
    }

    /// Flip the completion state of a (goal, date) pair.
    ///
    /// Completed pairs revert to Pending; otherwise the pair becomes
    /// Completed, clearing any miss for it. Returns the resulting status.
    pub async fn toggle_completion(&mut self, goal_id: GoalId, date: NaiveDate) -> Result<PairStatus> {
        self.require_goal(goal_id).await?;

        let mut storage = self.storage.write().await;
        let already_completed = storage
            .list_completions(date, date)
            .await?
            .iter()
            .any(|c| c.goal_id == goal_id);

        if already_completed {
            storage.remove_completion(goal_id, date).await?;
            drop(storage);
            debug!(%goal_id, %date, "completion toggled off");
            self.forget_completion(goal_id, date);
            Ok(PairStatus::Pending)
        } else {
            let had_miss = storage
                .list_misses(date, date)
                .await?
                .iter()
                .any(|m| m.goal_id == goal_id);

            storage
                .insert_completion(&CompletionRecord::new(goal_id, date))
                .await?;
            if had_miss {
                storage.remove_miss(goal_id, date).await?;
            }
            drop(storage);
            debug!(%goal_id, %date, cleared_miss = had_miss, "completion toggled on");
            self.forget_miss(goal_id, date);
            self.remember_completion(goal_id, date);
            Ok(PairStatus::Completed)
        }
    }

    /// Record (or replace) a miss for a (goal, date) pair, clearing any
    /// completion for it.
    pub async fn mark_missed(
        &mut self,
        goal_id: GoalId,
        date: NaiveDate,
        reason: Option<String>,
        improvement_plan: Option<String>,
        recorded_at: Time,
    ) -> Result<()> {
        self.require_goal(goal_id).await?;

        let record = MissRecord {
            goal_id,
            missed_date: date,
            reason,
            improvement_plan,
            recorded_at,
        };

        let mut storage = self.storage.write().await;
        let had_completion = storage
            .list_completions(date, date)
            .await?
            .iter()
            .any(|c| c.goal_id == goal_id);

        // The completion is removed first: if the miss write then fails,
        // the stored pair reads Pending instead of both completed and
        // missed.
        if had_completion {
            storage.remove_completion(goal_id, date).await?;
        }
        storage.save_miss(&record).await?;
        drop(storage);

        debug!(%goal_id, %date, cleared_completion = had_completion, "marked missed");
        self.forget_completion(goal_id, date);
        self.forget_miss(goal_id, date);
        self.remember_miss(record);
        Ok(())
    }

    /// Revert a missed pair to Pending.
    pub async fn clear_miss(&mut self, goal_id: GoalId, date: NaiveDate) -> Result<()> {
        self.require_goal(goal_id).await?;

        self.storage.write().await.remove_miss(goal_id, date).await?;
        debug!(%goal_id, %date, "miss cleared");
        self.forget_miss(goal_id, date);
        Ok(())
    }

    async fn require_goal(&self, goal_id: GoalId) -> Result<()> {
        match self.storage.read().await.load_goal(goal_id).await? {
            Some(_) => Ok(()),
            None => Err(LedgerError::GoalNotFound(goal_id)),
        }
    }

    // In-memory window deltas, applied only after a successful write and
    // only for dates inside the loaded window.

    fn remember_completion(&mut self, goal_id: GoalId, date: NaiveDate) {
        if self.window.covers(date) {
            self.window
                .completions
                .push(CompletionRecord::new(goal_id, date));
        }
    }

    fn forget_completion(&mut self, goal_id: GoalId, date: NaiveDate) {
        self.window
            .completions
            .retain(|c| !c.matches(goal_id, date));
    }

    fn remember_miss(&mut self, record: MissRecord) {
        if self.window.covers(record.missed_date) {
            self.window.misses.push(record);
        }
    }

    fn forget_miss(&mut self, goal_id: GoalId, date: NaiveDate) {
        self.window.misses.retain(|m| !m.matches(goal_id, date));
    }
}

//! Goal management.

use std::sync::Arc;

use cadence_core::{Clock, Goal, GoalId, GoalInput};
use cadence_storage::Storage;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{LedgerError, Result};

/// Validated goal CRUD over an injected repository.
pub struct GoalDirectory<S: Storage> {
    storage: Arc<RwLock<S>>,
    clock: Arc<dyn Clock>,
}

impl<S: Storage> GoalDirectory<S> {
    /// Create a goal directory.
    pub fn new(storage: Arc<RwLock<S>>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Validate input and create a new goal.
    pub async fn create(&mut self, input: GoalInput) -> Result<Goal> {
        input.validate()?;
        let goal = input.into_goal(GoalId::new(), self.clock.now());
        self.storage.write().await.save_goal(&goal).await?;
        debug!(id = %goal.id, title = %goal.title, "goal created");
        Ok(goal)
    }

    /// Update an existing goal, refreshing its `updated_at` timestamp.
    pub async fn update(&mut self, mut goal: Goal) -> Result<Goal> {
        let mut storage = self.storage.write().await;
        if storage.load_goal(goal.id).await?.is_none() {
            return Err(LedgerError::GoalNotFound(goal.id));
        }
        goal.updated_at = self.clock.now();
        storage.save_goal(&goal).await?;
        debug!(id = %goal.id, "goal updated");
        Ok(goal)
    }

    /// Delete a goal by id.
    pub async fn delete(&mut self, id: GoalId) -> Result<()> {
        let mut storage = self.storage.write().await;
        if storage.load_goal(id).await?.is_none() {
            return Err(LedgerError::GoalNotFound(id));
        }
        storage.delete_goal(id).await?;
        debug!(%id, "goal deleted");
        Ok(())
    }

    /// Load a goal by id.
    pub async fn get(&self, id: GoalId) -> Result<Option<Goal>> {
        Ok(self.storage.read().await.load_goal(id).await?)
    }

    /// All goals.
    pub async fn list(&self) -> Result<Vec<Goal>> {
        Ok(self.storage.read().await.list_goals().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{FixedClock, ValidationError, Weekday};
    use cadence_storage::MemoryStorage;
    use chrono::{NaiveDate, TimeZone};

    fn directory() -> GoalDirectory<MemoryStorage> {
        let instant = chrono::Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        GoalDirectory::new(
            Arc::new(RwLock::new(MemoryStorage::new())),
            Arc::new(FixedClock(instant)),
        )
    }

    fn input(title: &str) -> GoalInput {
        GoalInput {
            title: title.to_string(),
            description: String::new(),
            color: "#06B6D4".to_string(),
            frequency: vec![Weekday::Friday],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            start_time: "07:00".to_string(),
            end_time: "07:30".to_string(),
        }
    }

    #[tokio::test]
    async fn create_list_delete() {
        let mut goals = directory();
        let created = goals.create(input("Stretch")).await.unwrap();

        let listed = goals.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        goals.delete(created.id).await.unwrap();
        assert!(goals.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_input_is_rejected_before_any_write() {
        let mut goals = directory();
        let err = goals.create(input("")).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::EmptyTitle)
        ));
        assert!(goals.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_replaces_stored_fields() {
        let mut goals = directory();
        let created = goals.create(input("Stretch")).await.unwrap();

        let mut edited = created.clone();
        edited.title = "Full stretch".to_string();
        edited.frequency = vec![Weekday::Monday, Weekday::Friday];
        let updated = goals.update(edited).await.unwrap();

        let stored = goals.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Full stretch");
        assert_eq!(stored.frequency, vec![Weekday::Monday, Weekday::Friday]);
        assert_eq!(stored.updated_at, updated.updated_at);
    }

    #[tokio::test]
    async fn update_unknown_goal_is_not_found() {
        let mut goals = directory();
        let phantom = input("Stretch").into_goal(GoalId::new(), chrono::Utc::now());
        let err = goals.update(phantom).await.unwrap_err();
        assert!(matches!(err, LedgerError::GoalNotFound(_)));
    }
}

//! In-memory storage backend.
//!
//! Used by tests and ephemeral CLI runs. Natural keys map directly onto
//! the backing maps, so uniqueness holds by construction.

use std::collections::HashMap;

use async_trait::async_trait;
use cadence_core::{CompletionRecord, Goal, GoalId, MissRecord, MoodEntry};
use chrono::NaiveDate;

use super::{Result, Storage, StorageError};

/// Map-backed storage with no persistence.
#[derive(Default)]
pub struct MemoryStorage {
    goals: HashMap<GoalId, Goal>,
    completions: HashMap<(GoalId, NaiveDate), CompletionRecord>,
    misses: HashMap<(GoalId, NaiveDate), MissRecord>,
    moods: HashMap<NaiveDate, MoodEntry>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save_goal(&mut self, goal: &Goal) -> Result<()> {
        self.goals.insert(goal.id, goal.clone());
        Ok(())
    }

    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>> {
        Ok(self.goals.get(&id).cloned())
    }

    async fn list_goals(&self) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self.goals.values().cloned().collect();
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    async fn delete_goal(&mut self, id: GoalId) -> Result<()> {
        self.goals.remove(&id);
        Ok(())
    }

    async fn insert_completion(&mut self, record: &CompletionRecord) -> Result<()> {
        let key = (record.goal_id, record.completed_date);
        if self.completions.contains_key(&key) {
            return Err(StorageError::Conflict(format!(
                "completion already exists for goal {} on {}",
                record.goal_id, record.completed_date
            )));
        }
        self.completions.insert(key, record.clone());
        Ok(())
    }

    async fn remove_completion(&mut self, goal_id: GoalId, date: NaiveDate) -> Result<()> {
        self.completions.remove(&(goal_id, date));
        Ok(())
    }

    async fn list_completions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompletionRecord>> {
        let mut records: Vec<CompletionRecord> = self
            .completions
            .values()
            .filter(|r| r.completed_date >= start && r.completed_date <= end)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.completed_date.cmp(&b.completed_date));
        Ok(records)
    }

    async fn save_miss(&mut self, record: &MissRecord) -> Result<()> {
        self.misses
            .insert((record.goal_id, record.missed_date), record.clone());
        Ok(())
    }

    async fn remove_miss(&mut self, goal_id: GoalId, date: NaiveDate) -> Result<()> {
        self.misses.remove(&(goal_id, date));
        Ok(())
    }

    async fn list_misses(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MissRecord>> {
        let mut records: Vec<MissRecord> = self
            .misses
            .values()
            .filter(|r| r.missed_date >= start && r.missed_date <= end)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.missed_date.cmp(&b.missed_date));
        Ok(records)
    }

    async fn save_mood(&mut self, entry: &MoodEntry) -> Result<()> {
        self.moods.insert(entry.date, entry.clone());
        Ok(())
    }

    async fn load_mood(&self, date: NaiveDate) -> Result<Option<MoodEntry>> {
        Ok(self.moods.get(&date).cloned())
    }

    async fn list_moods(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
        let mut entries: Vec<MoodEntry> = self
            .moods
            .values()
            .filter(|m| m.date >= start && m.date <= end)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(title: &str) -> Goal {
        Goal {
            id: GoalId::new(),
            title: title.to_string(),
            description: String::new(),
            color: "#10B981".to_string(),
            frequency: vec![Weekday::Monday],
            start_date: date(2024, 1, 1),
            end_date: None,
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn goal_crud() {
        let mut storage = MemoryStorage::new();
        let g = goal("Read");
        storage.save_goal(&g).await.unwrap();
        assert_eq!(storage.load_goal(g.id).await.unwrap().unwrap().title, "Read");
        assert_eq!(storage.list_goals().await.unwrap().len(), 1);

        storage.delete_goal(g.id).await.unwrap();
        assert!(storage.load_goal(g.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_completion_conflicts() {
        let mut storage = MemoryStorage::new();
        let record = CompletionRecord::new(GoalId::new(), date(2024, 1, 8));
        storage.insert_completion(&record).await.unwrap();
        assert!(matches!(
            storage.insert_completion(&record).await,
            Err(StorageError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn list_completions_respects_closed_window() {
        let mut storage = MemoryStorage::new();
        let id = GoalId::new();
        for day in [1, 15, 31] {
            storage
                .insert_completion(&CompletionRecord::new(id, date(2024, 1, day)))
                .await
                .unwrap();
        }
        storage
            .insert_completion(&CompletionRecord::new(id, date(2024, 2, 1)))
            .await
            .unwrap();

        let january = storage
            .list_completions(date(2024, 1, 1), date(2024, 1, 31))
            .await
            .unwrap();
        assert_eq!(january.len(), 3);
    }

    #[tokio::test]
    async fn mood_upsert_replaces() {
        let mut storage = MemoryStorage::new();
        let day = date(2024, 1, 8);
        let first = MoodEntry::new(day, 4, chrono::Utc::now()).unwrap();
        let second = MoodEntry::new(day, 9, chrono::Utc::now()).unwrap();

        storage.save_mood(&first).await.unwrap();
        storage.save_mood(&second).await.unwrap();

        assert_eq!(storage.load_mood(day).await.unwrap().unwrap().score, 9);
        assert_eq!(storage.list_moods(day, day).await.unwrap().len(), 1);
    }
}

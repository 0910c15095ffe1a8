//! JSON file storage implementation.
//!
//! Stores each record as a JSON file under a data directory, one
//! subdirectory per record kind. The (goal, date) natural keys become file
//! names, so uniqueness is enforced by the filesystem.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cadence_core::{CompletionRecord, Goal, GoalId, MissRecord, MoodEntry};
use chrono::NaiveDate;
use tokio::fs;

use super::{Result, Storage, StorageError};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the per-kind
    /// subdirectories as needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("goals")).await?;
        fs::create_dir_all(root.join("completions")).await?;
        fs::create_dir_all(root.join("misses")).await?;
        fs::create_dir_all(root.join("moods")).await?;

        Ok(Self { root })
    }

    fn goal_path(&self, id: GoalId) -> PathBuf {
        self.root.join("goals").join(format!("{}.json", id))
    }

    fn completion_path(&self, goal_id: GoalId, date: NaiveDate) -> PathBuf {
        self.root
            .join("completions")
            .join(format!("{}_{}.json", goal_id, date))
    }

    fn miss_path(&self, goal_id: GoalId, date: NaiveDate) -> PathBuf {
        self.root
            .join("misses")
            .join(format!("{}_{}.json", goal_id, date))
    }

    fn mood_path(&self, date: NaiveDate) -> PathBuf {
        self.root.join("moods").join(format!("{}.json", date))
    }

    async fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json.as_bytes()).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn save_goal(&mut self, goal: &Goal) -> Result<()> {
        self.write_json(&self.goal_path(goal.id), goal).await
    }

    async fn load_goal(&self, id: GoalId) -> Result<Option<Goal>> {
        read_json(&self.goal_path(id)).await
    }

    async fn list_goals(&self) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = list_dir(&self.root.join("goals")).await?;
        goals.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(goals)
    }

    async fn delete_goal(&mut self, id: GoalId) -> Result<()> {
        remove_if_present(&self.goal_path(id)).await
    }

    async fn insert_completion(&mut self, record: &CompletionRecord) -> Result<()> {
        let path = self.completion_path(record.goal_id, record.completed_date);
        if fs::try_exists(&path).await? {
            return Err(StorageError::Conflict(format!(
                "completion already exists for goal {} on {}",
                record.goal_id, record.completed_date
            )));
        }
        self.write_json(&path, record).await
    }

    async fn remove_completion(&mut self, goal_id: GoalId, date: NaiveDate) -> Result<()> {
        remove_if_present(&self.completion_path(goal_id, date)).await
    }

    async fn list_completions(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompletionRecord>> {
        let all: Vec<CompletionRecord> = list_dir(&self.root.join("completions")).await?;
        let mut records: Vec<CompletionRecord> = all
            .into_iter()
            .filter(|r| r.completed_date >= start && r.completed_date <= end)
            .collect();
        records.sort_by(|a, b| a.completed_date.cmp(&b.completed_date));
        Ok(records)
    }

    async fn save_miss(&mut self, record: &MissRecord) -> Result<()> {
        let path = self.miss_path(record.goal_id, record.missed_date);
        self.write_json(&path, record).await
    }

    async fn remove_miss(&mut self, goal_id: GoalId, date: NaiveDate) -> Result<()> {
        remove_if_present(&self.miss_path(goal_id, date)).await
    }

    async fn list_misses(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MissRecord>> {
        let all: Vec<MissRecord> = list_dir(&self.root.join("misses")).await?;
        let mut records: Vec<MissRecord> = all
            .into_iter()
            .filter(|r| r.missed_date >= start && r.missed_date <= end)
            .collect();
        records.sort_by(|a, b| a.missed_date.cmp(&b.missed_date));
        Ok(records)
    }

    async fn save_mood(&mut self, entry: &MoodEntry) -> Result<()> {
        self.write_json(&self.mood_path(entry.date), entry).await
    }

    async fn load_mood(&self, date: NaiveDate) -> Result<Option<MoodEntry>> {
        read_json(&self.mood_path(date)).await
    }

    async fn list_moods(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
        let all: Vec<MoodEntry> = list_dir(&self.root.join("moods")).await?;
        let mut entries: Vec<MoodEntry> = all
            .into_iter()
            .filter(|m| m.date >= start && m.date <= end)
            .collect();
        entries.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(entries)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}

async fn remove_if_present(path: &Path) -> Result<()> {
    fs::remove_file(path).await.or_else(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Ok(())
        } else {
            Err(e)
        }
    })?;
    Ok(())
}

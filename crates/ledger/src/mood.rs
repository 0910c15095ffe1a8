//! Daily mood ledger.
//!
//! One mood entry per calendar date; submitting again for today replaces
//! the existing entry. "Today" comes from the injected engine clock.

use std::sync::Arc;

use cadence_core::{Clock, MoodEntry};
use cadence_storage::Storage;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::Result;

/// Mood entry service over an injected repository.
pub struct MoodLedger<S: Storage> {
    storage: Arc<RwLock<S>>,
    clock: Arc<dyn Clock>,
}

impl<S: Storage> MoodLedger<S> {
    /// Create a mood ledger.
    pub fn new(storage: Arc<RwLock<S>>, clock: Arc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Upsert today's mood entry.
    pub async fn set_todays_mood(&mut self, score: u8) -> Result<MoodEntry> {
        let entry = MoodEntry::new(self.clock.today(), score, self.clock.now())?;
        self.storage.write().await.save_mood(&entry).await?;
        debug!(date = %entry.date, score, "mood recorded");
        Ok(entry)
    }

    /// Today's mood entry, if one was recorded.
    pub async fn todays_mood(&self) -> Result<Option<MoodEntry>> {
        Ok(self.storage.read().await.load_mood(self.clock.today()).await?)
    }

    /// Mood entries in the closed interval `[start, end]`.
    pub async fn month_moods(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MoodEntry>> {
        Ok(self.storage.read().await.list_moods(start, end).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{FixedClock, ValidationError};
    use cadence_storage::MemoryStorage;
    use chrono::TimeZone;

    use crate::LedgerError;

    fn ledger() -> MoodLedger<MemoryStorage> {
        let instant = chrono::Utc.with_ymd_and_hms(2024, 1, 8, 12, 0, 0).unwrap();
        MoodLedger::new(
            Arc::new(RwLock::new(MemoryStorage::new())),
            Arc::new(FixedClock(instant)),
        )
    }

    #[tokio::test]
    async fn todays_mood_is_upserted_not_duplicated() {
        let mut moods = ledger();

        assert!(moods.todays_mood().await.unwrap().is_none());

        moods.set_todays_mood(4).await.unwrap();
        moods.set_todays_mood(8).await.unwrap();

        let today = moods.todays_mood().await.unwrap().unwrap();
        assert_eq!(today.score, 8);

        let window = moods
            .month_moods(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(window.len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected() {
        let mut moods = ledger();
        let err = moods.set_todays_mood(11).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::MoodOutOfRange(11))
        ));
        assert!(moods.todays_mood().await.unwrap().is_none());
    }
}

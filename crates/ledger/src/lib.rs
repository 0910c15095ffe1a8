//! Window-scoped ledgers over the storage abstraction.
//!
//! Service objects owning the completion/miss state machine, the daily mood
//! entry, and goal management. Each is constructed with an injected
//! repository; there is no ambient global state.

#![warn(missing_docs)]

mod error;
mod goals;
mod mood;
mod progress;

pub use error::LedgerError;
pub use goals::GoalDirectory;
pub use mood::MoodLedger;
pub use progress::ProgressLedger;

/// Result alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    //! Whole-engine scenario: goal creation through analytics.

    use std::sync::Arc;

    use cadence_analytics::{goal_rate, overall_rate};
    use cadence_core::{FixedClock, GoalInput, PairStatus, Weekday};
    use cadence_schedule::due_goals;
    use cadence_storage::MemoryStorage;
    use chrono::{NaiveDate, TimeZone};
    use tokio::sync::RwLock;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn month_of_tracking_flows_into_rates() {
        let clock = Arc::new(FixedClock(
            chrono::Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap(),
        ));
        let storage = Arc::new(RwLock::new(MemoryStorage::new()));
        let mut directory = GoalDirectory::new(storage.clone(), clock.clone());
        let mut ledger = ProgressLedger::new(storage.clone());
        let mut moods = MoodLedger::new(storage, clock);

        let goal = directory
            .create(GoalInput {
                title: "Practice piano".to_string(),
                description: String::new(),
                color: "#4F46E5".to_string(),
                frequency: vec![Weekday::Monday],
                start_date: date(2024, 1, 1),
                end_date: None,
                start_time: "18:00".to_string(),
                end_time: "18:30".to_string(),
            })
            .await
            .unwrap();

        let (start, end) = (date(2024, 1, 1), date(2024, 1, 31));
        ledger.load_window(start, end).await.unwrap();

        // 2024-01-08 is a Monday, so the goal is due.
        let goals = directory.list().await.unwrap();
        let due = due_goals(&goals, date(2024, 1, 8), None);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, goal.id);

        assert_eq!(ledger.status(goal.id, date(2024, 1, 8)), PairStatus::Pending);
        ledger
            .toggle_completion(goal.id, date(2024, 1, 8))
            .await
            .unwrap();
        assert_eq!(
            ledger.status(goal.id, date(2024, 1, 8)),
            PairStatus::Completed
        );

        // One completion over the five January Mondays.
        assert_eq!(goal_rate(&goal, ledger.completions(), start, end), 20.0);
        assert_eq!(overall_rate(&goals, ledger.completions(), start, end), 20.0);

        moods.set_todays_mood(7).await.unwrap();
        let entries = moods.month_moods(start, end).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, date(2024, 1, 8));
    }
}

//! Trailing-month completion rollups.

use cadence_core::{month_label, month_of, trailing_months, CompletionRecord, Goal};
use chrono::NaiveDate;
use serde::Serialize;

use crate::overall_rate;

/// Aggregate completion rate for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStat {
    /// Month label, e.g. "Jan 2024"
    pub label: String,

    /// Overall completion percentage for the month
    pub rate: f64,
}

/// Overall completion rate for each of the trailing `months_back + 1`
/// months ending at the month containing `today`, ascending.
///
/// `completions` should span the whole trailing window; records outside a
/// month's bounds simply do not count toward it.
pub fn monthly_stats(
    goals: &[Goal],
    completions: &[CompletionRecord],
    months_back: u32,
    today: NaiveDate,
) -> Vec<MonthlyStat> {
    trailing_months(today, months_back)
        .into_iter()
        .map(|first_day| {
            let (start, end) = month_of(first_day);
            MonthlyStat {
                label: month_label(first_day),
                rate: overall_rate(goals, completions, start, end),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{GoalId, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal() -> Goal {
        Goal {
            id: GoalId::new(),
            title: "Run".to_string(),
            description: String::new(),
            color: "#8B5CF6".to_string(),
            frequency: vec![Weekday::Monday],
            start_date: date(2023, 11, 1),
            end_date: None,
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn returns_trailing_months_ascending() {
        let stats = monthly_stats(&[], &[], 3, date(2024, 2, 15));
        let labels: Vec<&str> = stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]);
        assert!(stats.iter().all(|s| s.rate == 0.0));
    }

    #[test]
    fn each_month_is_rated_from_its_own_records() {
        let g = goal();
        // All five January Mondays completed, nothing in December.
        let completions: Vec<_> = [1, 8, 15, 22, 29]
            .into_iter()
            .map(|d| CompletionRecord::new(g.id, date(2024, 1, d)))
            .collect();
        let goals = vec![g];

        let stats = monthly_stats(&goals, &completions, 1, date(2024, 1, 20));
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].label, "Dec 2023");
        assert_eq!(stats[0].rate, 0.0);
        assert_eq!(stats[1].label, "Jan 2024");
        assert_eq!(stats[1].rate, 100.0);
    }
}

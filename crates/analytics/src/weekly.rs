//! Weekday-bucketed mood and completion statistics.

use cadence_core::{days_in, month_bounds, CompletionRecord, Goal, MoodEntry, Weekday};
use cadence_schedule::due_goals;
use serde::Serialize;

use crate::round1;

/// Per-weekday statistics for one month, indexed Monday = 0 .. Sunday = 6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyStats {
    /// Mean mood score per weekday, one decimal. `None` when a weekday has
    /// no entries, which is distinct from a low score and never collapsed
    /// to 0.
    pub mood_averages: [Option<f64>; 7],

    /// Completion percentage per weekday, one decimal. 0 when nothing was
    /// scheduled on that weekday.
    pub completion_rates: [f64; 7],
}

/// Bucket mood scores and completion rates by weekday over one calendar
/// month.
///
/// Scheduling uses the full due rule (active range plus frequency); a
/// completion only counts on days its goal was actually due.
pub fn weekly_stats(
    goals: &[Goal],
    completions: &[CompletionRecord],
    moods: &[MoodEntry],
    year: i32,
    month: u32,
) -> WeeklyStats {
    let (start, end) = month_bounds(year, month);

    let mut mood_buckets: [Vec<u8>; 7] = Default::default();
    for entry in moods {
        if entry.date >= start && entry.date <= end {
            mood_buckets[Weekday::of(entry.date).index()].push(entry.score);
        }
    }

    let mut scheduled = [0usize; 7];
    let mut completed = [0usize; 7];
    for date in days_in(start, end) {
        let idx = Weekday::of(date).index();
        let due = due_goals(goals, date, None);
        scheduled[idx] += due.len();
        completed[idx] += completions
            .iter()
            .filter(|c| c.completed_date == date && due.iter().any(|g| g.id == c.goal_id))
            .count();
    }

    let mood_averages = std::array::from_fn(|i| {
        let bucket = &mood_buckets[i];
        if bucket.is_empty() {
            None
        } else {
            let sum: u32 = bucket.iter().map(|s| u32::from(*s)).sum();
            Some(round1(f64::from(sum) / bucket.len() as f64))
        }
    });

    let completion_rates = std::array::from_fn(|i| {
        if scheduled[i] > 0 {
            round1(100.0 * completed[i] as f64 / scheduled[i] as f64)
        } else {
            0.0
        }
    });

    WeeklyStats {
        mood_averages,
        completion_rates,
    }
}

//! Per-goal and aggregate completion rates.

use cadence_core::{CompletionRecord, Goal};
use cadence_schedule::scheduled_dates;
use chrono::NaiveDate;

/// Completion percentage for one goal over `[start, end]`, rounded to a
/// whole percent.
///
/// Scheduled count is the number of due dates in the window; completed
/// count is the goal's completion records falling in the window. Zero
/// scheduled dates yields 0.
pub fn goal_rate(
    goal: &Goal,
    completions: &[CompletionRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> f64 {
    let scheduled = scheduled_dates(goal, start, end).count();
    if scheduled == 0 {
        return 0.0;
    }

    let completed = completions
        .iter()
        .filter(|c| {
            c.goal_id == goal.id && c.completed_date >= start && c.completed_date <= end
        })
        .count();

    (100.0 * completed as f64 / scheduled as f64).round()
}

/// Arithmetic mean of per-goal rates over `[start, end]`, rounded to a
/// whole percent. Zero when there are no goals.
pub fn overall_rate(
    goals: &[Goal],
    completions: &[CompletionRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> f64 {
    if goals.is_empty() {
        return 0.0;
    }

    let total: f64 = goals
        .iter()
        .map(|goal| goal_rate(goal, completions, start, end))
        .sum();
    (total / goals.len() as f64).round()
}

//! Recurrence resolution.
//!
//! Pure functions deciding which goals apply to a calendar date. A goal is
//! due on a date when the date falls inside its active range and the date's
//! weekday is in the goal's frequency. No side effects, safe to call
//! concurrently; malformed goal data is a validation concern upstream.

#![warn(missing_docs)]

use cadence_core::{days_in, Goal, Weekday};
use chrono::NaiveDate;

/// Whether `goal` applies to `date`.
pub fn is_due(goal: &Goal, date: NaiveDate) -> bool {
    if date < goal.start_date {
        return false;
    }
    if let Some(end) = goal.end_date {
        if date > end {
            return false;
        }
    }
    goal.frequency.contains(&Weekday::of(date))
}

/// Goals due on `date`, optionally narrowed by a case-insensitive title
/// filter. A stable filter: result order preserves input order.
pub fn due_goals<'a>(goals: &'a [Goal], date: NaiveDate, filter: Option<&str>) -> Vec<&'a Goal> {
    let needle = filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    goals
        .iter()
        .filter(|goal| is_due(goal, date))
        .filter(|goal| match &needle {
            Some(needle) => goal.title.to_lowercase().contains(needle),
            None => true,
        })
        .collect()
}

/// Every date in the closed window `[start, end]` on which `goal` is due.
pub fn scheduled_dates(
    goal: &Goal,
    start: NaiveDate,
    end: NaiveDate,
) -> impl Iterator<Item = NaiveDate> + '_ {
    days_in(start, end).filter(move |date| is_due(goal, *date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::GoalId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(title: &str, frequency: Vec<Weekday>, end_date: Option<NaiveDate>) -> Goal {
        Goal {
            id: GoalId::new(),
            title: title.to_string(),
            description: String::new(),
            color: "#4F46E5".to_string(),
            frequency,
            start_date: date(2024, 1, 1),
            end_date,
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn due_on_matching_weekdays_after_start() {
        let g = goal("Run", vec![Weekday::Monday, Weekday::Wednesday], None);

        // 2024-01-01 is a Monday, 2024-01-03 a Wednesday.
        assert!(is_due(&g, date(2024, 1, 1)));
        assert!(is_due(&g, date(2024, 1, 3)));
        assert!(is_due(&g, date(2024, 1, 8)));
        assert!(is_due(&g, date(2025, 6, 2))); // a Monday, open-ended

        // Tuesday does not match.
        assert!(!is_due(&g, date(2024, 1, 2)));
        // A Wednesday before the start date.
        assert!(!is_due(&g, date(2023, 12, 27)));
    }

    #[test]
    fn never_due_past_end_date() {
        let g = goal("Run", vec![Weekday::Thursday], Some(date(2024, 1, 31)));

        // 2024-02-01 is a Thursday but the goal ended the day before.
        assert!(!is_due(&g, date(2024, 2, 1)));
        assert!(is_due(&g, date(2024, 1, 25)));
    }

    #[test]
    fn due_on_start_and_end_boundaries() {
        // Both boundary dates are Mondays.
        let g = goal("Run", vec![Weekday::Monday], Some(date(2024, 1, 29)));
        assert!(is_due(&g, date(2024, 1, 1)));
        assert!(is_due(&g, date(2024, 1, 29)));
    }

    #[test]
    fn due_goals_preserves_input_order() {
        let goals = vec![
            goal("Evening walk", vec![Weekday::Monday], None),
            goal("Read a chapter", vec![Weekday::Tuesday], None),
            goal("Morning walk", vec![Weekday::Monday], None),
        ];

        let due = due_goals(&goals, date(2024, 1, 8), None);
        let titles: Vec<&str> = due.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Evening walk", "Morning walk"]);
    }

    #[test]
    fn title_filter_is_case_insensitive_and_stable() {
        let goals = vec![
            goal("Evening Walk", vec![Weekday::Monday], None),
            goal("Stretch", vec![Weekday::Monday], None),
            goal("morning walk", vec![Weekday::Monday], None),
        ];

        let due = due_goals(&goals, date(2024, 1, 8), Some("WALK"));
        let titles: Vec<&str> = due.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Evening Walk", "morning walk"]);

        // Empty filter keeps everything.
        assert_eq!(due_goals(&goals, date(2024, 1, 8), Some("  ")).len(), 3);
    }

    #[test]
    fn scheduled_dates_enumerates_due_days() {
        let g = goal("Run", vec![Weekday::Monday], None);
        let mondays: Vec<_> = scheduled_dates(&g, date(2024, 1, 1), date(2024, 1, 31)).collect();
        assert_eq!(
            mondays,
            vec![date(2024, 1, 1), date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22), date(2024, 1, 29)]
        );
    }
}

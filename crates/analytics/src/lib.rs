//! Completion-rate and rollup analytics.
//!
//! Pure functions of the currently loaded record window plus the goal
//! list. Consumers (dashboards, charts) call these on demand; nothing here
//! touches storage or holds state.

#![warn(missing_docs)]

mod rate;
mod weekly;
mod monthly;

pub use rate::{goal_rate, overall_rate};
pub use weekly::{weekly_stats, WeeklyStats};
pub use monthly::{monthly_stats, MonthlyStat};

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

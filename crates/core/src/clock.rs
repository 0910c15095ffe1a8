//! Clock abstraction.
//!
//! "Today" is read through one injected clock so due-date resolution and
//! mood bucketing never disagree near midnight. The default clock is UTC;
//! callers wanting local-zone semantics implement `Clock` over their offset.

use chrono::NaiveDate;

use crate::Time;

/// Source of the current time for the engine.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Time;

    /// Current calendar date in the engine's reference zone.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        chrono::Utc::now()
    }
}

/// Clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Time);

impl Clock for FixedClock {
    fn now(&self) -> Time {
        self.0
    }
}

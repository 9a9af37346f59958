//! Calendar months, active windows and the shared temporal capability
//!
//! Every financial object in a household is only "live" for part of the
//! simulated horizon. An [`ActiveWindow`] is an inclusive `[start, end]` range
//! of months, and the [`Temporal`] trait gives accounts and flows a common way
//! to be advanced through time and asked whether they currently participate.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A simulated calendar month, ordered lexicographically on `(year, month)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub const MIN: YearMonth = YearMonth {
        year: i32::MIN,
        month: 1,
    };
    pub const MAX: YearMonth = YearMonth {
        year: i32::MAX,
        month: 12,
    };

    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// True in January, when annual escalations are applied.
    pub fn is_new_year(&self) -> bool {
        self.month == 1
    }

    /// True in the first month of each calendar quarter.
    pub fn is_quarter_start(&self) -> bool {
        self.month % 3 == 1
    }
}

impl Default for YearMonth {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Inclusive range of months in which an entity participates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWindow {
    pub start: YearMonth,
    pub end: YearMonth,
}

impl ActiveWindow {
    pub const ALWAYS: ActiveWindow = ActiveWindow {
        start: YearMonth::MIN,
        end: YearMonth::MAX,
    };

    pub fn new(start: YearMonth, end: YearMonth) -> Self {
        Self { start, end }
    }

    /// A start after the end yields a window that is never active.
    pub fn contains(&self, at: YearMonth) -> bool {
        self.start <= at && at <= self.end
    }
}

impl Default for ActiveWindow {
    fn default() -> Self {
        Self::ALWAYS
    }
}

/// Current simulated month and shared market factor seen by an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    pub now: YearMonth,
    pub market: f64,
}

/// Behaviour shared by every account and flow in a household.
///
/// The simulation driver advances entities with strictly increasing months;
/// implementations may rely on that ordering for once-a-year escalations.
pub trait Temporal {
    fn window(&self) -> &ActiveWindow;

    fn window_mut(&mut self) -> &mut ActiveWindow;

    fn clock(&self) -> &Clock;

    /// Move to `now` under the given monthly market factor and run the
    /// entity's periodic update (growth, escalation, interest accrual).
    fn advance<R: Rng + ?Sized>(&mut self, now: YearMonth, market: f64, rng: &mut R);

    fn now(&self) -> YearMonth {
        self.clock().now
    }

    fn is_active(&self) -> bool {
        self.is_active_at(self.now())
    }

    fn is_active_at(&self, at: YearMonth) -> bool {
        self.window().contains(at)
    }

    fn set_active_window(&mut self, start: YearMonth, end: YearMonth) {
        *self.window_mut() = ActiveWindow::new(start, end);
    }

    /// Participate from the given month onwards.
    #[must_use]
    fn active_from(mut self, year: i32, month: u32) -> Self
    where
        Self: Sized,
    {
        self.window_mut().start = YearMonth::new(year, month);
        self
    }

    /// Participate up to and including the given month.
    #[must_use]
    fn active_until(mut self, year: i32, month: u32) -> Self
    where
        Self: Sized,
    {
        self.window_mut().end = YearMonth::new(year, month);
        self
    }

    /// Participate in exactly one month.
    #[must_use]
    fn one_time(self, year: i32, month: u32) -> Self
    where
        Self: Sized,
    {
        self.active_from(year, month).active_until(year, month)
    }
}

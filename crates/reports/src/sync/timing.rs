//! Report-day clock
//!
//! "Yesterday" in the report timezone bounds every date window. The clock is
//! a trait so tests can fix the date and runs can pin it.

use chrono::{Days, FixedOffset, NaiveDate, Offset, Utc};
use std::sync::Arc;

/// Source of the current calendar date in the report timezone
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Shared clock handle
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock at a fixed UTC offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

/// Clock frozen on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl FixedClock {
    /// Freeze another clock's current date
    pub fn capture(clock: &dyn Clock) -> Self {
        Self(clock.today())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// The last complete report day
pub fn yesterday(clock: &dyn Clock) -> NaiveDate {
    let today = clock.today();
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

/// Pin `clock` for the duration of a run when requested
pub fn run_clock(clock: SharedClock, pin: bool) -> SharedClock {
    if pin {
        Arc::new(FixedClock::capture(clock.as_ref()))
    } else {
        clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock that moves forward one day on every read
    struct AdvancingClock {
        start: NaiveDate,
        reads: AtomicU64,
    }

    impl Clock for AdvancingClock {
        fn today(&self) -> NaiveDate {
            let n = self.reads.fetch_add(1, Ordering::SeqCst);
            self.start + Days::new(n)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_yesterday() {
        assert_eq!(yesterday(&FixedClock(date(2024, 3, 1))), date(2024, 2, 29));
    }

    #[test]
    fn test_pinned_clock_does_not_move() {
        let clock: SharedClock = Arc::new(AdvancingClock {
            start: date(2024, 1, 1),
            reads: AtomicU64::new(0),
        });
        let pinned = run_clock(clock.clone(), true);
        assert_eq!(pinned.today(), pinned.today());

        let live = run_clock(clock, false);
        assert_ne!(live.today(), live.today());
    }

    #[test]
    fn test_system_clock_offsets() {
        let east = SystemClock::new(FixedOffset::east_opt(14 * 3600).unwrap()).today();
        let west = SystemClock::new(FixedOffset::west_opt(12 * 3600).unwrap()).today();
        let utc = SystemClock::utc().today();
        assert!(east >= utc && utc >= west);
    }
}

//! Date-window pagination over the report endpoint
//!
//! The endpoint refuses open-ended ranges, so the historical range is walked
//! as a sequence of bounded windows, each paged through to its last page.

use chrono::{Days, NaiveDate};
use log::{debug, info};

use super::timing::{SharedClock, yesterday};
use crate::api::wire::PageInfo;
use crate::config::TapConfig;
use crate::models::{Cursor, DateWindow};

/// Trailing re-extraction policy applied at sync start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackPolicy {
    pub days: u32,
    /// Never start before this date
    pub floor_date: NaiveDate,
}

impl LookbackPolicy {
    pub fn from_config(config: &TapConfig) -> Self {
        Self {
            days: config.lookback,
            floor_date: config.start_date,
        }
    }

    /// Effective start date for a run resuming from `bookmark`
    ///
    /// With a lookback configured, the trailing `days` are re-extracted even
    /// if already synced, but never earlier than the floor date.
    pub fn apply(&self, bookmark: NaiveDate, today: NaiveDate) -> NaiveDate {
        if self.days == 0 {
            return bookmark;
        }
        let lookback_start = today
            .checked_sub_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MIN);
        bookmark.min(lookback_start).max(self.floor_date)
    }
}

/// Owns the cursor for one report stream's sync
pub struct ReportWindowPaginator {
    clock: SharedClock,
    max_span_days: u32,
    current: Option<Cursor>,
    windows_completed: usize,
}

impl ReportWindowPaginator {
    /// Start paginating at `start`
    ///
    /// Already done when `start` is after yesterday.
    pub fn new(start: NaiveDate, max_span_days: u32, clock: SharedClock) -> Self {
        let upper = yesterday(clock.as_ref());
        let current = DateWindow::capped(start, max_span_days, upper).map(Cursor::first_page);
        match &current {
            Some(cursor) => info!("Preparing request for {}", cursor.window),
            None => info!("Nothing to sync: start {} is after {}", start, upper),
        }

        Self {
            clock,
            max_span_days,
            current,
            windows_completed: 0,
        }
    }

    #[cfg(test)]
    pub fn has_more(&self) -> bool {
        self.current.is_some()
    }

    /// Cursor of the next request, None once done
    pub fn current_value(&self) -> Option<Cursor> {
        self.current
    }

    /// Number of windows paged through to their last page
    pub fn windows_completed(&self) -> usize {
        self.windows_completed
    }

    /// Move past the request just completed, given its page info
    ///
    /// Within a window the next page is the server-reported page plus one.
    /// Once the last page is reached the next window starts the day after the
    /// current one ends; if that is after yesterday the paginator is done.
    pub fn advance(&mut self, page_info: PageInfo) {
        let Some(current) = self.current else {
            return;
        };

        if page_info.has_next() {
            let next = current.with_page(page_info.page + 1);
            debug!("Advancing to {}", next);
            self.current = Some(next);
            return;
        }

        self.windows_completed += 1;
        let upper = yesterday(self.clock.as_ref());
        let next_start = current.window.end.checked_add_days(Days::new(1));
        let next_window = next_start
            .filter(|start| *start <= upper)
            .and_then(|start| DateWindow::capped(start, self.max_span_days, upper));

        // A repeated cursor is reported by the caller's loop guard
        match next_window {
            None => {
                info!("Finished at {}; no data after {}", current.window, upper);
                self.current = None;
            }
            Some(window) => {
                info!("Preparing request for {}", window);
                self.current = Some(Cursor::first_page(window));
            }
        }
    }
}

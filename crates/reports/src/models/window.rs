//! Date windows and request cursors for report pagination

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format for report dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A closed calendar date range `[start, end]` addressed by one report request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Create a window, returning None if `end` precedes `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Build the window beginning at `start`, spanning at most `max_span_days`
    /// days past it and never extending beyond `upper`.
    ///
    /// Returns None when `start` is already past `upper`.
    pub fn capped(start: NaiveDate, max_span_days: u32, upper: NaiveDate) -> Option<Self> {
        let end = start
            .checked_add_days(Days::new(u64::from(max_span_days)))
            .unwrap_or(NaiveDate::MAX)
            .min(upper);
        Self::new(start, end)
    }

    /// Number of calendar days covered (inclusive)
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start_str(), self.end_str())
    }
}

/// Addressable position of exactly one outstanding report request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub window: DateWindow,
    /// 1-based page number
    pub page: u32,
}

impl Cursor {
    /// First page of a window
    pub fn first_page(window: DateWindow) -> Self {
        Self { window, page: 1 }
    }

    /// Same window, given page
    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (page {})", self.window, self.page)
    }
}

//! Replication bookmarks for incremental report sync

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::window::DATE_FORMAT;

/// High-water mark of a stream's replication key
///
/// Persisted by a [`crate::storage::BookmarkStore`]; one per stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Stream name
    pub stream: String,
    /// Name of the incrementing dimension (e.g. `stat_time_day`)
    pub replication_key: String,
    /// Last fully-synced value, as reported by the API
    /// (e.g. `2024-01-15 00:00:00`)
    pub value: String,
    /// When this bookmark was written
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    pub fn new(
        stream: impl Into<String>,
        replication_key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            stream: stream.into(),
            replication_key: replication_key.into(),
            value: value.into(),
            updated_at: Utc::now(),
        }
    }

    /// Replace the value, refreshing the timestamp
    pub fn updated(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.updated_at = Utc::now();
        self
    }

    /// Calendar date of the bookmarked value
    pub fn as_date(&self) -> Option<NaiveDate> {
        parse_report_date(&self.value)
    }
}

/// Parse the date part of a report timestamp
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339 timestamps.
pub fn parse_report_date(value: &str) -> Option<NaiveDate> {
    let head = value.trim().get(..10)?;
    NaiveDate::parse_from_str(head, DATE_FORMAT).ok()
}

//! Stream sync driver
//!
//! Runs one catalog stream to completion, hands every row to a sink and
//! checkpoints the replication bookmark after each completed window.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use serde_json::{Map, Value};

use super::entities::PagedSync;
use super::orchestrator::SyncOrchestrator;
use super::paginator::LookbackPolicy;
use super::timing::{SharedClock, run_clock};
use crate::api::ReportApi;
use crate::config::TapConfig;
use crate::models::{Bookmark, Record, StreamDescriptor};
use crate::storage::{BookmarkStore, get_starting_value};

/// Statistics from a stream sync
#[derive(Debug, Default, Clone)]
pub struct SyncStats {
    /// Number of rows handed to the sink
    pub records: usize,
    /// Number of API requests issued
    pub requests: usize,
    /// Number of date windows fully synced
    pub windows: usize,
    /// Last bookmark value written, if any
    pub bookmark: Option<String>,
    /// Duration of the sync operation
    pub duration_ms: u64,
}

/// First date a windowed sync should request
///
/// The bookmark (or configured start date), rewound by the lookback policy.
pub fn resolve_start_date(
    store: &dyn BookmarkStore,
    descriptor: &StreamDescriptor,
    config: &TapConfig,
    today: NaiveDate,
) -> Result<NaiveDate> {
    let bookmark = get_starting_value(store, descriptor, config)?;
    Ok(LookbackPolicy::from_config(config).apply(bookmark, today))
}

/// Sync one stream, passing each flattened row to `sink`
///
/// Errors abort the stream; rows of windows completed before the error have
/// already been bookmarked.
pub fn sync_stream<A, F>(
    api: A,
    store: &dyn BookmarkStore,
    descriptor: &StreamDescriptor,
    config: &TapConfig,
    clock: SharedClock,
    mut sink: F,
) -> Result<SyncStats>
where
    A: ReportApi,
    F: FnMut(Map<String, Value>) -> Result<()>,
{
    let start = std::time::Instant::now();
    let mut stats = SyncStats::default();

    if descriptor.is_incremental() {
        let clock = run_clock(clock, config.pin_yesterday);
        let start_date = resolve_start_date(store, descriptor, config, clock.today())?;
        let mut orchestrator = SyncOrchestrator::new(api, descriptor, config, start_date, clock)?;
        let mut tracker = BookmarkTracker::new(store, descriptor)?;

        while let Some(item) = orchestrator.next() {
            // Every row of a completed window has been delivered before the
            // next window is requested, including when that request fails.
            if orchestrator.windows_completed() > stats.windows {
                stats.windows = orchestrator.windows_completed();
                tracker.checkpoint()?;
            }

            let record = item.with_context(|| format!("Sync failed for stream {}", descriptor.name))?;
            tracker.observe(&record);
            sink(record.flatten())?;
            stats.records += 1;
        }

        stats.windows = orchestrator.windows_completed();
        stats.requests = orchestrator.requests();
        tracker.checkpoint()?;
        stats.bookmark = tracker.saved;
    } else {
        let mut paged = PagedSync::new(api, descriptor, config)?;
        for item in &mut paged {
            let row = item.with_context(|| format!("Sync failed for stream {}", descriptor.name))?;
            sink(row)?;
            stats.records += 1;
        }
        stats.requests = paged.requests();
    }

    stats.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Synced {} record(s) for {} in {} request(s), {}ms",
        stats.records, descriptor.name, stats.requests, stats.duration_ms
    );
    Ok(stats)
}

/// Tracks the highest replication value seen and persists it on checkpoint
struct BookmarkTracker<'a> {
    store: &'a dyn BookmarkStore,
    stream: &'a str,
    key: &'a str,
    existing: Option<Bookmark>,
    seen: Option<String>,
    saved: Option<String>,
}

impl<'a> BookmarkTracker<'a> {
    fn new(store: &'a dyn BookmarkStore, descriptor: &'a StreamDescriptor) -> Result<Self> {
        let existing = store.get_bookmark(&descriptor.name)?;
        Ok(Self {
            store,
            stream: &descriptor.name,
            key: descriptor.replication_key.as_deref().unwrap_or_default(),
            saved: existing.as_ref().map(|b| b.value.clone()),
            existing,
            seen: None,
        })
    }

    fn observe(&mut self, record: &Record) {
        let Some(value) = record.get(self.key).and_then(Value::as_str) else {
            return;
        };
        // Report timestamps are zero-padded, so string order is date order
        if self.seen.as_deref().is_none_or(|seen| value > seen) {
            self.seen = Some(value.to_string());
        }
    }

    /// Persist the highest value seen, never moving the bookmark backwards
    fn checkpoint(&mut self) -> Result<()> {
        let Some(value) = self.seen.as_deref() else {
            return Ok(());
        };
        if self.saved.as_deref().is_some_and(|saved| saved >= value) {
            return Ok(());
        }

        let bookmark = match self.existing.take() {
            Some(existing) => existing.updated(value),
            None => Bookmark::new(self.stream, self.key, value),
        };
        info!("Bookmark {} = {}", self.stream, value);
        self.store.save_bookmark(bookmark.clone())?;
        self.saved = Some(bookmark.value.clone());
        self.existing = Some(bookmark);
        Ok(())
    }
}

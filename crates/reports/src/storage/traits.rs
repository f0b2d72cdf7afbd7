//! Storage trait definitions

use anyhow::Result;
use chrono::NaiveDate;

use crate::config::TapConfig;
use crate::models::{Bookmark, StreamDescriptor};

/// Trait for bookmark persistence
///
/// Implementations own the persistence format; the sync engine only reads a
/// starting value and hands back the new high-water mark.
pub trait BookmarkStore: Send + Sync {
    /// Get the bookmark for a stream
    fn get_bookmark(&self, stream: &str) -> Result<Option<Bookmark>>;

    /// Save a bookmark (upsert by stream name)
    fn save_bookmark(&self, bookmark: Bookmark) -> Result<()>;

    /// Delete the bookmark for a stream
    fn delete_bookmark(&self, stream: &str) -> Result<()>;

    /// List all bookmarks, ordered by stream name
    fn list_bookmarks(&self) -> Result<Vec<Bookmark>>;
}

/// Date a stream's sync should resume from, before lookback is applied
///
/// The bookmarked date when one exists and parses, otherwise the configured
/// start date. Non-incremental streams always start from the configured date.
pub fn get_starting_value(
    store: &dyn BookmarkStore,
    descriptor: &StreamDescriptor,
    config: &TapConfig,
) -> Result<NaiveDate> {
    if !descriptor.is_incremental() {
        return Ok(config.start_date);
    }

    let bookmarked = store
        .get_bookmark(&descriptor.name)?
        .and_then(|bookmark| bookmark.as_date());

    Ok(bookmarked.unwrap_or(config.start_date))
}

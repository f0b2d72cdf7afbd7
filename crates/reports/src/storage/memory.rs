//! In-memory bookmark storage
//!
//! Used for testing and for one-off runs that don't persist state.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::RwLock;

use super::BookmarkStore;
use crate::models::Bookmark;

/// In-memory implementation of BookmarkStore
///
/// Uses a HashMap protected by an RwLock for thread-safe access.
pub struct InMemoryBookmarkStore {
    bookmarks: RwLock<HashMap<String, Bookmark>>,
}

impl InMemoryBookmarkStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self {
            bookmarks: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-seeded with bookmarks
    pub fn with_bookmarks(bookmarks: impl IntoIterator<Item = Bookmark>) -> Self {
        let map = bookmarks
            .into_iter()
            .map(|b| (b.stream.clone(), b))
            .collect();
        Self {
            bookmarks: RwLock::new(map),
        }
    }
}

impl Default for InMemoryBookmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkStore for InMemoryBookmarkStore {
    fn get_bookmark(&self, stream: &str) -> Result<Option<Bookmark>> {
        let bookmarks = self.bookmarks.read().unwrap();
        Ok(bookmarks.get(stream).cloned())
    }

    fn save_bookmark(&self, bookmark: Bookmark) -> Result<()> {
        let mut bookmarks = self.bookmarks.write().unwrap();
        bookmarks.insert(bookmark.stream.clone(), bookmark);
        Ok(())
    }

    fn delete_bookmark(&self, stream: &str) -> Result<()> {
        let mut bookmarks = self.bookmarks.write().unwrap();
        bookmarks.remove(stream);
        Ok(())
    }

    fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let bookmarks = self.bookmarks.read().unwrap();
        let mut list: Vec<Bookmark> = bookmarks.values().cloned().collect();
        list.sort_by(|a, b| a.stream.cmp(&b.stream));
        Ok(list)
    }
}

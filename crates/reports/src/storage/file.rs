//! JSON file bookmark storage

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::BookmarkStore;
use crate::models::Bookmark;

/// On-disk state document
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateDocument {
    #[serde(default)]
    bookmarks: BTreeMap<String, Bookmark>,
}

/// Bookmark store persisted as a single JSON state file
///
/// The whole document is rewritten on every save.
pub struct FileBookmarkStore {
    path: PathBuf,
    state: RwLock<StateDocument>,
}

impl FileBookmarkStore {
    /// Open the state file at `path`, starting empty if it doesn't exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            config::load_json_file(&path)?
        } else {
            StateDocument::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &StateDocument) -> Result<()> {
        config::save_json_file(&self.path, state)
    }
}

impl BookmarkStore for FileBookmarkStore {
    fn get_bookmark(&self, stream: &str) -> Result<Option<Bookmark>> {
        let state = self.state.read().unwrap();
        Ok(state.bookmarks.get(stream).cloned())
    }

    fn save_bookmark(&self, bookmark: Bookmark) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.bookmarks.insert(bookmark.stream.clone(), bookmark);
        self.persist(&state)
    }

    fn delete_bookmark(&self, stream: &str) -> Result<()> {
        let mut state = self.state.write().unwrap();
        if state.bookmarks.remove(stream).is_some() {
            self.persist(&state)?;
        }
        Ok(())
    }

    fn list_bookmarks(&self) -> Result<Vec<Bookmark>> {
        let state = self.state.read().unwrap();
        Ok(state.bookmarks.values().cloned().collect())
    }
}

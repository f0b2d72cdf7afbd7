//! Bookmark storage traits and implementations
//!
//! The trait-based design allows swapping between in-memory and file-backed
//! bookmark stores.

mod file;
mod memory;
mod traits;

pub use file::FileBookmarkStore;
pub use memory::InMemoryBookmarkStore;
pub use traits::{BookmarkStore, get_starting_value};

//! Reports crate - incremental extraction of advertising reports
//!
//! This crate provides:
//! - Domain models (DateWindow, Cursor, Record, Bookmark, StreamDescriptor)
//! - Reporting API client with retry and response validation
//! - Declarative stream catalog
//! - Bookmark storage trait abstractions
//! - Lazy, pull-based sync engine for windowed, chunked and paged streams

pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod storage;
pub mod sync;

pub use crate::config::TapConfig;
pub use api::{Endpoint, ReportApi, ReportClient, TransportError, UpstreamReportError};
pub use models::{
    Bookmark, Cursor, DateWindow, DimensionKey, Record, ReportSpec, StreamDescriptor, StreamKind,
};
pub use storage::{BookmarkStore, FileBookmarkStore, InMemoryBookmarkStore, get_starting_value};
pub use sync::{
    ChunkMerger, Clock, FixedClock, LookbackPolicy, PagedSync, PaginationLoopError,
    ReportWindowPaginator, SharedClock, SyncOrchestrator, SyncStats, SystemClock,
    resolve_start_date, sync_stream,
};

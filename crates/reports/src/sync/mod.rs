//! Sync engine for report and entity streams
//!
//! Report streams walk bounded date windows page by page; entity and lifetime
//! streams are paged only. Both are lazy iterators driven by [`sync_stream`].

mod chunker;
mod entities;
pub mod loop_guard;
mod merger;
mod orchestrator;
mod paginator;
mod stream;
pub mod timing;

pub use chunker::chunk_metrics;
pub use entities::PagedSync;
pub use loop_guard::PaginationLoopError;
pub use merger::ChunkMerger;
pub use orchestrator::SyncOrchestrator;
pub use paginator::{LookbackPolicy, ReportWindowPaginator};
pub use stream::{SyncStats, resolve_start_date, sync_stream};
pub use timing::{Clock, FixedClock, SharedClock, SystemClock, run_clock, yesterday};

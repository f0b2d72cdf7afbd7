//! Domain models for report sync

mod bookmark;
mod record;
mod stream;
mod window;

pub use bookmark::{Bookmark, parse_report_date};
pub use record::{DimensionKey, KeyValue, Record};
pub use stream::{DataLevel, ReportSpec, ReportType, StreamDescriptor, StreamKind};
pub use window::{Cursor, DATE_FORMAT, DateWindow};

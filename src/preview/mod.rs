//! Fallback file preview
//!
//! This module loads the lightweight summary shown for items without a rich
//! preview:
//! - Icon, fetched on the UI-owning context
//! - Size and content type, fetched concurrently with the icon
//! - Name and modification date, known up front
//!
//! Icon extraction, file-system access and the clipboard are external
//! capabilities described by the traits in `capabilities`.

mod capabilities;
mod drive;
mod error;
mod fetch;
mod format;
mod local;
mod safe;
mod shared;
mod types;
mod ui_context;
mod unsupported;

pub use capabilities::{ClipboardService, FileSystemItem, IconRetrieval};
pub use drive::DriveSummary;
pub use error::{PreviewError, Result};
pub use format::{bytes_to_readable, format_modified};
pub use local::{LocalFile, SystemClipboard, content_type_for};
pub use safe::run_safe;
pub use types::{
    FetchOutcome, IconHandle, LoadOutcome, PreviewFields, PreviewSize, PreviewState, StorageHandle,
};
pub use ui_context::UiContext;
pub use unsupported::UnsupportedFilePreviewer;

//! Preview error types

use thiserror::Error;

/// Errors that can occur while loading a preview
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Operation was aborted cooperatively through its cancellation token
    #[error("Preview loading was cancelled")]
    Cancelled,

    /// An external capability faulted or returned unusable data
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// Both concurrent fetches failed or were cancelled
    #[error("Both icon and metadata fetches failed")]
    AggregateFailed,

    /// The clipboard rejected the storage handle
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// A preview field or state write was attempted off the UI context
    #[error("Preview writes must run on the UI context")]
    OffUiContext,

    /// The write belongs to a load that a newer load has replaced
    #[error("Load was superseded by a newer load")]
    Superseded,

    /// The UI-owning context is no longer running
    #[error("UI context is no longer running")]
    UiContextClosed,

    /// IO error while querying the file system
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PreviewError {
    /// Whether this error represents cooperative cancellation rather than a fault
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type for preview operations
pub type Result<T> = std::result::Result<T, PreviewError>;

//! Peek preview - loading logic for the fallback file preview
//!
//! This library loads the icon, type, size and modification date shown
//! for a file-system item that has no rich preview, running the icon and
//! metadata lookups concurrently under a shared cancellation token.

use thiserror::Error;

pub mod config;
pub mod preview;

#[cfg(test)]
pub mod testing;

pub use config::PeekConfig;
pub use preview::{PreviewState, UiContext, UnsupportedFilePreviewer};

/// Error enum, contains all failure states of the library
#[derive(Debug, Error)]
pub enum PeekError {
    /// Preview error
    #[error("Preview error: {0}")]
    PreviewError(#[from] preview::PreviewError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

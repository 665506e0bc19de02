//! Contracts for the external services the preview depends on
//!
//! Icon extraction, file-system access and the clipboard are provided by the
//! host. The preview logic only sees these traits, so tests and alternative
//! hosts can inject their own implementations.

use super::error::Result;
use super::types::{IconHandle, StorageHandle};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// A file-system item being previewed
#[async_trait]
pub trait FileSystemItem: Send + Sync {
    /// Display name of the item
    fn name(&self) -> &str;

    /// Path of the item as given by the host
    fn path(&self) -> &Path;

    /// Last modification time, if known
    fn modified(&self) -> Option<DateTime<Local>>;

    /// Size of the item in bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    async fn size_in_bytes(&self) -> Result<u64>;

    /// Content type of the item (e.g. `text/plain`)
    ///
    /// # Errors
    ///
    /// Returns an error if the content type cannot be determined.
    async fn content_type(&self) -> Result<String>;

    /// Storage handle placed on the clipboard by a copy
    ///
    /// # Errors
    ///
    /// Returns an error if the item can no longer be resolved.
    async fn storage_handle(&self) -> Result<StorageHandle>;
}

/// Icon extraction service
///
/// Must only be called from the UI-owning context.
#[async_trait]
pub trait IconRetrieval: Send + Sync {
    /// Retrieve the icon for the item at `path`
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if `cancel` fires, or any fault of the
    /// underlying extractor.
    async fn get_icon(&self, path: &Path, cancel: &CancellationToken) -> Result<IconHandle>;
}

/// Clipboard service
///
/// Must only be called from the UI-owning context.
pub trait ClipboardService: Send + Sync {
    /// Place `handle` on the clipboard
    ///
    /// # Errors
    ///
    /// Returns `Clipboard` if the clipboard is unavailable or rejects the data.
    fn save(&self, handle: &StorageHandle) -> Result<()>;
}

//! Fallback previewer for items without a rich preview
//!
//! Shows the item's icon, name, type, size and modification date. A load
//! runs the icon fetch and the metadata fetch concurrently and settles on
//! `Loaded` if either succeeded, `Error` if both failed. The icon's arrival
//! promotes the state to `Loaded` on its own, before the metadata fetch
//! finishes, so the icon can be shown early.

use super::capabilities::{ClipboardService, FileSystemItem, IconRetrieval};
use super::error::{PreviewError, Result};
use super::fetch::{IconFetchAdapter, MetadataFetchAdapter};
use super::format::format_modified;
use super::shared::PreviewShared;
use super::types::{LoadOutcome, PreviewFields, PreviewSize, PreviewState};
use super::ui_context::UiContext;
use crate::config::PeekConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Previewer for one file-system item
///
/// Create one per displayed item and drop it when the view moves on.
pub struct UnsupportedFilePreviewer {
    item: Arc<dyn FileSystemItem>,
    clipboard: Arc<dyn ClipboardService>,
    ui: UiContext,
    shared: Arc<PreviewShared>,
    icon_fetch: IconFetchAdapter,
    metadata_fetch: MetadataFetchAdapter,
    size: PreviewSize,
}

impl UnsupportedFilePreviewer {
    /// Create a previewer for `item`
    ///
    /// Name and modification date are filled in immediately; `config` is
    /// read once here to fix the preview size.
    #[must_use]
    pub fn new(
        item: Arc<dyn FileSystemItem>,
        icons: Arc<dyn IconRetrieval>,
        clipboard: Arc<dyn ClipboardService>,
        ui: UiContext,
        config: &PeekConfig,
    ) -> Self {
        let fields = PreviewFields {
            file_name: Some(item.name().to_string()),
            date_modified: item.modified().as_ref().map(format_modified),
            ..PreviewFields::default()
        };
        let shared = Arc::new(PreviewShared::new(fields, ui.clone()));

        Self {
            icon_fetch: IconFetchAdapter::new(ui.clone(), icons, Arc::clone(&shared)),
            metadata_fetch: MetadataFetchAdapter::new(ui.clone(), Arc::clone(&item), Arc::clone(&shared)),
            size: config.preview_size(),
            item,
            clipboard,
            ui,
            shared,
        }
    }

    /// Current loading state
    #[must_use]
    pub fn state(&self) -> PreviewState {
        self.shared.state()
    }

    /// Snapshot of the display fields
    #[must_use]
    pub fn fields(&self) -> PreviewFields {
        self.shared.fields()
    }

    /// Watch state transitions
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.shared.subscribe()
    }

    /// Whether the icon has been loaded
    #[must_use]
    pub fn is_preview_loaded(&self) -> bool {
        self.shared.has_icon()
    }

    /// Preview size as fractions of the available area
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if `cancel` has already fired.
    pub async fn get_preview_size(&self, cancel: &CancellationToken) -> Result<PreviewSize> {
        if cancel.is_cancelled() {
            return Err(PreviewError::Cancelled);
        }
        Ok(self.size)
    }

    /// Load the icon and metadata concurrently and settle the state
    ///
    /// Both fetches always run to completion before the state is reconciled;
    /// a failed or cancelled fetch only leaves its own fields unset. A load
    /// started while another is in flight supersedes it: the older load's
    /// remaining writes are dropped.
    ///
    /// Dropping the returned future does not stop a sub-fetch already running
    /// on the UI context. Its result still lands unless a newer load starts
    /// or the previewer itself is dropped, which supersedes every load.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` without touching the state if `cancel` has
    /// already fired, and `UiContextClosed` if the state cannot be settled
    /// on the UI context.
    pub async fn load(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(PreviewError::Cancelled);
        }

        let generation = self
            .ui
            .run_on({
                let shared = Arc::clone(&self.shared);
                move || async move { shared.begin_load() }
            })
            .await??;
        tracing::debug!(item = %self.item.name(), generation, "loading preview");

        let icon_path = self.icon_path();
        let (icon, display_info) = tokio::join!(
            self.icon_fetch.fetch(icon_path, generation, cancel),
            self.metadata_fetch.fetch(generation, cancel),
        );

        let outcome = LoadOutcome { icon, display_info };
        if outcome.has_failed() {
            tracing::debug!(item = %self.item.name(), error = %PreviewError::AggregateFailed, "preview failed");
        }

        let shared = Arc::clone(&self.shared);
        let settled = self
            .ui
            .run_on(move || async move { shared.reconcile(generation, outcome) })
            .await?;

        match settled {
            Err(PreviewError::Superseded) => Ok(()),
            other => other,
        }
    }

    /// Place the item's storage handle on the clipboard
    ///
    /// # Errors
    ///
    /// Returns the storage lookup or clipboard fault unchanged.
    pub async fn copy(&self) -> Result<()> {
        let item = Arc::clone(&self.item);
        let clipboard = Arc::clone(&self.clipboard);

        self.ui
            .run_on(move || async move {
                let handle = item.storage_handle().await?;
                clipboard.save(&handle)
            })
            .await?
    }

    fn icon_path(&self) -> PathBuf {
        let path = self.item.path();
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
    }
}

impl Drop for UnsupportedFilePreviewer {
    fn drop(&mut self) {
        self.shared.supersede();
    }
}

impl std::fmt::Debug for UnsupportedFilePreviewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsupportedFilePreviewer")
            .field("item", &self.item.name())
            .field("state", &self.state())
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

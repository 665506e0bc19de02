//! Sub-fetch adapters
//!
//! Each adapter wraps one external capability, honors cancellation at fixed
//! points, writes its field(s) on the UI context, and reduces every fault to
//! [`FetchOutcome::Failed`] through [`run_safe`].

use super::capabilities::{FileSystemItem, IconRetrieval};
use super::error::{PreviewError, Result};
use super::format::bytes_to_readable;
use super::safe::run_safe;
use super::shared::PreviewShared;
use super::types::FetchOutcome;
use super::ui_context::UiContext;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn ensure_active(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(PreviewError::Cancelled)
    } else {
        Ok(())
    }
}

/// Fetches the item's icon on the UI context
#[derive(Clone)]
pub(crate) struct IconFetchAdapter {
    ui: UiContext,
    icons: Arc<dyn IconRetrieval>,
    shared: Arc<PreviewShared>,
}

impl IconFetchAdapter {
    pub(crate) fn new(ui: UiContext, icons: Arc<dyn IconRetrieval>, shared: Arc<PreviewShared>) -> Self {
        Self { ui, icons, shared }
    }

    /// Retrieve the icon for `path` and store it
    pub(crate) async fn fetch(
        &self,
        path: PathBuf,
        generation: u64,
        cancel: &CancellationToken,
    ) -> FetchOutcome {
        run_safe("icon", async {
            ensure_active(cancel)?;

            let icons = Arc::clone(&self.icons);
            let shared = Arc::clone(&self.shared);
            let cancel = cancel.clone();
            self.ui
                .run_on(move || async move {
                    ensure_active(&cancel)?;
                    let icon = icons.get_icon(&path, &cancel).await?;
                    ensure_active(&cancel)?;
                    shared.apply_icon(generation, icon)
                })
                .await?
        })
        .await
    }
}

/// Fetches size and content type, then stores both together
#[derive(Clone)]
pub(crate) struct MetadataFetchAdapter {
    ui: UiContext,
    item: Arc<dyn FileSystemItem>,
    shared: Arc<PreviewShared>,
}

impl MetadataFetchAdapter {
    pub(crate) fn new(ui: UiContext, item: Arc<dyn FileSystemItem>, shared: Arc<PreviewShared>) -> Self {
        Self { ui, item, shared }
    }

    /// Look up size then content type and store the display strings
    pub(crate) async fn fetch(&self, generation: u64, cancel: &CancellationToken) -> FetchOutcome {
        run_safe("display info", async {
            ensure_active(cancel)?;
            let bytes = self.item.size_in_bytes().await?;

            ensure_active(cancel)?;
            let file_type = self.item.content_type().await?;

            let file_size = bytes_to_readable(bytes, true);
            let shared = Arc::clone(&self.shared);
            let cancel = cancel.clone();
            self.ui
                .run_on(move || async move {
                    ensure_active(&cancel)?;
                    shared.apply_display_info(generation, file_size, file_type)
                })
                .await?
        })
        .await
    }
}

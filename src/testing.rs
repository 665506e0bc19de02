//! Testing utilities for peek-preview
//!
//! Scripted stand-ins for the external capabilities the previewer depends
//! on. Each mock records how it was called so tests can assert on call
//! counts, threads and ordering.
//!
//! Only available when compiled with `cfg(test)`.

use crate::preview::{
    ClipboardService, FileSystemItem, IconHandle, IconRetrieval, PreviewError, Result,
    StorageHandle, UiContext,
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

/// Small opaque icon used by the mocks
#[must_use]
pub fn sample_icon() -> IconHandle {
    IconHandle::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255])
}

/// Fixed modification time, 2024-03-09 14:05:30 local
#[must_use]
pub fn sample_modified() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 3, 9, 14, 5, 30)
        .single()
        .expect("unambiguous local time")
}

/// Scripted file-system item
#[derive(Default)]
pub struct MockItem {
    name: String,
    path: PathBuf,
    modified: Option<DateTime<Local>>,
    size: Option<u64>,
    content_type: Option<String>,
    storage_fails: bool,
    size_gate: Option<Arc<Notify>>,
    cancel_after_size: Option<CancellationToken>,
    cancel_after_type: Option<CancellationToken>,
    pub size_calls: AtomicUsize,
    pub type_calls: AtomicUsize,
}

impl MockItem {
    /// Item whose size and type lookups fail until configured
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: PathBuf::from("/mock").join(name),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, bytes: u64) -> Self {
        self.size = Some(bytes);
        self
    }

    #[must_use]
    pub fn with_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    #[must_use]
    pub fn with_modified(mut self, modified: DateTime<Local>) -> Self {
        self.modified = Some(modified);
        self
    }

    #[must_use]
    pub fn with_failing_storage(mut self) -> Self {
        self.storage_fails = true;
        self
    }

    /// Hold the size lookup until `gate` is notified
    #[must_use]
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.size_gate = Some(gate);
        self
    }

    /// Cancel `token` as soon as the size lookup returns
    #[must_use]
    pub fn cancel_after_size(mut self, token: CancellationToken) -> Self {
        self.cancel_after_size = Some(token);
        self
    }

    /// Cancel `token` and still return the content type
    #[must_use]
    pub fn cancel_after_type(mut self, token: CancellationToken) -> Self {
        self.cancel_after_type = Some(token);
        self
    }
}

#[async_trait]
impl FileSystemItem for MockItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn modified(&self) -> Option<DateTime<Local>> {
        self.modified
    }

    async fn size_in_bytes(&self) -> Result<u64> {
        self.size_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.size_gate {
            gate.notified().await;
        }
        if let Some(token) = &self.cancel_after_size {
            token.cancel();
        }
        self.size
            .ok_or_else(|| PreviewError::FetchFailed("size unavailable".to_string()))
    }

    async fn content_type(&self) -> Result<String> {
        self.type_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(token) = &self.cancel_after_type {
            token.cancel();
        }
        self.content_type
            .clone()
            .ok_or_else(|| PreviewError::FetchFailed("type unavailable".to_string()))
    }

    async fn storage_handle(&self) -> Result<StorageHandle> {
        if self.storage_fails {
            return Err(PreviewError::FetchFailed("storage item missing".to_string()));
        }
        Ok(StorageHandle {
            path: self.path.clone(),
        })
    }
}

/// Scripted icon retrieval
pub struct MockIcons {
    succeed: bool,
    ui: Option<UiContext>,
    gate: Option<Arc<Notify>>,
    wait_for_cancel: bool,
    cancel_before_return: Option<CancellationToken>,
    pub calls: AtomicUsize,
    pub returned: AtomicUsize,
    pub called_on_ui: AtomicBool,
    pub last_path: Mutex<Option<PathBuf>>,
}

impl MockIcons {
    fn with_outcome(succeed: bool) -> Self {
        Self {
            succeed,
            ui: None,
            gate: None,
            wait_for_cancel: false,
            cancel_before_return: None,
            calls: AtomicUsize::new(0),
            returned: AtomicUsize::new(0),
            called_on_ui: AtomicBool::new(false),
            last_path: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn succeeding() -> Self {
        Self::with_outcome(true)
    }

    #[must_use]
    pub fn failing() -> Self {
        Self::with_outcome(false)
    }

    /// Record whether calls arrive on `ui`
    #[must_use]
    pub fn with_ui(mut self, ui: UiContext) -> Self {
        self.ui = Some(ui);
        self
    }

    /// Hold the retrieval until `gate` is notified
    #[must_use]
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Never complete on its own; return `Cancelled` once the token fires
    #[must_use]
    pub fn until_cancelled(mut self) -> Self {
        self.wait_for_cancel = true;
        self
    }

    /// Cancel `token` right before handing back the icon
    #[must_use]
    pub fn cancel_then_succeed(mut self, token: CancellationToken) -> Self {
        self.cancel_before_return = Some(token);
        self
    }
}

#[async_trait]
impl IconRetrieval for MockIcons {
    async fn get_icon(&self, path: &Path, cancel: &CancellationToken) -> Result<IconHandle> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ui) = &self.ui {
            self.called_on_ui.store(ui.is_current(), Ordering::SeqCst);
        }
        if let Ok(mut last) = self.last_path.lock() {
            *last = Some(path.to_path_buf());
        }

        if self.wait_for_cancel {
            cancel.cancelled().await;
            return Err(PreviewError::Cancelled);
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if let Some(token) = &self.cancel_before_return {
            token.cancel();
        }

        self.returned.fetch_add(1, Ordering::SeqCst);
        if self.succeed {
            Ok(sample_icon())
        } else {
            Err(PreviewError::FetchFailed("no icon for item".to_string()))
        }
    }
}

/// Recording clipboard
#[derive(Default)]
pub struct MockClipboard {
    fail: bool,
    ui: Option<UiContext>,
    pub saved: Mutex<Vec<StorageHandle>>,
    pub calls: AtomicUsize,
    pub called_on_ui: AtomicBool,
}

impl MockClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Record whether calls arrive on `ui`
    #[must_use]
    pub fn with_ui(mut self, ui: UiContext) -> Self {
        self.ui = Some(ui);
        self
    }
}

impl ClipboardService for MockClipboard {
    fn save(&self, handle: &StorageHandle) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ui) = &self.ui {
            self.called_on_ui.store(ui.is_current(), Ordering::SeqCst);
        }
        if self.fail {
            return Err(PreviewError::Clipboard("clipboard locked".to_string()));
        }
        if let Ok(mut saved) = self.saved.lock() {
            saved.push(handle.clone());
        }
        Ok(())
    }
}

//! Preview state and data types

use std::path::PathBuf;
use std::sync::Arc;

/// Loading state of a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewState {
    /// No load has been requested yet
    #[default]
    Initial,
    /// A load is in flight
    Loading,
    /// At least one of the icon or metadata fetches succeeded
    Loaded,
    /// Both the icon and metadata fetches failed
    Error,
}

impl std::fmt::Display for PreviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Initial => "initial",
            Self::Loading => "loading",
            Self::Loaded => "loaded",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Decoded icon image
///
/// The handle is opaque to the preview logic; only the icon retrieval
/// capability that produced it and the consuming view interpret the pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconHandle {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// RGBA pixel data
    pub pixels: Arc<[u8]>,
}

impl IconHandle {
    #[must_use]
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }
}

/// Handle to the underlying storage item, as placed on the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageHandle {
    pub path: PathBuf,
}

/// Preview size as fractions of the available area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewSize {
    pub width: f64,
    pub height: f64,
}

/// Display fields of the fallback preview
///
/// Each field is written by exactly one producer and only on success, so a
/// failed fetch leaves its field at the prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewFields {
    pub icon: Option<IconHandle>,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<String>,
    pub date_modified: Option<String>,
}

/// Outcome of a single sub-fetch, with the underlying fault discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Succeeded,
    Failed,
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Outcomes of both sub-fetches of one load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub icon: FetchOutcome,
    pub display_info: FetchOutcome,
}

impl LoadOutcome {
    /// True only when both sub-fetches failed
    #[must_use]
    pub const fn has_failed(self) -> bool {
        !self.icon.is_success() && !self.display_info.is_success()
    }

    /// State the load cycle settles to
    #[must_use]
    pub const fn reconciled_state(self) -> PreviewState {
        if self.has_failed() {
            PreviewState::Error
        } else {
            PreviewState::Loaded
        }
    }
}

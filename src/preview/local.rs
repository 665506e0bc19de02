//! Local file-system and system clipboard implementations

use super::capabilities::{ClipboardService, FileSystemItem};
use super::error::{PreviewError, Result};
use super::types::StorageHandle;
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

const OCTET_STREAM: &str = "application/octet-stream";

/// A file or directory on the local file system
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    modified: Option<DateTime<Local>>,
    is_dir: bool,
}

impl LocalFile {
    /// Resolve `path` and capture its name and modification time
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the path does not exist or cannot be queried.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self {
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
            is_dir: metadata.is_dir(),
            name,
            path,
        })
    }
}

#[async_trait]
impl FileSystemItem for LocalFile {
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
        Ok(tokio::fs::metadata(&self.path).await?.len())
    }

    async fn content_type(&self) -> Result<String> {
        if self.is_dir {
            return Ok("inode/directory".to_string());
        }
        Ok(content_type_for(&self.path).to_string())
    }

    async fn storage_handle(&self) -> Result<StorageHandle> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(PreviewError::FetchFailed(format!(
                "File not found: {}",
                self.path.display()
            )));
        }
        let path = std::path::absolute(&self.path)?;
        Ok(StorageHandle { path })
    }
}

/// Map a file extension to a content type
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return OCTET_STREAM;
    };

    match ext.to_lowercase().as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" => "text/javascript",
        "rs" => "text/x-rust",
        "json" => "application/json",
        "toml" => "application/toml",
        "xml" => "application/xml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => OCTET_STREAM,
    }
}

/// Clipboard backed by the system clipboard
///
/// Places the item's absolute path on the clipboard as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardService for SystemClipboard {
    fn save(&self, handle: &StorageHandle) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| PreviewError::Clipboard(format!("Clipboard unavailable: {e}")))?;

        clipboard
            .set_text(handle.path.display().to_string())
            .map_err(|e| PreviewError::Clipboard(e.to_string()))
    }
}

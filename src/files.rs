//! Uploaded files: validation, in-memory store, and node mapping.
//!
//! Uploads are validated against a mime allow-list and a size ceiling before
//! they are stored. `node_spec_for` decides what kind of canvas node a file
//! becomes when dropped onto the board; it is intentionally more permissive
//! than the allow-list so that stored files always map to something drawable.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::doc::{NodeKind, Size};

/// Unique identifier for an uploaded file.
pub type FileId = u64;

/// Upload size ceiling, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Mime types accepted by the upload validator.
pub const ALLOWED_MIME_TYPES: [&str; 8] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/svg+xml",
    "application/pdf",
    "text/html",
    "text/markdown",
    "text/plain",
];

/// A stored upload record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: FileId,
    /// Storage name on disk.
    pub filename: String,
    /// Name the file was uploaded under.
    pub original_name: String,
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Storage path relative to the upload root.
    pub path: String,
}

/// An upload waiting for an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDraft {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub path: String,
}

/// Why an upload was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("file type not allowed: {mime_type}")]
    TypeNotAllowed { mime_type: String },
    #[error("file too large: {size} bytes (limit {MAX_UPLOAD_BYTES})")]
    TooLarge { size: u64 },
}

/// Whether an upload with this mime type and name passes the filter.
///
/// Markdown survives a `text/plain` or unknown mime by its `.md` extension.
#[must_use]
pub fn is_allowed(mime_type: &str, original_name: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime_type) || original_name.ends_with(".md")
}

/// Node kind and default size for a file dropped onto the canvas.
#[must_use]
pub fn node_spec_for(mime_type: &str, original_name: &str) -> (NodeKind, Size) {
    if mime_type.starts_with("image/") {
        (NodeKind::Image, Size::new(320.0, 240.0))
    } else if mime_type == "application/pdf" {
        (NodeKind::Document, Size::new(400.0, 500.0))
    } else if mime_type == "text/html" || original_name.ends_with(".html") {
        (NodeKind::Document, Size::new(400.0, 400.0))
    } else {
        (NodeKind::Text, Size::new(300.0, 200.0))
    }
}

/// URL the viewer fetches a stored file's bytes from.
#[must_use]
pub fn content_url(id: FileId) -> String {
    format!("/api/files/{id}/content")
}

/// Human-readable byte count: `"0 Bytes"`, `"1.5 KB"`, `"2 MB"`.
///
/// Powers of 1024, two decimals, trailing zeros trimmed.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let mut text = format!("{value:.2}");
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_owned();
    }
    format!("{text} {}", UNITS[exponent])
}

/// In-memory upload store with sequential ids.
#[derive(Debug)]
pub struct FileStore {
    files: BTreeMap<FileId, UploadedFile>,
    next_id: FileId,
}

impl FileStore {
    /// Create an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self { files: BTreeMap::new(), next_id: 1 }
    }

    /// Validate and store an upload, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError::TypeNotAllowed`] for a mime type outside the
    /// allow-list (unless the name ends in `.md`), or [`UploadError::TooLarge`]
    /// past the size ceiling.
    pub fn create(&mut self, draft: FileDraft) -> Result<&UploadedFile, UploadError> {
        if !is_allowed(&draft.mime_type, &draft.original_name) {
            return Err(UploadError::TypeNotAllowed { mime_type: draft.mime_type });
        }
        if draft.size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge { size: draft.size });
        }
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, name = %draft.original_name, size = draft.size, "file stored");
        Ok(self.files.entry(id).or_insert(UploadedFile {
            id,
            filename: draft.filename,
            original_name: draft.original_name,
            mime_type: draft.mime_type,
            size: draft.size,
            path: draft.path,
        }))
    }

    /// Look up a file by id.
    #[must_use]
    pub fn get(&self, id: FileId) -> Option<&UploadedFile> {
        self.files.get(&id)
    }

    /// All files, ascending by id.
    pub fn list(&self) -> impl Iterator<Item = &UploadedFile> {
        self.files.values()
    }

    /// Remove a file by id. Returns `true` if it was present.
    pub fn delete(&mut self, id: FileId) -> bool {
        let removed = self.files.remove(&id).is_some();
        if removed {
            debug!(id, "file deleted");
        }
        removed
    }

    /// Number of stored files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if the store holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Source resolution: validate the markdown path and read it once.
//!
//! Everything downstream works on the in-memory [`SourceDocument`]; the file
//! is never re-read. Existence is checked before anything else so a missing
//! source fails without touching the filesystem.

use crate::error::Md2PdfError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions recognised as markdown (case-insensitive).
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd"];

/// A markdown document read from disk.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    title: String,
    content: String,
}

impl SourceDocument {
    /// Build a document from text that did not come from disk.
    pub fn from_text(path: impl Into<PathBuf>, title: impl Into<String>, content: String) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            content,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The filename stem, used as the HTML `<title>`.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// True if `path` carries one of [`MARKDOWN_EXTENSIONS`].
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|m| e.eq_ignore_ascii_case(m))
        })
        .unwrap_or(false)
}

/// Derive the document title from the filename stem.
pub fn title_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

/// Validate and read the markdown file at `path`.
pub async fn read_source(path: &Path) -> Result<SourceDocument, Md2PdfError> {
    let path = path.to_path_buf();

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(Md2PdfError::SourceNotFound { path }),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(Md2PdfError::PermissionDenied { path });
        }
        Err(_) => return Err(Md2PdfError::SourceNotFound { path }),
    }

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            return Err(Md2PdfError::PermissionDenied { path });
        }
        Err(e) => return Err(Md2PdfError::SourceReadFailed { path, source: e }),
    };

    debug!("Read {} bytes from {}", content.len(), path.display());
    let title = title_for(&path);
    Ok(SourceDocument {
        path,
        title,
        content,
    })
}

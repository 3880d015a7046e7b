//! Error types for the md2pdf library.
//!
//! Every failure is fatal: the pipeline is a straight line (read → compose →
//! write HTML → render) and there is nothing sensible to continue with once a
//! stage fails. All of them surface as [`Md2PdfError`] from the top-level
//! `convert*` functions.
//!
//! A failure during rendering still leaves the intermediate HTML file on
//! disk; the error messages point at it where that helps diagnosis.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the md2pdf library.
#[derive(Debug, Error)]
pub enum Md2PdfError {
    // ── Source errors ─────────────────────────────────────────────────────
    /// Source markdown file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    SourceNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists but could not be read as UTF-8 text.
    #[error("Failed to read markdown file '{path}': {source}")]
    SourceReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Composition errors ────────────────────────────────────────────────
    /// The markdown-rendering collaborator failed on this input.
    #[error("Markdown rendering failed: {detail}")]
    MarkdownRenderFailed { detail: String },

    /// Could not write the intermediate HTML file.
    #[error("Failed to write HTML file '{path}': {source}")]
    HtmlWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Renderer errors ───────────────────────────────────────────────────
    /// None of the configured browser paths exist; nothing was spawned.
    #[error(
        "{source}\n\n\
Install Google Chrome or Chromium, or point CHROME_PATH at an existing binary:\n\
  CHROME_PATH=/path/to/chrome md2pdf input.md\n"
    )]
    RendererNotFound {
        #[from]
        source: chrome_locate::LocateError,
    },

    /// The browser binary exists but could not be started.
    #[error("Failed to start renderer '{binary}': {source}")]
    RendererSpawnFailed {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The browser exited with a non-zero status (or was killed by a signal).
    #[error("Chrome conversion failed ({}): {stderr}", exit_label(.code))]
    RendererProcessFailed {
        binary: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// The browser ran past the configured timeout and was killed.
    #[error(
        "Renderer timed out after {secs}s and was killed\n\
Increase --timeout or check the HTML for blocking resources."
    )]
    RendererTimeout { secs: u64 },

    /// The browser exited successfully but the PDF is missing or empty.
    #[error("PDF file was not created: '{path}'")]
    RendererProducedNoOutput { path: PathBuf },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

impl Md2PdfError {
    /// True for errors raised after the HTML file was written.
    ///
    /// The CLI uses this to point the user at the intermediate file.
    pub fn is_renderer_error(&self) -> bool {
        matches!(
            self,
            Md2PdfError::RendererNotFound { .. }
                | Md2PdfError::RendererSpawnFailed { .. }
                | Md2PdfError::RendererProcessFailed { .. }
                | Md2PdfError::RendererTimeout { .. }
                | Md2PdfError::RendererProducedNoOutput { .. }
        )
    }
}

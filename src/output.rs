//! Result types returned by the conversion entry points.

use crate::error::Md2PdfError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where one conversion reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionPaths {
    /// The markdown source.
    pub source: PathBuf,
    /// Intermediate HTML, sibling to the source (`<stem>.html`).
    pub html: PathBuf,
    /// Final PDF (caller-supplied, or `<stem>.pdf` next to the source).
    pub pdf: PathBuf,
}

impl ConversionPaths {
    /// Derive the HTML and PDF paths for `source`.
    ///
    /// `dest` wins when supplied; otherwise the source extension is replaced
    /// with `.pdf`. The HTML path always replaces the extension with `.html`.
    pub fn resolve(source: impl AsRef<Path>, dest: Option<&Path>) -> Self {
        let source = source.as_ref().to_path_buf();
        let html = source.with_extension("html");
        let pdf = dest
            .map(Path::to_path_buf)
            .unwrap_or_else(|| source.with_extension("pdf"));
        Self { source, html, pdf }
    }

    /// Reject layouts where a write would clobber the source or the HTML,
    /// e.g. a `notes.html` source whose intermediate is itself.
    pub fn ensure_distinct(&self) -> Result<(), Md2PdfError> {
        let source = lexical_absolute(&self.source);
        let html = lexical_absolute(&self.html);
        let pdf = lexical_absolute(&self.pdf);

        if html == source {
            return Err(Md2PdfError::InvalidConfig(format!(
                "source '{}' would be overwritten by the intermediate HTML; \
rename it to a markdown extension",
                self.source.display()
            )));
        }
        if pdf == source || pdf == html {
            return Err(Md2PdfError::InvalidConfig(format!(
                "PDF destination '{}' collides with the source or the intermediate HTML",
                self.pdf.display()
            )));
        }
        Ok(())
    }
}

fn lexical_absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// One run of the headless browser.
#[derive(Debug, Clone, Serialize)]
pub struct RendererInvocation {
    /// The browser binary that was executed.
    pub binary: PathBuf,
    /// Absolute path of the HTML input.
    pub html: PathBuf,
    /// Absolute path of the PDF output.
    pub pdf: PathBuf,
    /// Process exit code (`None` if terminated by a signal).
    pub exit_code: Option<i32>,
    /// Captured stderr, lossily decoded. Chrome is chatty here even on success.
    pub stderr: String,
    /// Wall-clock time the process ran.
    pub elapsed_ms: u64,
    /// Size of the produced PDF.
    pub pdf_bytes: u64,
}

/// Per-stage timing for one conversion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    /// Bytes of markdown read.
    pub source_bytes: usize,
    /// Blank lines inserted by the list normaliser (0 when disabled).
    pub inserted_blank_lines: usize,
    /// Bytes of HTML written.
    pub html_bytes: usize,
    /// Bytes of PDF produced.
    pub pdf_bytes: u64,
    /// Read + normalise + compose + write time in milliseconds.
    pub compose_duration_ms: u64,
    /// Browser run time in milliseconds.
    pub render_duration_ms: u64,
    /// Total wall-clock time in milliseconds.
    pub total_duration_ms: u64,
}

/// The complete result of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    pub paths: ConversionPaths,
    /// Derived document title (the source filename stem).
    pub title: String,
    pub renderer: RendererInvocation,
    pub stats: ConversionStats,
}

/// Result of composing without rendering (`--html-only`).
#[derive(Debug, Clone, Serialize)]
pub struct ComposedDocument {
    pub paths: ConversionPaths,
    pub title: String,
    /// The full HTML document that was written to `paths.html`.
    #[serde(skip)]
    pub html: String,
    pub stats: ConversionStats,
}

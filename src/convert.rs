//! Conversion entry points.
//!
//! ```text
//! source.md ─▶ read ─▶ normalize? ─▶ compose ─▶ write source.html ─▶ render ─▶ dest.pdf
//! ```
//!
//! The stages run strictly in order and the first failure aborts the rest.
//! The intermediate HTML file is left next to the source on success and on
//! failure; it is the first thing to open when the PDF looks wrong.
//!
//! Two conversions of the same source at once write the same HTML path.
//! Nothing guards against that; callers serialise them.

use crate::config::ConversionConfig;
use crate::error::Md2PdfError;
use crate::output::{ComposedDocument, ConversionOutput, ConversionPaths, ConversionStats};
use crate::pipeline::compose::compose_document;
use crate::pipeline::markdown::{MarkdownRenderer, PulldownRenderer};
use crate::pipeline::normalize::normalize_lists_counted;
use crate::pipeline::render::render_pdf;
use crate::pipeline::source::{read_source, SourceDocument};
use crate::progress::Stage;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::TempDir;
use tracing::{debug, info};

/// Convert a markdown file to PDF.
///
/// # Arguments
/// * `source` — Path of the markdown file
/// * `dest`   — PDF destination; `None` means `<source stem>.pdf` next to the source
/// * `config` — Conversion configuration
///
/// # Errors
/// Any stage failure, see [`Md2PdfError`]. A missing source is reported
/// before any file is written.
pub async fn convert(
    source: impl AsRef<Path>,
    dest: Option<&Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    convert_with(&PulldownRenderer, source, dest, config).await
}

/// [`convert`] with a caller-supplied markdown renderer.
pub async fn convert_with(
    renderer: &dyn MarkdownRenderer,
    source: impl AsRef<Path>,
    dest: Option<&Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let total_start = Instant::now();
    let paths = ConversionPaths::resolve(source, dest);
    info!("Starting conversion: {}", paths.source.display());

    // ── Steps 1–4: read, normalise, compose, write HTML ──────────────────
    let composed = compose_to_file(renderer, paths, config).await?;

    // ── Step 5: Render PDF ───────────────────────────────────────────────
    render_composed(composed, config, total_start).await
}

/// Compose and write `<stem>.html` without running the browser.
pub async fn compose_only(
    source: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ComposedDocument, Md2PdfError> {
    let paths = ConversionPaths::resolve(source, None);
    compose_to_file(&PulldownRenderer, paths, config).await
}

/// Convert markdown held in memory.
///
/// `title` goes into the HTML `<title>` as given. The HTML is written to a
/// scoped temporary directory that is removed on return, so nothing besides
/// `dest` is left on disk.
pub async fn convert_markdown(
    markdown: &str,
    title: &str,
    dest: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    let total_start = Instant::now();
    let tmp = TempDir::new().map_err(|e| Md2PdfError::Internal(format!("tempdir: {e}")))?;
    let source_path = tmp.path().join(format!("{}.md", sanitize_stem(title)));
    let paths = ConversionPaths::resolve(&source_path, Some(dest.as_ref()));
    info!("Starting in-memory conversion: {}", paths.pdf.display());

    let doc = SourceDocument::from_text(source_path, title, markdown.to_string());
    let composed = write_composed(&PulldownRenderer, doc, paths, config).await?;
    let output = render_composed(composed, config, total_start).await?;
    debug!("Removing temporary HTML {}", output.paths.html.display());
    // `tmp` is dropped (and the HTML deleted) here
    Ok(output)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a single-threaded tokio runtime internally.
pub fn convert_sync(
    source: impl AsRef<Path>,
    dest: Option<&Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2PdfError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Md2PdfError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(source, dest, config))
}

/// Produce the HTML document for `doc` (normalise + render + wrap).
///
/// Pure with respect to the filesystem; returns the document and the number
/// of blank lines the normaliser inserted. The file pipeline runs the same
/// two steps, one progress stage each.
pub fn build_html(
    renderer: &dyn MarkdownRenderer,
    doc: &SourceDocument,
    config: &ConversionConfig,
) -> Result<(String, usize), Md2PdfError> {
    let (text, inserted) = prepare_markdown(doc, config);
    let html = compose_document(renderer, &text, doc.title(), config)?;
    Ok((html, inserted))
}

/// Resolve the intermediate and destination paths for `source`.
pub fn resolve_paths(source: impl AsRef<Path>, dest: Option<PathBuf>) -> ConversionPaths {
    ConversionPaths::resolve(source, dest.as_deref())
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Markdown text handed to the renderer, plus the blank lines inserted.
fn prepare_markdown<'a>(
    doc: &'a SourceDocument,
    config: &ConversionConfig,
) -> (Cow<'a, str>, usize) {
    if config.normalize_lists {
        let n = normalize_lists_counted(doc.content());
        (Cow::Owned(n.text), n.inserted)
    } else {
        (Cow::Borrowed(doc.content()), 0)
    }
}

async fn compose_to_file(
    renderer: &dyn MarkdownRenderer,
    paths: ConversionPaths,
    config: &ConversionConfig,
) -> Result<ComposedDocument, Md2PdfError> {
    // ── Step 1: Read source ──────────────────────────────────────────────
    let doc = run_stage(config, Stage::Read, read_source(&paths.source)).await?;
    write_composed(renderer, doc, paths, config).await
}

/// Steps 2–4 for a document already in memory.
async fn write_composed(
    renderer: &dyn MarkdownRenderer,
    doc: SourceDocument,
    paths: ConversionPaths,
    config: &ConversionConfig,
) -> Result<ComposedDocument, Md2PdfError> {
    let start = Instant::now();
    paths.ensure_distinct()?;

    // ── Step 2: Normalise lists ──────────────────────────────────────────
    let (text, inserted) = if config.normalize_lists {
        run_stage(config, Stage::Normalize, async {
            Ok(prepare_markdown(&doc, config))
        })
        .await?
    } else {
        prepare_markdown(&doc, config)
    };
    if inserted > 0 {
        debug!("Normaliser inserted {} blank lines", inserted);
    }

    // ── Step 3: Compose HTML ─────────────────────────────────────────────
    let html = run_stage(config, Stage::Compose, async {
        compose_document(renderer, &text, doc.title(), config)
    })
    .await?;

    // ── Step 4: Write HTML next to the source ────────────────────────────
    run_stage(config, Stage::WriteHtml, async {
        tokio::fs::write(&paths.html, &html)
            .await
            .map_err(|e| Md2PdfError::HtmlWriteFailed {
                path: paths.html.clone(),
                source: e,
            })
    })
    .await?;
    info!("HTML generated: {}", paths.html.display());

    let elapsed = start.elapsed().as_millis() as u64;
    let stats = ConversionStats {
        source_bytes: doc.content().len(),
        inserted_blank_lines: inserted,
        html_bytes: html.len(),
        compose_duration_ms: elapsed,
        total_duration_ms: elapsed,
        ..Default::default()
    };

    Ok(ComposedDocument {
        paths,
        title: doc.title().to_string(),
        html,
        stats,
    })
}

/// Step 5: print the written HTML and fill in the final stats.
async fn render_composed(
    composed: ComposedDocument,
    config: &ConversionConfig,
    total_start: Instant,
) -> Result<ConversionOutput, Md2PdfError> {
    let invocation = run_stage(config, Stage::Render, async {
        render_pdf(&composed.paths.html, &composed.paths.pdf, config).await
    })
    .await?;

    let mut stats = composed.stats;
    stats.pdf_bytes = invocation.pdf_bytes;
    stats.render_duration_ms = invocation.elapsed_ms;
    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;

    info!(
        "Conversion complete: {} -> {} ({}ms)",
        composed.paths.source.display(),
        composed.paths.pdf.display(),
        stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(stats.pdf_bytes, stats.total_duration_ms);
    }

    Ok(ConversionOutput {
        paths: composed.paths,
        title: composed.title,
        renderer: invocation,
        stats,
    })
}

/// Run one stage, reporting start/complete/failure to the progress callback.
async fn run_stage<T, F>(config: &ConversionConfig, stage: Stage, fut: F) -> Result<T, Md2PdfError>
where
    F: std::future::Future<Output = Result<T, Md2PdfError>>,
{
    let cb = config.progress_callback.as_ref();
    if let Some(cb) = cb {
        cb.on_stage_start(stage);
    }
    let start = Instant::now();
    let result = fut.await;
    if let Some(cb) = cb {
        match &result {
            Ok(_) => cb.on_stage_complete(stage, start.elapsed().as_millis() as u64),
            Err(e) => cb.on_conversion_failed(stage, &e.to_string()),
        }
    }
    result
}

/// Keep a caller-supplied title usable as a file stem.
fn sanitize_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    let stem = stem.trim().trim_matches('.');
    if stem.is_empty() {
        "document".to_string()
    } else {
        stem.to_string()
    }
}

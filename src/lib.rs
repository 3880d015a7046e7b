//! # md2pdf
//!
//! Convert Markdown documents to PDF by rendering styled HTML and printing it
//! with a headless Chrome or Chromium.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Read       validate the path, read the file once
//!  ├─ 2. Normalize  blank line before list blocks (optional)
//!  ├─ 3. Compose    pulldown-cmark fragment + template + embedded CSS
//!  ├─ 4. Write      <stem>.html next to the source (kept on disk)
//!  └─ 5. Render     chrome --headless --print-to-pdf, then verify the PDF
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pdf::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let output = convert("report.md", None, &config).await?;
//!     println!("{} ({} bytes)", output.paths.pdf.display(), output.stats.pdf_bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pdf` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! md2pdf = { version = "0.1", default-features = false }
//! ```
//!
//! ## Presets
//!
//! | Knob | Options | Default |
//! |------|---------|---------|
//! | `normalize_lists` | on / off | on |
//! | `extensions` | `Rich`, `Minimal` | `Rich` |
//! | `stylesheet` | `Print` (pt), `Screen` (px, centred column) | `Print` |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod styles;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, ExtensionPreset, StylesheetPreset};
pub use convert::{
    build_html, compose_only, convert, convert_markdown, convert_sync, convert_with, resolve_paths,
};
pub use error::Md2PdfError;
pub use output::{
    ComposedDocument, ConversionOutput, ConversionPaths, ConversionStats, RendererInvocation,
};
pub use pipeline::markdown::{MarkdownRenderer, PulldownRenderer};
pub use pipeline::normalize::normalize_lists;
pub use pipeline::source::SourceDocument;
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback, Stage};

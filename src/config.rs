//! Configuration types for Markdown-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The three pipeline shapes the tool
//! supports (list normalisation on/off, rich/minimal markdown extensions,
//! print/screen stylesheet) are independent flags on one struct rather than
//! separate code paths.

use crate::error::Md2PdfError;
use crate::progress::ProgressCallback;
use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Configuration for a Markdown-to-PDF conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2pdf::{ConversionConfig, ExtensionPreset, StylesheetPreset};
///
/// let config = ConversionConfig::builder()
///     .normalize_lists(false)
///     .extensions(ExtensionPreset::Minimal)
///     .stylesheet(StylesheetPreset::Screen)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Insert a blank line before list blocks that directly follow a
    /// paragraph line. Default: true.
    ///
    /// Some markdown dialects only start a list after a blank line; the
    /// normaliser makes `Intro:\n- a\n- b` render as a list everywhere.
    pub normalize_lists: bool,

    /// Markdown extension set handed to the renderer. Default: [`ExtensionPreset::Rich`].
    pub extensions: ExtensionPreset,

    /// Stylesheet embedded in the HTML document. Default: [`StylesheetPreset::Print`].
    pub stylesheet: StylesheetPreset,

    /// Extra CSS appended after the preset stylesheet, so its rules win.
    pub custom_css: Option<String>,

    /// Browser binaries to probe, in order. The first existing path is used.
    ///
    /// Defaults to [`chrome_locate::default_candidates`]: `CHROME_PATH`
    /// (when set) followed by the well-known install locations.
    pub renderer_paths: Vec<PathBuf>,

    /// Extra flags passed to the browser before the input file, e.g.
    /// `--no-sandbox` when running as root inside a container.
    pub renderer_args: Vec<String>,

    /// Kill the browser if it runs longer than this. Default: None (wait forever).
    pub renderer_timeout_secs: Option<u64>,

    /// Optional stage-progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            normalize_lists: true,
            extensions: ExtensionPreset::default(),
            stylesheet: StylesheetPreset::default(),
            custom_css: None,
            renderer_paths: chrome_locate::default_candidates(),
            renderer_args: Vec::new(),
            renderer_timeout_secs: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("normalize_lists", &self.normalize_lists)
            .field("extensions", &self.extensions)
            .field("stylesheet", &self.stylesheet)
            .field("custom_css", &self.custom_css.as_ref().map(|c| c.len()))
            .field("renderer_paths", &self.renderer_paths)
            .field("renderer_args", &self.renderer_args)
            .field("renderer_timeout_secs", &self.renderer_timeout_secs)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn normalize_lists(mut self, v: bool) -> Self {
        self.config.normalize_lists = v;
        self
    }

    pub fn extensions(mut self, preset: ExtensionPreset) -> Self {
        self.config.extensions = preset;
        self
    }

    pub fn stylesheet(mut self, preset: StylesheetPreset) -> Self {
        self.config.stylesheet = preset;
        self
    }

    pub fn custom_css(mut self, css: impl Into<String>) -> Self {
        self.config.custom_css = Some(css.into());
        self
    }

    /// Replace the browser search list entirely.
    pub fn renderer_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config.renderer_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn renderer_arg(mut self, arg: impl Into<String>) -> Self {
        self.config.renderer_args.push(arg.into());
        self
    }

    pub fn renderer_timeout_secs(mut self, secs: u64) -> Self {
        self.config.renderer_timeout_secs = Some(secs);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2PdfError> {
        let c = &self.config;
        if c.renderer_timeout_secs == Some(0) {
            return Err(Md2PdfError::InvalidConfig(
                "Renderer timeout must be ≥ 1 second".into(),
            ));
        }
        if let Some(arg) = c
            .renderer_args
            .iter()
            .find(|a| a.starts_with("--print-to-pdf"))
        {
            return Err(Md2PdfError::InvalidConfig(format!(
                "'{arg}' is set by md2pdf itself; pass the destination path instead"
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Named bundle of markdown parsing features.
///
/// | Preset | Features |
/// |--------|----------|
/// | `Rich` | tables, fenced code, footnotes, strikethrough, heading attributes, newline → `<br>` |
/// | `Minimal` | tables, fenced code |
///
/// Fenced code blocks and lists that interrupt a paragraph are part of
/// CommonMark itself, so both presets get them without a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionPreset {
    /// Print-oriented, feature-rich. (default)
    #[default]
    Rich,
    /// Tables and fenced code only.
    Minimal,
}

impl ExtensionPreset {
    /// Parser options for this preset.
    pub fn options(self) -> Options {
        match self {
            ExtensionPreset::Rich => {
                Options::ENABLE_TABLES
                    | Options::ENABLE_FOOTNOTES
                    | Options::ENABLE_STRIKETHROUGH
                    | Options::ENABLE_HEADING_ATTRIBUTES
            }
            ExtensionPreset::Minimal => Options::ENABLE_TABLES,
        }
    }

    /// Whether single newlines inside a paragraph become `<br>`.
    pub fn hard_line_breaks(self) -> bool {
        matches!(self, ExtensionPreset::Rich)
    }
}

/// Which embedded stylesheet the HTML document carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylesheetPreset {
    /// Compact sizing in points, full page width. (default)
    #[default]
    Print,
    /// Pixel sizing with a centred max-width column.
    Screen,
}

impl StylesheetPreset {
    /// The CSS text for this preset.
    pub fn css(self) -> &'static str {
        match self {
            StylesheetPreset::Print => crate::styles::PRINT_STYLESHEET,
            StylesheetPreset::Screen => crate::styles::SCREEN_STYLESHEET,
        }
    }
}

//! CLI binary for md2pdf.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2pdf::pipeline::render::locate_renderer;
use md2pdf::pipeline::source::is_markdown_path;
use md2pdf::{
    compose_only, convert, resolve_paths, ConversionConfig, ConversionProgressCallback,
    ExtensionPreset, ProgressCallback, Stage, StylesheetPreset,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal spinner that names the current stage. Rendering is the only slow
/// stage, so the spinner mostly exists to show that Chrome is still working.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style =
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("md2pdf");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: Stage) {
        let msg = match stage {
            Stage::Read => "Reading markdown…",
            Stage::Normalize => "Normalising lists…",
            Stage::Compose => "Composing HTML…",
            Stage::WriteHtml => "Writing HTML…",
            Stage::Render => "Printing PDF with headless Chrome…",
        };
        self.bar.set_message(msg);
    }

    fn on_stage_complete(&self, stage: Stage, elapsed_ms: u64) {
        if stage == Stage::Render {
            self.bar.println(format!(
                "  {} {:<10} {}",
                green("✓"),
                stage.to_string(),
                dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
            ));
        }
    }

    fn on_conversion_failed(&self, stage: Stage, _error: &str) {
        self.bar.println(format!("  {} {}", red("✗"), stage));
        self.bar.finish_and_clear();
    }

    fn on_conversion_complete(&self, _pdf_bytes: u64, _total_ms: u64) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Creates report.pdf (and report.html) next to report.md
  md2pdf report.md

  # Explicit destination
  md2pdf report.md out/final.pdf

  # Screen-style layout, minimal markdown, no list normalisation
  md2pdf --style screen --extensions minimal --no-normalize notes.md

  # Extra CSS on top of the preset
  md2pdf --css brand.css report.md

  # Running as root in a container
  md2pdf --renderer-arg=--no-sandbox report.md

  # Only write the HTML
  md2pdf --html-only report.md

  # Which browser would be used?
  md2pdf --which-renderer

RENDERER SEARCH ORDER:
  --chrome <PATH> is used alone; a missing path is an error. Otherwise:
  1. CHROME_PATH
  2. /Applications/Google Chrome.app/Contents/MacOS/Google Chrome
  3. /usr/bin/google-chrome
  4. /usr/bin/chromium-browser
  5. /usr/bin/chromium

ENVIRONMENT VARIABLES:
  CHROME_PATH   Browser binary probed before the built-in list
  RUST_LOG      Log filter (overrides --verbose / --quiet)
"#;

/// Convert Markdown files to PDF via styled HTML and headless Chrome.
#[derive(Parser, Debug)]
#[command(
    name = "md2pdf",
    version,
    about = "Convert Markdown files to PDF via styled HTML and headless Chrome",
    long_about = "Convert a Markdown file to PDF. The markdown is rendered to a standalone HTML \
document with an embedded print stylesheet, written next to the source, and printed to PDF \
by a headless Chrome or Chromium.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown source file.
    source: Option<PathBuf>,

    /// PDF destination. Default: the source path with a .pdf extension.
    dest: Option<PathBuf>,

    /// Do not insert blank lines before list blocks.
    #[arg(long, env = "MD2PDF_NO_NORMALIZE")]
    no_normalize: bool,

    /// Markdown extension preset.
    #[arg(long, env = "MD2PDF_EXTENSIONS", value_enum, default_value = "rich")]
    extensions: ExtensionsArg,

    /// Stylesheet preset.
    #[arg(long, env = "MD2PDF_STYLE", value_enum, default_value = "print")]
    style: StyleArg,

    /// CSS file appended after the preset stylesheet.
    #[arg(long, env = "MD2PDF_CSS")]
    css: Option<PathBuf>,

    /// Browser binary to use instead of the built-in search list.
    #[arg(long, env = "MD2PDF_CHROME")]
    chrome: Option<PathBuf>,

    /// Extra flag passed to the browser (repeatable).
    #[arg(long = "renderer-arg", allow_hyphen_values = true)]
    renderer_args: Vec<String>,

    /// Kill the browser after this many seconds.
    #[arg(long, env = "MD2PDF_TIMEOUT", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Write the HTML file and stop.
    #[arg(long)]
    html_only: bool,

    /// Print the browser binary that would be used and exit.
    #[arg(long)]
    which_renderer: bool,

    /// Print a JSON report instead of the summary lines.
    #[arg(long, env = "MD2PDF_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "MD2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2PDF_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ExtensionsArg {
    Rich,
    Minimal,
}

impl From<ExtensionsArg> for ExtensionPreset {
    fn from(v: ExtensionsArg) -> Self {
        match v {
            ExtensionsArg::Rich => ExtensionPreset::Rich,
            ExtensionsArg::Minimal => ExtensionPreset::Minimal,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StyleArg {
    Print,
    Screen,
}

impl From<StyleArg> for StylesheetPreset {
    fn from(v: StyleArg) -> Self {
        match v {
            StyleArg::Print => StylesheetPreset::Print,
            StyleArg::Screen => StylesheetPreset::Screen,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner and summary lines carry the user-facing feedback; INFO logs
    // only show up when the spinner is off.
    let show_progress =
        !cli.quiet && !cli.no_progress && !cli.json && !cli.html_only && !cli.which_renderer;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress || cli.json {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = build_config(&cli).await?;

    // ── Locate-only mode ─────────────────────────────────────────────────
    if cli.which_renderer {
        let binary = locate_renderer(&config)?;
        println!("{}", binary.display());
        return Ok(());
    }

    // ── Validate source ──────────────────────────────────────────────────
    let Some(source) = cli.source.clone() else {
        anyhow::bail!("No markdown source given.\nUsage: md2pdf <SOURCE> [DEST]");
    };
    if !source.exists() {
        anyhow::bail!("File not found: {}", source.display());
    }
    if !is_markdown_path(&source) && !cli.quiet {
        eprintln!(
            "{} Input file doesn't have .md extension",
            yellow("Warning:")
        );
    }

    // ── HTML-only mode ───────────────────────────────────────────────────
    if cli.html_only {
        let composed = compose_only(&source, &config)
            .await
            .context("HTML generation failed")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&composed).context("Failed to serialise report")?
            );
        } else if !cli.quiet {
            eprintln!(
                "{} HTML generated: {}",
                green("✓"),
                bold(&composed.paths.html.display().to_string())
            );
        }
        return Ok(());
    }

    // ── Run conversion ───────────────────────────────────────────────────
    // The spinner starts only once the source is known to exist.
    if show_progress {
        let cb: ProgressCallback = CliProgressCallback::new();
        config.progress_callback = Some(cb);
    }
    let paths = resolve_paths(&source, cli.dest.clone());
    let output = match convert(&source, cli.dest.as_deref(), &config).await {
        Ok(output) => output,
        Err(e) if e.is_renderer_error() && paths.html.exists() => {
            return Err(anyhow::Error::new(e).context(format!(
                "Conversion failed (HTML kept at {})",
                paths.html.display()
            )));
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Conversion failed")),
    };

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{} HTML generated: {}",
            green("✓"),
            output.paths.html.display()
        );
        eprintln!(
            "{} PDF generated: {} ({:.1} KB)",
            green("✓"),
            output.paths.pdf.display(),
            output.stats.pdf_bytes as f64 / 1024.0
        );
        eprintln!(
            "\n{} Conversion complete: {} -> {}  {}",
            green("✔"),
            output.paths.source.display(),
            bold(&output.paths.pdf.display().to_string()),
            dim(&format!("{}ms", output.stats.total_duration_ms)),
        );
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
async fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .normalize_lists(!cli.no_normalize)
        .extensions(cli.extensions.into())
        .stylesheet(cli.style.into());

    if let Some(ref path) = cli.css {
        let css = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read CSS from {:?}", path))?;
        builder = builder.custom_css(css);
    }
    if let Some(ref chrome) = cli.chrome {
        // An explicit browser is never silently swapped for another one.
        builder = builder.renderer_paths([chrome.clone()]);
    }
    for arg in &cli.renderer_args {
        builder = builder.renderer_arg(arg.clone());
    }
    if let Some(secs) = cli.timeout {
        builder = builder.renderer_timeout_secs(secs);
    }

    builder.build().context("Invalid configuration")
}

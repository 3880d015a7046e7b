//! Integration tests for the md2pdf pipeline.
//!
//! The renderer is replaced by small shell scripts written into a temp dir
//! and injected through `renderer_paths`, so these tests run without a
//! browser. Tests that need a real Chrome are gated behind `E2E_ENABLED`.
//!
//! Run the live ones with:
//!   E2E_ENABLED=1 cargo test --test pipeline -- --nocapture

use md2pdf::{
    build_html, compose_only, convert, convert_markdown, convert_sync, ConversionConfig,
    ConversionProgressCallback, ExtensionPreset, Md2PdfError, PulldownRenderer, SourceDocument,
    Stage, StylesheetPreset,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ── Test helpers ─────────────────────────────────────────────────────────────

const SCENARIO_1: &str = "# Title\n\nSome text\n- item one\n- item two\n";

fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let p = dir.path().join(name);
    std::fs::write(&p, content).unwrap();
    p
}

/// Fake browser: records its argv next to itself and writes a tiny PDF to
/// the `--print-to-pdf=` target.
#[cfg(unix)]
const WRITES_PDF: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$(dirname "$0")/args.txt"
for arg in "$@"; do
  case "$arg" in
    --print-to-pdf=*) out="${arg#--print-to-pdf=}" ;;
  esac
done
printf '%%PDF-1.4\n%%fake\n' > "$out"
"#;

/// Like `WRITES_PDF`, but also keeps a copy of the HTML it was given.
#[cfg(unix)]
const KEEPS_HTML: &str = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    --print-to-pdf=*) out="${arg#--print-to-pdf=}" ;;
  esac
  html="$arg"
done
cp "$html" "$(dirname "$0")/seen.html"
printf '%%PDF-1.4\n%%fake\n' > "$out"
"#;

#[cfg(unix)]
const EXITS_CLEAN_NO_PDF: &str = "#!/bin/sh\nexit 0\n";

#[cfg(unix)]
const FAILS: &str = "#!/bin/sh\necho 'GPU process crashed' >&2\nexit 3\n";

#[cfg(unix)]
const HANGS: &str = "#!/bin/sh\nexec sleep 30\n";

#[cfg(unix)]
fn fake_renderer(dir: &TempDir, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let p = dir.path().join(name);
    std::fs::write(&p, script).unwrap();
    std::fs::set_permissions(&p, std::fs::Permissions::from_mode(0o755)).unwrap();
    p
}

fn config_with_renderer(binary: &Path) -> ConversionConfig {
    ConversionConfig::builder()
        .renderer_paths([binary.to_path_buf()])
        .build()
        .expect("valid config")
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl ConversionProgressCallback for Recorder {
    fn on_stage_start(&self, stage: Stage) {
        self.events.lock().unwrap().push(format!("start {stage}"));
    }

    fn on_stage_complete(&self, stage: Stage, _elapsed_ms: u64) {
        self.events.lock().unwrap().push(format!("done {stage}"));
    }

    fn on_conversion_failed(&self, stage: Stage, _error: &str) {
        self.events.lock().unwrap().push(format!("fail {stage}"));
    }

    fn on_conversion_complete(&self, _pdf_bytes: u64, _total_ms: u64) {
        self.events.lock().unwrap().push("complete".to_string());
    }
}

// ── Composition (no renderer) ────────────────────────────────────────────────

#[tokio::test]
async fn scenario_heading_paragraph_single_list() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "scenario.md", SCENARIO_1);
    let config = ConversionConfig::default();

    let composed = compose_only(&src, &config).await.unwrap();
    let html = std::fs::read_to_string(dir.path().join("scenario.html")).unwrap();

    assert_eq!(composed.stats.inserted_blank_lines, 1);
    assert_eq!(html.matches("<h1>").count(), 1);
    assert!(html.contains("<h1>Title</h1>"), "got: {html}");
    assert_eq!(html.matches("<p>Some text</p>").count(), 1);
    assert_eq!(html.matches("<ul>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 2);

    // The in-memory builder produces the same document as the file pipeline.
    let doc = SourceDocument::from_text(&src, "scenario", SCENARIO_1.to_string());
    let (built, inserted) = build_html(&PulldownRenderer, &doc, &config).unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(built, html);
}

#[tokio::test]
async fn html_source_is_never_overwritten() {
    let dir = TempDir::new().unwrap();
    let original = "<p>hand written</p>\n";
    let src = write_source(&dir, "notes.html", original);

    let err = compose_only(&src, &ConversionConfig::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Md2PdfError::InvalidConfig(_)), "got {err:?}");
    assert_eq!(std::fs::read_to_string(&src).unwrap(), original);
}

#[tokio::test]
async fn html_is_byte_identical_across_runs() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "notes.md", SCENARIO_1);
    let config = ConversionConfig::default();

    let first = compose_only(&src, &config).await.unwrap();
    let on_disk_1 = std::fs::read(&first.paths.html).unwrap();
    let second = compose_only(&src, &config).await.unwrap();
    let on_disk_2 = std::fs::read(&second.paths.html).unwrap();

    assert_eq!(on_disk_1, on_disk_2);
    assert_eq!(first.html, second.html);
}

#[tokio::test]
async fn compose_only_writes_sibling_html_with_title() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "report.md", "para\npara2\n");
    let config = ConversionConfig::builder()
        .stylesheet(StylesheetPreset::Screen)
        .extensions(ExtensionPreset::Minimal)
        .build()
        .unwrap();

    let composed = compose_only(&src, &config).await.unwrap();

    assert_eq!(composed.paths.html, dir.path().join("report.html"));
    assert_eq!(composed.stats.inserted_blank_lines, 0);
    let html = std::fs::read_to_string(&composed.paths.html).unwrap();
    assert!(html.contains("<title>report</title>"));
    assert!(html.contains("max-width: 900px"));
    assert!(!dir.path().join("report.pdf").exists());
}

// ── Source errors ────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_source_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("ghost.md");
    let config = ConversionConfig::builder()
        .renderer_paths([dir.path().join("chrome")])
        .build()
        .unwrap();

    let err = convert(&src, None, &config).await.unwrap_err();

    assert!(matches!(err, Md2PdfError::SourceNotFound { .. }), "got {err:?}");
    assert!(!dir.path().join("ghost.html").exists());
    assert!(!dir.path().join("ghost.pdf").exists());
}

#[tokio::test]
async fn missing_renderer_keeps_html_and_spawns_nothing() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "doc.md", SCENARIO_1);
    let config = ConversionConfig::builder()
        .renderer_paths([dir.path().join("chrome"), dir.path().join("chromium")])
        .build()
        .unwrap();

    let err = convert(&src, None, &config).await.unwrap_err();

    assert!(matches!(err, Md2PdfError::RendererNotFound { .. }), "got {err:?}");
    assert!(err.is_renderer_error());
    assert!(dir.path().join("doc.html").exists());
    assert!(!dir.path().join("doc.pdf").exists());
}

// ── Renderer behaviour (fake browsers, unix only) ────────────────────────────

#[cfg(unix)]
#[tokio::test]
async fn default_destination_and_process_contract() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "report.md", SCENARIO_1);
    let bin = fake_renderer(&dir, "chrome", WRITES_PDF);

    let output = convert(&src, None, &config_with_renderer(&bin))
        .await
        .expect("conversion should succeed");

    assert_eq!(output.paths.pdf, dir.path().join("report.pdf"));
    assert_eq!(output.paths.html, dir.path().join("report.html"));
    assert_eq!(output.title, "report");
    assert_eq!(output.renderer.exit_code, Some(0));
    assert_eq!(output.renderer.binary, bin);
    assert!(output.stats.pdf_bytes > 0);
    assert_eq!(output.stats.pdf_bytes, output.renderer.pdf_bytes);
    assert!(dir.path().join("report.html").exists(), "HTML is kept on success");

    let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[0], "--headless");
    assert_eq!(args[1], "--disable-gpu");
    assert!(args[2].starts_with("--print-to-pdf=/"), "pdf path must be absolute");
    assert!(args[2].ends_with("report.pdf"));
    assert_eq!(Path::new(args[3]), output.renderer.html.as_path());
    assert!(Path::new(args[3]).is_absolute());
}

#[cfg(unix)]
#[tokio::test]
async fn explicit_destination_and_extra_args() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "in.md", "hello\n");
    let bin = fake_renderer(&dir, "chrome", WRITES_PDF);
    let dest = dir.path().join("out.pdf");
    let config = ConversionConfig::builder()
        .renderer_paths([bin])
        .renderer_arg("--no-sandbox")
        .build()
        .unwrap();

    let output = convert(&src, Some(&dest), &config).await.unwrap();

    assert_eq!(output.paths.pdf, dest);
    assert!(dest.exists());
    assert!(!dir.path().join("in.pdf").exists());
    let args = std::fs::read_to_string(dir.path().join("args.txt")).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[2], "--no-sandbox");
    assert_eq!(args.len(), 5);
}

#[cfg(unix)]
#[tokio::test]
async fn first_existing_renderer_wins() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "a.md", "x\n");
    let good = fake_renderer(&dir, "chromium", WRITES_PDF);
    let config = ConversionConfig::builder()
        .renderer_paths([dir.path().join("google-chrome"), good.clone()])
        .build()
        .unwrap();

    let output = convert(&src, None, &config).await.unwrap();
    assert_eq!(output.renderer.binary, good);
}

#[cfg(unix)]
#[tokio::test]
async fn clean_exit_without_pdf_is_no_output() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "doc.md", SCENARIO_1);
    let bin = fake_renderer(&dir, "chrome", EXITS_CLEAN_NO_PDF);

    let err = convert(&src, None, &config_with_renderer(&bin))
        .await
        .unwrap_err();

    assert!(
        matches!(err, Md2PdfError::RendererProducedNoOutput { .. }),
        "got {err:?}"
    );
    assert!(dir.path().join("doc.html").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn non_zero_exit_carries_stderr() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "doc.md", SCENARIO_1);
    let bin = fake_renderer(&dir, "chrome", FAILS);

    let err = convert(&src, None, &config_with_renderer(&bin))
        .await
        .unwrap_err();

    match err {
        Md2PdfError::RendererProcessFailed { code, stderr, .. } => {
            assert_eq!(code, Some(3));
            assert!(stderr.contains("GPU process crashed"), "got: {stderr}");
        }
        other => panic!("expected RendererProcessFailed, got {other:?}"),
    }
    assert!(dir.path().join("doc.html").exists(), "HTML is kept on failure");
}

#[cfg(unix)]
#[tokio::test]
async fn hung_renderer_times_out() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "doc.md", "x\n");
    let bin = fake_renderer(&dir, "chrome", HANGS);
    let config = ConversionConfig::builder()
        .renderer_paths([bin])
        .renderer_timeout_secs(1)
        .build()
        .unwrap();

    let err = convert(&src, None, &config).await.unwrap_err();
    assert!(matches!(err, Md2PdfError::RendererTimeout { secs: 1 }), "got {err:?}");
}

#[cfg(unix)]
#[tokio::test]
async fn progress_events_follow_stage_order() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "doc.md", SCENARIO_1);
    let bin = fake_renderer(&dir, "chrome", WRITES_PDF);
    let recorder = Arc::new(Recorder::default());
    let config = ConversionConfig::builder()
        .renderer_paths([bin])
        .progress_callback(recorder.clone() as Arc<dyn ConversionProgressCallback>)
        .build()
        .unwrap();

    convert(&src, None, &config).await.unwrap();

    let events = recorder.events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            "start read",
            "done read",
            "start normalize",
            "done normalize",
            "start compose",
            "done compose",
            "start write html",
            "done write html",
            "start render",
            "done render",
            "complete",
        ]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn progress_reports_failing_stage() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "doc.md", "x\n");
    let bin = fake_renderer(&dir, "chrome", FAILS);
    let recorder = Arc::new(Recorder::default());
    let config = ConversionConfig::builder()
        .normalize_lists(false)
        .renderer_paths([bin])
        .progress_callback(recorder.clone() as Arc<dyn ConversionProgressCallback>)
        .build()
        .unwrap();

    convert(&src, None, &config).await.unwrap_err();

    let events = recorder.events.lock().unwrap();
    assert!(!events.iter().any(|e| e.contains("normalize")));
    assert_eq!(events.last().map(String::as_str), Some("fail render"));
    assert!(!events.iter().any(|e| e == "complete"));
}

#[cfg(unix)]
#[tokio::test]
async fn in_memory_markdown_leaves_no_html_behind() {
    let dir = TempDir::new().unwrap();
    let bin = fake_renderer(&dir, "chrome", WRITES_PDF);
    let dest = dir.path().join("memo.pdf");

    let output = convert_markdown("# Memo\n", "Memo", &dest, &config_with_renderer(&bin))
        .await
        .unwrap();

    assert!(dest.exists());
    assert_eq!(output.title, "Memo");
    assert!(!output.paths.html.exists(), "temporary HTML must be cleaned up");
}

#[cfg(unix)]
#[tokio::test]
async fn in_memory_title_reaches_the_document() {
    let dir = TempDir::new().unwrap();
    let bin = fake_renderer(&dir, "chrome", KEEPS_HTML);
    let dest = dir.path().join("q3.pdf");
    let title = "Q3: a/b results";

    let output = convert_markdown("# Memo\n", title, &dest, &config_with_renderer(&bin))
        .await
        .unwrap();

    assert_eq!(output.title, title);
    let html = std::fs::read_to_string(dir.path().join("seen.html")).unwrap();
    assert!(html.contains("<title>Q3: a/b results</title>"), "got: {html}");
}

#[cfg(unix)]
#[test]
fn sync_wrapper_runs_outside_a_runtime() {
    let dir = TempDir::new().unwrap();
    let src = write_source(&dir, "sync.md", "text\n");
    let bin = fake_renderer(&dir, "chrome", WRITES_PDF);

    let output = convert_sync(&src, None, &config_with_renderer(&bin)).unwrap();
    assert!(output.paths.pdf.exists());
}

// ── Live browser (E2E_ENABLED) ───────────────────────────────────────────────

#[tokio::test]
async fn live_chrome_produces_pdf() {
    if std::env::var("E2E_ENABLED").is_err() {
        println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
        return;
    }
    let dir = TempDir::new().unwrap();
    let src = write_source(
        &dir,
        "live.md",
        "# Live\n\nIntro\n- a\n- b\n\n| A | B |\n|---|---|\n| 1 | 2 |\n",
    );
    let config = ConversionConfig::builder()
        .renderer_arg("--no-sandbox")
        .renderer_timeout_secs(60)
        .build()
        .unwrap();

    let output = convert(&src, None, &config)
        .await
        .expect("live conversion should succeed");

    let bytes = std::fs::read(&output.paths.pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF"), "output is not a PDF");
    println!(
        "[live] {} bytes via {} in {}ms",
        bytes.len(),
        output.renderer.binary.display(),
        output.stats.total_duration_ms
    );
}

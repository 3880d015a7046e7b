//! PDF rendering: print the HTML file with a headless Chrome/Chromium.
//!
//! ## Process contract
//!
//! ```text
//! <browser> --headless --disable-gpu [extra…] --print-to-pdf=<abs pdf> <abs html>
//! ```
//!
//! Success means exit code 0 *and* a non-empty PDF at the destination.
//! Chrome happily exits 0 after failing to write, so the file check is not
//! optional.
//!
//! The binary is looked up before anything is spawned; an empty search list
//! or a list of missing paths fails with `RendererNotFound` without running
//! a process. There are no retries.

use crate::config::ConversionConfig;
use crate::error::Md2PdfError;
use crate::output::RendererInvocation;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Flags always passed to the browser, before any caller extras.
pub const BASE_ARGS: &[&str] = &["--headless", "--disable-gpu"];

/// Find the browser binary from `config.renderer_paths`.
pub fn locate_renderer(config: &ConversionConfig) -> Result<PathBuf, Md2PdfError> {
    let binary = chrome_locate::locate(&config.renderer_paths)?;
    debug!("Using renderer {}", binary.display());
    Ok(binary)
}

/// Build the argument list for one invocation. Both paths must be absolute.
pub fn build_args(html_abs: &Path, pdf_abs: &Path, extra: &[String]) -> Vec<String> {
    let mut args: Vec<String> = BASE_ARGS.iter().map(|s| s.to_string()).collect();
    args.extend(extra.iter().cloned());
    args.push(format!("--print-to-pdf={}", pdf_abs.display()));
    args.push(html_abs.display().to_string());
    args
}

/// Render `html` to `pdf` and verify the output exists.
///
/// Blocks (asynchronously) until the browser exits or the optional timeout
/// fires, in which case the child is killed.
pub async fn render_pdf(
    html: &Path,
    pdf: &Path,
    config: &ConversionConfig,
) -> Result<RendererInvocation, Md2PdfError> {
    let binary = locate_renderer(config)?;

    let html_abs = absolute(html)?;
    let pdf_abs = absolute(pdf)?;
    let args = build_args(&html_abs, &pdf_abs, &config.renderer_args);
    debug!("Running {} {:?}", binary.display(), args);

    let mut cmd = Command::new(&binary);
    cmd.args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let start = Instant::now();
    let child = cmd.spawn().map_err(|e| Md2PdfError::RendererSpawnFailed {
        binary: binary.clone(),
        source: e,
    })?;

    let output = match config.renderer_timeout_secs {
        Some(secs) => {
            // Dropping the wait future drops the child, and kill_on_drop
            // terminates it.
            match tokio::time::timeout(Duration::from_secs(secs), child.wait_with_output()).await {
                Ok(res) => res,
                Err(_) => {
                    warn!("Renderer exceeded {}s, killed", secs);
                    return Err(Md2PdfError::RendererTimeout { secs });
                }
            }
        }
        None => child.wait_with_output().await,
    }
    .map_err(|e| Md2PdfError::Internal(format!("Failed to wait for renderer: {e}")))?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code();

    if !output.status.success() {
        return Err(Md2PdfError::RendererProcessFailed {
            binary,
            code: exit_code,
            stderr: stderr.trim().to_string(),
        });
    }

    let pdf_bytes = match tokio::fs::metadata(&pdf_abs).await {
        Ok(meta) if meta.is_file() && meta.len() > 0 => meta.len(),
        _ => {
            return Err(Md2PdfError::RendererProducedNoOutput { path: pdf_abs });
        }
    };

    info!(
        "PDF generated: {} ({:.1} KB) in {}ms",
        pdf_abs.display(),
        pdf_bytes as f64 / 1024.0,
        elapsed_ms
    );

    Ok(RendererInvocation {
        binary,
        html: html_abs,
        pdf: pdf_abs,
        exit_code,
        stderr,
        elapsed_ms,
        pdf_bytes,
    })
}

fn absolute(path: &Path) -> Result<PathBuf, Md2PdfError> {
    std::path::absolute(path).map_err(|e| {
        Md2PdfError::Internal(format!("Cannot resolve '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_follow_process_contract() {
        let args = build_args(
            Path::new("/tmp/doc.html"),
            Path::new("/tmp/doc.pdf"),
            &["--no-sandbox".to_string()],
        );
        assert_eq!(
            args,
            vec![
                "--headless",
                "--disable-gpu",
                "--no-sandbox",
                "--print-to-pdf=/tmp/doc.pdf",
                "/tmp/doc.html",
            ]
        );
    }

    #[test]
    fn html_path_is_last_positional() {
        let args = build_args(Path::new("/a b/x.html"), Path::new("/o.pdf"), &[]);
        assert_eq!(args.last().unwrap(), "/a b/x.html");
        assert_eq!(args.len(), 4);
    }

    #[tokio::test]
    async fn missing_renderer_fails_before_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConversionConfig::builder()
            .renderer_paths([dir.path().join("no-chrome"), dir.path().join("no-chromium")])
            .build()
            .unwrap();

        let err = render_pdf(
            &dir.path().join("in.html"),
            &dir.path().join("out.pdf"),
            &config,
        )
        .await
        .unwrap_err();

        match err {
            Md2PdfError::RendererNotFound { source } => {
                let chrome_locate::LocateError::NotFound { searched } = source;
                assert_eq!(searched.len(), 2);
            }
            other => panic!("expected RendererNotFound, got {other:?}"),
        }
        assert!(!dir.path().join("out.pdf").exists());
    }

    #[test]
    fn absolute_keeps_absolute_paths() {
        let p = absolute(Path::new("/already/abs.pdf")).unwrap();
        assert_eq!(p, PathBuf::from("/already/abs.pdf"));
        assert!(absolute(Path::new("rel.pdf")).unwrap().is_absolute());
    }
}

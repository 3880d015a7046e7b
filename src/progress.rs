//! Progress-callback trait for per-stage conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline moves through its stages. The CLI uses this to
//! drive a spinner while the browser is printing, which is the only step
//! that takes noticeable time.
//!
//! # Example
//!
//! ```rust
//! use md2pdf::{ConversionConfig, ConversionProgressCallback, Stage};
//! use std::sync::Arc;
//!
//! struct Logger;
//!
//! impl ConversionProgressCallback for Logger {
//!     fn on_stage_complete(&self, stage: Stage, elapsed_ms: u64) {
//!         eprintln!("{stage} done in {elapsed_ms}ms");
//!     }
//! }
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(Arc::new(Logger) as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// One step of the conversion pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Reading the markdown source.
    Read,
    /// Inserting blank lines before list blocks.
    Normalize,
    /// Markdown → HTML fragment → full document.
    Compose,
    /// Writing the intermediate HTML file.
    WriteHtml,
    /// Running the headless browser.
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Read => "read",
            Stage::Normalize => "normalize",
            Stage::Compose => "compose",
            Stage::WriteHtml => "write html",
            Stage::Render => "render",
        };
        f.write_str(s)
    }
}

/// Called by the conversion pipeline as it enters and leaves each stage.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Implementations must be `Send + Sync` so a config
/// can be shared across threads.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called when a stage begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a stage finishes successfully.
    fn on_stage_complete(&self, stage: Stage, elapsed_ms: u64) {
        let _ = (stage, elapsed_ms);
    }

    /// Called once when the conversion aborts at `stage`.
    fn on_conversion_failed(&self, stage: Stage, error: &str) {
        let _ = (stage, error);
    }

    /// Called once after the PDF has been verified on disk.
    ///
    /// # Arguments
    /// * `pdf_bytes` — size of the produced PDF
    /// * `total_ms`  — wall-clock time for the whole conversion
    fn on_conversion_complete(&self, pdf_bytes: u64, total_ms: u64) {
        let _ = (pdf_bytes, total_ms);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

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
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_stage_start(Stage::Read);
        cb.on_stage_complete(Stage::Read, 1);
        cb.on_conversion_failed(Stage::Render, "boom");
        cb.on_conversion_complete(1024, 10);
    }

    #[test]
    fn recorder_sees_events_in_order() {
        let rec = Recorder::default();
        rec.on_stage_start(Stage::Compose);
        rec.on_stage_complete(Stage::Compose, 3);
        rec.on_stage_start(Stage::Render);
        rec.on_conversion_failed(Stage::Render, "exit 1");

        let events = rec.events.lock().unwrap();
        assert_eq!(
            *events,
            vec!["start compose", "done compose", "start render", "fail render"]
        );
    }

    #[test]
    fn stage_display_names() {
        assert_eq!(Stage::WriteHtml.to_string(), "write html");
        assert_eq!(Stage::Render.to_string(), "render");
    }
}

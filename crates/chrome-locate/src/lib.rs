//! # chrome-locate
//!
//! Find an installed Chrome or Chromium binary that can run headless, so
//! callers can print HTML to PDF without asking users where their browser
//! lives.
//!
//! ## How it works
//!
//! [`default_candidates`] builds an ordered list of paths:
//!
//! 1. `CHROME_PATH`, when set to a non-empty value.
//! 2. The well-known install locations in [`WELL_KNOWN_PATHS`].
//!
//! [`locate`] walks any candidate list in order and returns the first path
//! that exists on disk. Nothing is executed; probing is a plain filesystem
//! check, so a failed lookup never spawns a process.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrome_locate::{default_candidates, locate};
//!
//! let candidates = default_candidates();
//! match locate(&candidates) {
//!     Ok(path) => println!("using {}", path.display()),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! ## Install locations
//!
//! | OS      | Path |
//! |---------|------|
//! | macOS   | `/Applications/Google Chrome.app/Contents/MacOS/Google Chrome` |
//! | Linux   | `/usr/bin/google-chrome` |
//! | Linux   | `/usr/bin/chromium-browser` |
//! | Linux   | `/usr/bin/chromium` |
//!
//! ## Environment variable overrides
//!
//! - `CHROME_PATH` — path to a browser binary; probed before the built-in list.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;

// ── Public constants ─────────────────────────────────────────────────────────

/// Environment variable holding an explicit browser binary path.
pub const CHROME_PATH_ENV: &str = "CHROME_PATH";

/// Well-known install locations, probed in this order.
pub const WELL_KNOWN_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/usr/bin/google-chrome",
    "/usr/bin/chromium-browser",
    "/usr/bin/chromium",
];

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned by chrome-locate operations.
#[derive(Error, Debug)]
pub enum LocateError {
    /// None of the candidate paths exist.
    #[error("Chrome/Chromium not found. Searched:\n{}", format_searched(.searched))]
    NotFound { searched: Vec<PathBuf> },
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "  (no candidate paths configured)".to_string();
    }
    let mut out = String::new();
    for (i, p) in searched.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "  • {}", p.display());
    }
    out
}

// ── Public API ───────────────────────────────────────────────────────────────

/// Returns the well-known install locations as owned paths.
pub fn well_known_paths() -> Vec<PathBuf> {
    WELL_KNOWN_PATHS.iter().map(PathBuf::from).collect()
}

/// Returns the path named by `CHROME_PATH`, if set and non-empty.
///
/// The path is returned whether or not it exists; [`locate`] decides that.
pub fn env_override() -> Option<PathBuf> {
    match std::env::var_os(CHROME_PATH_ENV) {
        Some(v) if !v.is_empty() => Some(PathBuf::from(v)),
        _ => None,
    }
}

/// The default ordered candidate list: `CHROME_PATH` first, then
/// [`WELL_KNOWN_PATHS`].
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(WELL_KNOWN_PATHS.len() + 1);
    if let Some(p) = env_override() {
        candidates.push(p);
    }
    candidates.extend(well_known_paths());
    candidates
}

/// Returns the first candidate that exists on disk.
///
/// # Errors
///
/// [`LocateError::NotFound`] carrying the full candidate list when none exist.
pub fn locate<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf, LocateError> {
    candidates
        .iter()
        .map(AsRef::as_ref)
        .find(|p| p.exists())
        .map(Path::to_path_buf)
        .ok_or_else(|| LocateError::NotFound {
            searched: candidates.iter().map(|p| p.as_ref().to_path_buf()).collect(),
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn well_known_paths_keep_order() {
        let paths = well_known_paths();
        assert_eq!(paths.len(), 4);
        assert!(paths[0].to_str().unwrap().contains("Google Chrome.app"));
        assert_eq!(paths[3], PathBuf::from("/usr/bin/chromium"));
    }

    #[test]
    fn locate_returns_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let second = dir.path().join("chromium");
        let third = dir.path().join("chrome");
        fs::write(&second, b"").unwrap();
        fs::write(&third, b"").unwrap();

        let candidates = vec![dir.path().join("missing"), second.clone(), third];
        assert_eq!(locate(&candidates).unwrap(), second);
    }

    #[test]
    fn locate_reports_every_searched_path() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = vec![dir.path().join("a"), dir.path().join("b")];

        let err = locate(&candidates).unwrap_err();
        let LocateError::NotFound { searched } = &err;
        assert_eq!(searched, &candidates);
        let msg = err.to_string();
        assert!(msg.contains("not found"), "got: {msg}");
        assert!(msg.contains(&dir.path().join("b").display().to_string()));
    }

    #[test]
    fn locate_with_no_candidates() {
        let empty: Vec<PathBuf> = Vec::new();
        let err = locate(&empty).unwrap_err();
        assert!(err.to_string().contains("no candidate paths"));
    }

    #[test]
    fn env_override_is_probed_first() {
        std::env::set_var(CHROME_PATH_ENV, "/opt/custom/chrome");
        let candidates = default_candidates();
        std::env::remove_var(CHROME_PATH_ENV);

        assert_eq!(candidates[0], PathBuf::from("/opt/custom/chrome"));
        assert_eq!(candidates.len(), WELL_KNOWN_PATHS.len() + 1);
    }
}

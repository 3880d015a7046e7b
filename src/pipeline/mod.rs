//! Pipeline stages for Markdown-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step, so each is
//! testable on its own and the markdown parser or the browser can be swapped
//! without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! source ──▶ normalize ──▶ markdown ──▶ compose ──▶ render
//! (read .md)  (blank lines)  (fragment)   (document)   (headless Chrome)
//! ```
//!
//! 1. [`source`]    — validate the path and read the markdown once
//! 2. [`normalize`] — optional blank-line insertion before list blocks
//! 3. [`markdown`]  — markdown → HTML fragment via a [`markdown::MarkdownRenderer`]
//! 4. [`compose`]   — wrap the fragment in the document template + stylesheet
//! 5. [`render`]    — locate the browser, print HTML to PDF, verify the file;
//!    the only stage that spawns a process

pub mod compose;
pub mod markdown;
pub mod normalize;
pub mod render;
pub mod source;

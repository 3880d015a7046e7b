//! HTML composition: wrap a rendered fragment in a standalone document.
//!
//! The composer is pure string work. It trusts the fragment produced by the
//! markdown renderer and does not sanitise it; only the title, which comes
//! from a filename, is escaped.

use crate::config::{ConversionConfig, StylesheetPreset};
use crate::error::Md2PdfError;
use crate::pipeline::markdown::MarkdownRenderer;

/// Build the full HTML document around `fragment`.
pub fn compose_html(
    fragment: &str,
    title: &str,
    stylesheet: StylesheetPreset,
    custom_css: Option<&str>,
) -> String {
    let css = stylesheet.css();
    let extra = custom_css.unwrap_or("");
    let mut doc = String::with_capacity(fragment.len() + css.len() + extra.len() + 256);

    doc.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    doc.push_str("    <meta charset=\"utf-8\">\n");
    doc.push_str("    <title>");
    doc.push_str(&escape_text(title));
    doc.push_str("</title>\n");
    doc.push_str("    <style>");
    doc.push_str(css);
    if !extra.is_empty() {
        doc.push_str("\n        /* Custom */\n");
        doc.push_str(extra);
        doc.push('\n');
    }
    doc.push_str("    </style>\n</head>\n<body>\n");
    doc.push_str(fragment);
    if !fragment.ends_with('\n') {
        doc.push('\n');
    }
    doc.push_str("</body>\n</html>\n");
    doc
}

/// Render `markdown` with `renderer` and compose the document per `config`.
///
/// Normalisation is not applied here; callers pass already-normalised text.
pub fn compose_document(
    renderer: &dyn MarkdownRenderer,
    markdown: &str,
    title: &str,
    config: &ConversionConfig,
) -> Result<String, Md2PdfError> {
    let fragment = renderer.render(markdown, config.extensions)?;
    Ok(compose_html(
        &fragment,
        title,
        config.stylesheet,
        config.custom_css.as_deref(),
    ))
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

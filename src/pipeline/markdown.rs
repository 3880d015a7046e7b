//! Markdown → HTML fragment, behind a trait so the parser can be swapped.
//!
//! The default [`PulldownRenderer`] wraps `pulldown-cmark`. The extension
//! preset picks the parser options; the `Rich` preset additionally rewrites
//! soft breaks into hard breaks so a single newline inside a paragraph
//! becomes `<br />`.

use crate::config::ExtensionPreset;
use crate::error::Md2PdfError;
use pulldown_cmark::{html, Event, Parser};

/// Anything that can turn markdown text into an HTML fragment.
pub trait MarkdownRenderer: Send + Sync {
    /// Render `markdown` with the feature set named by `preset`.
    ///
    /// Errors propagate unchanged to the caller of `convert`.
    fn render(&self, markdown: &str, preset: ExtensionPreset) -> Result<String, Md2PdfError>;
}

/// `pulldown-cmark` backed renderer (CommonMark + preset extensions).
#[derive(Debug, Clone, Copy, Default)]
pub struct PulldownRenderer;

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str, preset: ExtensionPreset) -> Result<String, Md2PdfError> {
        let parser = Parser::new_ext(markdown, preset.options());
        let hard_breaks = preset.hard_line_breaks();
        let events = parser.map(|event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            other => other,
        });

        let mut fragment = String::with_capacity(markdown.len() * 3 / 2);
        html::write_html_fmt(&mut fragment, events).map_err(|e| {
            Md2PdfError::MarkdownRenderFailed {
                detail: e.to_string(),
            }
        })?;
        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str, preset: ExtensionPreset) -> String {
        PulldownRenderer.render(md, preset).unwrap()
    }

    #[test]
    fn heading_paragraph_and_list() {
        let html = render(
            "# Title\n\nSome text\n\n- item one\n- item two\n",
            ExtensionPreset::Rich,
        );
        assert!(html.contains("<h1>Title</h1>"), "got: {html}");
        assert!(html.contains("<p>Some text</p>"));
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 2);
    }

    #[test]
    fn tables_in_both_presets() {
        let md = "| A | B |\n|---|---|\n| 1 | 2 |\n";
        for preset in [ExtensionPreset::Rich, ExtensionPreset::Minimal] {
            let html = render(md, preset);
            assert!(html.contains("<table>"), "{preset:?}: {html}");
            assert!(html.contains("<td>2</td>"));
        }
    }

    #[test]
    fn fenced_code_in_both_presets() {
        let md = "```rust\nfn main() {}\n```\n";
        for preset in [ExtensionPreset::Rich, ExtensionPreset::Minimal] {
            let html = render(md, preset);
            assert!(html.contains("<pre><code class=\"language-rust\">"), "{html}");
        }
    }

    #[test]
    fn rich_turns_newlines_into_breaks() {
        let html = render("line one\nline two\n", ExtensionPreset::Rich);
        assert!(html.contains("line one<br />"), "got: {html}");
    }

    #[test]
    fn minimal_keeps_soft_breaks() {
        let html = render("line one\nline two\n", ExtensionPreset::Minimal);
        assert!(!html.contains("<br"), "got: {html}");
    }

    #[test]
    fn strikethrough_only_in_rich() {
        assert!(render("~~gone~~", ExtensionPreset::Rich).contains("<del>gone</del>"));
        assert!(!render("~~gone~~", ExtensionPreset::Minimal).contains("<del>"));
    }

    #[test]
    fn footnotes_only_in_rich() {
        let md = "Claim[^1]\n\n[^1]: Source\n";
        assert!(render(md, ExtensionPreset::Rich).contains("footnote"));
        assert!(!render(md, ExtensionPreset::Minimal).contains("footnote-definition"));
    }

    #[test]
    fn output_is_deterministic() {
        let md = "# A\n\ntext *em* **strong**\n\n> quote\n";
        assert_eq!(
            render(md, ExtensionPreset::Rich),
            render(md, ExtensionPreset::Rich)
        );
    }
}

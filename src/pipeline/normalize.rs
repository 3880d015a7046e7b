//! List normalisation: make sure every list block starts after a blank line.
//!
//! ```text
//! Some text            Some text
//! - item one     ──▶
//! - item two           - item one
//!                      - item two
//! ```
//!
//! Only the line directly above a list item is inspected. Lines are split on
//! `\n` and re-joined with `\n`, so apart from the inserted empty lines the
//! output is byte-identical to the input.

use once_cell::sync::Lazy;
use regex::Regex;

// A list item may be indented.
static RE_UNORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*+]\s").unwrap());
static RE_ORDERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.\s").unwrap());

// Applied to the trimmed previous line.
static RE_UNORDERED_PREV: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*+]\s").unwrap());
static RE_ORDERED_PREV: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s").unwrap());

/// Result of [`normalize_lists_counted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    /// Number of blank lines inserted.
    pub inserted: usize,
}

/// Insert a blank line before each list item whose preceding line is
/// non-blank and not itself a list item.
pub fn normalize_lists(input: &str) -> String {
    normalize_lists_counted(input).text
}

/// [`normalize_lists`], also reporting how many lines were inserted.
pub fn normalize_lists_counted(input: &str) -> Normalized {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut result: Vec<&str> = Vec::with_capacity(lines.len() + 8);
    let mut inserted = 0;

    for (i, line) in lines.iter().enumerate() {
        if i > 0 && is_list_item(line) {
            let prev = lines[i - 1].trim();
            if !prev.is_empty() && !is_list_item_trimmed(prev) {
                result.push("");
                inserted += 1;
            }
        }
        result.push(line);
    }

    Normalized {
        text: result.join("\n"),
        inserted,
    }
}

/// True if `line` opens an unordered (`-`, `*`, `+`) or ordered (`1.`) item.
pub fn is_list_item(line: &str) -> bool {
    RE_UNORDERED_ITEM.is_match(line) || RE_ORDERED_ITEM.is_match(line)
}

fn is_list_item_trimmed(line: &str) -> bool {
    RE_UNORDERED_PREV.is_match(line) || RE_ORDERED_PREV.is_match(line)
}

//! Inline markup stripping for plain-text blocks.
//!
//! PDF output has no inline styling, so emphasis, code spans and links are
//! reduced to their text. Each pattern runs once, in order, over the output
//! of the previous one.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap());
static HASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#+\s*").unwrap());

/// Strip inline markdown markup, leaving plain text.
///
/// Applied to paragraphs, list items and blockquotes. Code blocks are never
/// stripped.
///
/// # Examples
///
/// ```
/// use mdpdf_renderer::strip_inline_markup;
///
/// assert_eq!(strip_inline_markup("**bold** and *it*"), "bold and it");
/// assert_eq!(strip_inline_markup("see [docs](https://x.io)"), "see docs");
/// ```
#[must_use]
pub fn strip_inline_markup(text: &str) -> String {
    let text = BOLD_RE.replace_all(text, "$1");
    let text = ITALIC_RE.replace_all(&text, "$1");
    let text = CODE_RE.replace_all(&text, "$1");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = HASHES_RE.replace_all(&text, "");
    text.trim().to_owned()
}

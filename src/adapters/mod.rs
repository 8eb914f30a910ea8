//! Remote lookup adapters.
//!
//! Each adapter is a fetch-and-parse strategy with its own fallback chain.
//! Parsing lives in pure functions over raw markup or JSON so it can be
//! tested without a network; the `lookup` functions take a [`Fetcher`]
//! and never return an error for a failed source. They degrade to the next
//! source or to a fixed user-facing string instead.
//!
//! [`Fetcher`]: crate::fetch::Fetcher

pub mod fact_check;
pub mod government;
pub mod president;
pub mod summary;
pub mod web;

use std::sync::LazyLock;

use regex::Regex;

/// Reply meaning "no confident answer". Not an error.
pub const NOT_FOUND: &str =
    "Não encontrei informações precisas sobre isso. Poderia reformular ou ser mais específico?";

/// Prefix that identifies [`NOT_FOUND`] inside a longer reply.
pub const NOT_FOUND_MARKER: &str = "Não encontrei informações precisas sobre isso";

/// Reply when the web search relay itself cannot be reached.
pub const SOURCES_UNAVAILABLE: &str =
    "Não consegui acessar minhas fontes no momento. Tente novamente mais tarde.";

/// Whether an adapter reply carries the not-found sentinel.
pub fn is_not_found(reply: &str) -> bool {
    reply.contains(NOT_FOUND_MARKER)
}

// ── Markup helpers ──────────────────────────────────────────────────────

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_CITATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());

/// Replace every whitespace run with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Remove bracketed citation marks like `[1]` or `[nota 2]`.
pub fn strip_citations(text: &str) -> String {
    RE_CITATION.replace_all(text, "").into_owned()
}

/// Remove anything that looks like a tag. Deliberately naive: a tag split
/// across lines survives, as does a lone `<`.
pub fn strip_tags(text: &str) -> String {
    RE_TAG.replace_all(text, "").into_owned()
}

/// Up to `len` characters of `text` starting at byte offset `start`. An
/// offset inside a character moves back to that character's start.
pub(crate) fn char_window(text: &str, start: usize, len: usize) -> &str {
    let mut start = start.min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let tail = &text[start..];
    match tail.char_indices().nth(len) {
        Some((end, _)) => &tail[..end],
        None => tail,
    }
}

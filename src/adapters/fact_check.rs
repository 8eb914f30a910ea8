//! Fact checking: look the claim up in the encyclopedia.
//!
//! "É verdade que Brasília é a capital?" is reduced to the claim
//! "Brasília é a capital" by dropping the fact-check verbs and a few
//! leading filler words, then handed to the summary adapter.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::SourcesConfig;
use crate::fetch::Fetcher;

use super::{NOT_FOUND, collapse_whitespace, summary};

// Whole words only: "verdadeiro" or "fatorial" are part of the claim.
static RE_CHECK_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:verdade|verificar|confirmar|checar|fato)\b").unwrap()
});

const LEADING_FILLER: &[&str] = &["é", "e", "que", "se", "isso", "isto", "pode", "poderia", "o", "a"];

/// The claim being checked, or an empty string if nothing is left.
pub fn claim_of(question: &str) -> String {
    let lower = question.to_lowercase();
    let stripped = RE_CHECK_VERB.replace_all(&lower, " ");
    let stripped = collapse_whitespace(&stripped);
    let words: Vec<&str> = stripped
        .split(' ')
        .map(|w| w.trim_matches(|c: char| c.is_ascii_punctuation() || c == '¿'))
        .filter(|w| !w.is_empty())
        .skip_while(|w| LEADING_FILLER.contains(w))
        .collect();
    words.join(" ")
}

/// Check a claim. Never fails.
pub fn lookup(fetcher: &dyn Fetcher, sources: &SourcesConfig, question: &str) -> String {
    let claim = claim_of(question);
    if claim.is_empty() {
        tracing::debug!(question, "fact check with no claim left");
        return NOT_FOUND.to_string();
    }
    summary::lookup(fetcher, sources, &claim)
}

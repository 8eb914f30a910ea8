//! Generic web search through a CORS relay.
//!
//! The relay fetches a search results page and hands it back wrapped as
//! `{"contents": "<html>..."}`. The raw markup is scanned for a fixed
//! keyword and a window of text after it becomes the answer.

use serde::Deserialize;

use crate::config::SourcesConfig;
use crate::error::FetchError;
use crate::fetch::Fetcher;

use super::{NOT_FOUND, SOURCES_UNAVAILABLE, char_window, strip_tags};

#[derive(Debug, Deserialize)]
struct RelayResponse {
    contents: Option<String>,
}

/// Relay URL for a site-restricted search of `question`.
pub fn search_url(sources: &SourcesConfig, question: &str) -> String {
    let target = format!(
        "{}?q={}+{}",
        sources.search_engine,
        urlencoding::encode(question),
        sources.search_site_filter
    );
    format!(
        "{}?url={}",
        sources.search_relay,
        urlencoding::encode(&target)
    )
}

/// Snippet following the first `keyword` occurrence, tags stripped.
pub fn extract_snippet(html: &str, keyword: &str, window: usize) -> Option<String> {
    let start = html.find(keyword)?;
    let snippet = strip_tags(char_window(html, start, window));
    Some(format!("{snippet}... (Fonte: sites oficiais)"))
}

/// Answer from a results page, or exactly [`NOT_FOUND`].
pub fn answer_from_markup(html: &str, sources: &SourcesConfig) -> String {
    extract_snippet(html, &sources.web_keyword, sources.web_snippet_chars)
        .unwrap_or_else(|| NOT_FOUND.to_string())
}

fn fetch_contents(fetcher: &dyn Fetcher, url: &str) -> Result<String, FetchError> {
    let body = fetcher.get_text(url)?;
    let relay: RelayResponse = serde_json::from_str(&body).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    relay.contents.ok_or_else(|| FetchError::Parse {
        url: url.to_string(),
        message: "relay returned no contents".into(),
    })
}

/// Search the web. Never fails.
pub fn lookup(fetcher: &dyn Fetcher, sources: &SourcesConfig, question: &str) -> String {
    let url = search_url(sources, question);
    match fetch_contents(fetcher, &url) {
        Ok(html) => answer_from_markup(&html, sources),
        Err(e) => {
            tracing::warn!(error = %e, "web search failed");
            SOURCES_UNAVAILABLE.to_string()
        }
    }
}

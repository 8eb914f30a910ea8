//! Encyclopedia summary lookup via the MediaWiki query API.
//!
//! The raw question is used as the page title. A hit yields the first line
//! of the page's plain-text intro; a miss hands over to the web adapter.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::SourcesConfig;
use crate::error::{FetchError, FetchResult};
use crate::fetch::Fetcher;

use super::{NOT_FOUND, web};

/// Page id the API uses for "no such page".
const MISSING_PAGE_ID: &str = "-1";

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: QueryPages,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    pages: BTreeMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    extract: Option<String>,
}

/// Query URL for an intro extract of the page titled `question`.
pub fn summary_url(sources: &SourcesConfig, question: &str) -> String {
    format!(
        "{}?action=query&format=json&origin=*&prop=extracts&exintro&explaintext&redirects=1&titles={}",
        sources.summary_api,
        urlencoding::encode(question)
    )
}

/// Pull a formatted summary out of an API response.
///
/// `Ok(None)` means the API answered but has no page or no extract. A title
/// containing `|` asks for several pages; the first existing one is used and
/// the missing-page entry only counts when nothing else came back.
pub fn parse_extract(json: &str, budget: usize) -> serde_json::Result<Option<String>> {
    let response: QueryResponse = serde_json::from_str(json)?;
    let Some((_, page)) = response
        .query
        .pages
        .into_iter()
        .find(|(page_id, _)| page_id != MISSING_PAGE_ID)
    else {
        return Ok(None);
    };
    let Some(extract) = page.extract.filter(|e| !e.is_empty()) else {
        return Ok(None);
    };
    let first_line = extract.split('\n').next().unwrap_or_default();
    let truncated: String = first_line.chars().take(budget).collect();
    Ok(Some(format!("{truncated}... (Fonte: Wikipedia)")))
}

fn fetch_summary(
    fetcher: &dyn Fetcher,
    sources: &SourcesConfig,
    question: &str,
) -> FetchResult<Option<String>> {
    let url = summary_url(sources, question);
    let body = fetcher.get_text(&url)?;
    parse_extract(&body, sources.summary_chars).map_err(|e| FetchError::Parse {
        url,
        message: e.to_string(),
    })
}

/// Summary, else web search, else the not-found sentinel. Never fails.
pub fn lookup(fetcher: &dyn Fetcher, sources: &SourcesConfig, question: &str) -> String {
    match fetch_summary(fetcher, sources, question) {
        Ok(Some(summary)) => summary,
        Ok(None) => {
            tracing::debug!(question, "no encyclopedia page, trying web search");
            web::lookup(fetcher, sources, question)
        }
        Err(e) => {
            tracing::warn!(error = %e, "encyclopedia summary lookup failed");
            NOT_FOUND.to_string()
        }
    }
}

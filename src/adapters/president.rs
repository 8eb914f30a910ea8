//! Who is the current president: encyclopedia infobox, then the government
//! portal, then a static answer.

use scraper::{Html, Selector};

use crate::config::SourcesConfig;
use crate::fetch::Fetcher;

use super::{collapse_whitespace, strip_citations};

/// Last-resort answer. Update by hand when it goes stale.
pub const PRESIDENT_FALLBACK: &str =
    "🤵 O Presidente do Brasil atualmente é Luiz Inácio Lula da Silva (desde 1° de janeiro de 2023).";

/// Outcome of a president lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresidentAnswer {
    pub text: String,
    /// False when a source errored and the static answer was used; such
    /// answers are not worth remembering for a day.
    pub cacheable: bool,
}

/// Find the "current holder" row of the first infobox on a rendered page.
///
/// The row is located by the locale marker `Atual`/`atual`. Its text has
/// whitespace runs collapsed and citation marks removed, and the first
/// `Atual` becomes `Atual:`.
pub fn parse_infobox(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let infobox_sel = Selector::parse(".infobox").expect("static selector must parse");
    let row_sel = Selector::parse("tr").expect("static selector must parse");

    let infobox = document.select(&infobox_sel).next()?;
    infobox.select(&row_sel).find_map(|row| {
        let text = row.text().collect::<String>();
        if !text.contains("Atual") && !text.contains("atual") {
            return None;
        }
        let info = strip_citations(&collapse_whitespace(&text));
        let info = info.trim().replacen("Atual", "Atual:", 1);
        Some(format!("🤵 {info}"))
    })
}

/// Read the `.president-name` element of the government portal.
pub fn parse_portal(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let sel = Selector::parse(".president-name").expect("static selector must parse");
    let name = document
        .select(&sel)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();
    if name.is_empty() {
        return None;
    }
    Some(format!(
        "🤵 O Presidente do Brasil atualmente é {name}. (Fonte: Portal Brasil)"
    ))
}

/// Run the source chain. Never fails.
pub fn lookup(fetcher: &dyn Fetcher, sources: &SourcesConfig) -> PresidentAnswer {
    let mut clean = true;

    match fetcher.get_text(&sources.president_page) {
        Ok(html) => {
            if let Some(text) = parse_infobox(&html) {
                return PresidentAnswer {
                    text,
                    cacheable: true,
                };
            }
            tracing::debug!(url = %sources.president_page, "no current-holder row in infobox");
        }
        Err(e) => {
            tracing::warn!(error = %e, "encyclopedia lookup for president failed");
            clean = false;
        }
    }

    match fetcher.get_text(&sources.portal_page) {
        Ok(html) => {
            if let Some(text) = parse_portal(&html) {
                return PresidentAnswer {
                    text,
                    cacheable: true,
                };
            }
            tracing::debug!(url = %sources.portal_page, "no president name on portal");
        }
        Err(e) => {
            tracing::warn!(error = %e, "portal lookup for president failed");
            clean = false;
        }
    }

    PresidentAnswer {
        text: PRESIDENT_FALLBACK.to_string(),
        cacheable: clean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ScriptedFetcher;

    const INFOBOX: &str = r#"
        <html><body>
        <table class="infobox">
            <tr><th>Presidente do Brasil</th></tr>
            <tr><td>Primeiro</td><td>Deodoro da Fonseca</td></tr>
            <tr><td>Atual </td>
                <td>Luiz Inácio   Lula da Silva<sup>[2]</sup>
                desde 1 de janeiro de 2023</td></tr>
        </table>
        </body></html>"#;

    #[test]
    fn infobox_current_row() {
        assert_eq!(
            parse_infobox(INFOBOX).as_deref(),
            Some("🤵 Atual: Luiz Inácio Lula da Silva desde 1 de janeiro de 2023")
        );
    }

    #[test]
    fn infobox_without_marker() {
        let html = r#"<table class="infobox"><tr><td>Primeiro</td></tr></table>"#;
        assert!(parse_infobox(html).is_none());
        assert!(parse_infobox("<p>atual</p>").is_none());
    }

    #[test]
    fn lowercase_marker_matches_without_rewrite() {
        let html = r#"<table class="infobox"><tr><td>mandato atual: Fulano</td></tr></table>"#;
        assert_eq!(
            parse_infobox(html).as_deref(),
            Some("🤵 mandato atual: Fulano")
        );
    }

    #[test]
    fn portal_name() {
        let html = r#"<div><span class="president-name">  Fulano de Tal </span></div>"#;
        assert_eq!(
            parse_portal(html).as_deref(),
            Some("🤵 O Presidente do Brasil atualmente é Fulano de Tal. (Fonte: Portal Brasil)")
        );
        assert!(parse_portal(r#"<span class="president-name"> </span>"#).is_none());
    }

    #[test]
    fn falls_through_to_portal_then_static() {
        let sources = SourcesConfig::default();

        let fetcher = ScriptedFetcher::new()
            .body(sources.president_page.clone(), "<html></html>")
            .body(
                sources.portal_page.clone(),
                r#"<p class="president-name">Fulano</p>"#,
            );
        let answer = lookup(&fetcher, &sources);
        assert!(answer.text.contains("Fulano"));
        assert!(answer.cacheable);

        let fetcher = ScriptedFetcher::new()
            .body(sources.president_page.clone(), "<html></html>")
            .body(sources.portal_page.clone(), "<html></html>");
        let answer = lookup(&fetcher, &sources);
        assert_eq!(answer.text, PRESIDENT_FALLBACK);
        assert!(answer.cacheable);
    }

    #[test]
    fn network_failure_is_static_and_uncached() {
        let answer = lookup(&ScriptedFetcher::new(), &SourcesConfig::default());
        assert_eq!(answer.text, PRESIDENT_FALLBACK);
        assert!(!answer.cacheable);
    }
}

//! End-to-end tests for the answer resolution pipeline.
//!
//! These run the full resolver against scripted remote sources, an
//! in-memory or on-disk answer store and a manual clock.

use std::sync::Arc;
use std::time::Duration;

use resposta::adapters::president::PRESIDENT_FALLBACK;
use resposta::adapters::{NOT_FOUND, SOURCES_UNAVAILABLE};
use resposta::cache::ManualClock;
use resposta::config::{AssistantConfig, SourcesConfig};
use resposta::fetch::{Reply, ScriptedFetcher};
use resposta::record::Record;
use resposta::resolver::{APOLOGY, AnswerSource, Assistant, RETRY, Resolution};
use resposta::store::{AnswerStore, MemStore};

const T0: u64 = 1_735_689_600_000;

const INFOBOX: &str = r#"<html><body><table class="infobox">
    <tr><th>Presidente da República Federativa do Brasil</th></tr>
    <tr><td>Atual </td><td>Luiz Inácio Lula da Silva[1]</td></tr>
</table></body></html>"#;

const SUMMARY_MISS: &str = r#"{"query":{"pages":{"-1":{"missing":""}}}}"#;

fn sources() -> SourcesConfig {
    SourcesConfig::default()
}

fn assistant_with(records: Vec<Record>, fetcher: Arc<ScriptedFetcher>) -> Assistant {
    Assistant::new(
        AssistantConfig::default(),
        Box::new(MemStore::with_records(records)),
        Box::new(fetcher),
    )
}

#[test]
fn first_matching_record_wins() {
    let records = vec![
        Record::new(["como abrir uma conta"], "Vá a uma agência."),
        Record::new(["como abrir uma conta digital"], "Use o aplicativo."),
    ];
    let assistant = assistant_with(records, Arc::new(ScriptedFetcher::new()));

    let answer = assistant.resolve("Abrir CONTA").into_answer();
    assert_eq!(answer.text, "Vá a uma agência.");
    assert_eq!(answer.source, AnswerSource::Store);

    let answer = assistant.resolve("conta digital").into_answer();
    assert_eq!(answer.text, "Use o aplicativo.");
}

#[test]
fn single_common_word_matches_broadly() {
    // Containment, not equality: "o" is inside almost every phrasing.
    let assistant = assistant_with(
        vec![Record::new(["qual o prazo do boleto"], "Três dias úteis.")],
        Arc::new(ScriptedFetcher::new()),
    );
    assert_eq!(assistant.resolve("o").into_answer().text, "Três dias úteis.");
}

#[test]
fn president_is_cached_for_a_day() {
    let fetcher = Arc::new(ScriptedFetcher::new().body(sources().president_page, INFOBOX));
    let clock = Arc::new(ManualClock::at(T0));
    let assistant = assistant_with(vec![], fetcher.clone()).with_clock(clock.clone());

    let expected = "🤵 Atual: Luiz Inácio Lula da Silva";
    let first = assistant.resolve("quem é o atual presidente do brasil").into_answer();
    assert_eq!(first.text, expected);
    assert_eq!(first.source, AnswerSource::President);
    assert_eq!(fetcher.requests().len(), 1);

    clock.set(T0 + 86_399_999);
    assert_eq!(assistant.current_president(), expected);
    assert_eq!(fetcher.requests().len(), 1, "served from cache");

    clock.set(T0 + 86_400_001);
    assert_eq!(assistant.current_president(), expected);
    assert_eq!(fetcher.requests().len(), 2, "expired entry refetched");
}

#[test]
fn president_fallback_after_network_failure_is_not_cached() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let clock = Arc::new(ManualClock::at(T0));
    let assistant = assistant_with(vec![], fetcher.clone()).with_clock(clock.clone());

    assert_eq!(assistant.current_president(), PRESIDENT_FALLBACK);
    assert_eq!(fetcher.requests().len(), 2);

    clock.advance(Duration::from_secs(1));
    assert_eq!(assistant.current_president(), PRESIDENT_FALLBACK);
    assert_eq!(fetcher.requests().len(), 4);
}

#[test]
fn general_question_answered_by_summary() {
    let fetcher = Arc::new(ScriptedFetcher::new().body(
        sources().summary_api,
        r#"{"query":{"pages":{"6013":{"extract":"Brasília é a capital federal do Brasil."}}}}"#,
    ));
    let assistant = assistant_with(vec![], fetcher);

    let answer = assistant.resolve("Brasília").into_answer();
    assert_eq!(
        answer.text,
        "Brasília é a capital federal do Brasil.... (Fonte: Wikipedia)"
    );
    assert_eq!(answer.source, AnswerSource::Web);
}

#[test]
fn unknown_question_is_taught_and_remembered() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .body(sources().summary_api, SUMMARY_MISS)
            .body(
                sources().search_relay,
                r#"{"contents": "<html>nenhum resultado</html>"}"#,
            ),
    );
    let assistant = assistant_with(vec![], fetcher);

    let question = "qual o telefone da ouvidoria";
    let Resolution::Unresolved(pending) = assistant.resolve(question) else {
        panic!("expected an unresolved question");
    };
    assert_eq!(pending.question(), question);

    let answer = assistant.complete(pending, Some("0800 123 4567"));
    assert_eq!(answer.text, "0800 123 4567");
    assert_eq!(answer.source, AnswerSource::Correction);

    let stored = assistant.store().fetch_all().unwrap();
    assert_eq!(stored, vec![Record::new([question], "0800 123 4567")]);

    let again = assistant.resolve("telefone ouvidoria").into_answer();
    assert_eq!(again.text, "0800 123 4567");
    assert_eq!(again.source, AnswerSource::Store);
}

#[test]
fn declined_correction_is_an_apology() {
    let fetcher = Arc::new(
        ScriptedFetcher::new()
            .body(sources().summary_api, SUMMARY_MISS)
            .body(sources().search_relay, r#"{"contents": ""}"#),
    );
    let assistant = assistant_with(vec![], fetcher);

    let Resolution::Unresolved(pending) = assistant.resolve("pergunta sem resposta") else {
        panic!("expected an unresolved question");
    };
    let answer = assistant.complete(pending, None);
    assert_eq!(answer.text, APOLOGY);
    assert!(assistant.store().fetch_all().unwrap().is_empty());
}

#[test]
fn summary_failure_asks_for_a_correction() {
    // A failed summary lookup reports the not-found sentinel, which the
    // resolver treats like any other miss.
    let fetcher = Arc::new(ScriptedFetcher::new().route(sources().summary_api, Reply::Status(503)));
    let assistant = assistant_with(vec![], fetcher);
    assert!(matches!(
        assistant.resolve("algo qualquer"),
        Resolution::Unresolved(_)
    ));
}

#[test]
fn unreachable_relay_is_reported_not_taught() {
    let fetcher = Arc::new(ScriptedFetcher::new().body(sources().summary_api, SUMMARY_MISS));
    let assistant = assistant_with(vec![], fetcher);
    let answer = assistant.resolve("algo qualquer").into_answer();
    assert_eq!(answer.text, SOURCES_UNAVAILABLE);
}

#[test]
fn fact_check_routes_to_summary() {
    let fetcher = Arc::new(ScriptedFetcher::new().body(
        sources().summary_api,
        r#"{"query":{"pages":{"1":{"extract":"A Terra é o terceiro planeta."}}}}"#,
    ));
    let assistant = assistant_with(vec![], fetcher.clone());
    let answer = assistant
        .resolve("é verdade que a terra é redonda?")
        .into_answer();
    assert_eq!(answer.source, AnswerSource::FactCheck);
    assert_eq!(answer.text, "A Terra é o terceiro planeta.... (Fonte: Wikipedia)");
    assert!(fetcher.requests()[0].contains("titles=terra%20%C3%A9%20redonda"));
}

#[test]
fn fact_check_without_claim_is_the_sentinel() {
    let assistant = assistant_with(vec![], Arc::new(ScriptedFetcher::new()));
    let answer = assistant.resolve("isso é verdade?").into_answer();
    assert_eq!(answer.text, NOT_FOUND);
    assert_eq!(answer.source, AnswerSource::FactCheck);
}

#[test]
fn resolution_is_total() {
    let assistant = assistant_with(vec![], Arc::new(ScriptedFetcher::new()));
    for input in [
        "x",
        "quem é o presidente do país",
        "o governo federal",
        "checar fato",
        "🤔",
        "<script>alert(1)</script>",
        "[[[",
    ] {
        let answer = assistant.resolve(input).into_answer();
        assert!(!answer.text.is_empty(), "empty reply for {input:?}");
    }
    assert_eq!(
        assistant.resolve("o governo federal").into_answer().text,
        RETRY
    );
}

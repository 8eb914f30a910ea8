//! Answer resolution pipeline.
//!
//! An [`Assistant`] owns everything a resolution needs: the answer store,
//! the fetch capability, the clock and the president cache. Resolution
//! tries sources in a fixed order and stops at the first hit:
//!
//! 1. answer store (all query tokens contained in a stored phrasing)
//! 2. predefined greetings table (exact lowercase match)
//! 3. intent-specific lookup (president, government, fact check)
//! 4. summary → web search; a not-found reply becomes
//!    [`Resolution::Unresolved`] so the caller can collect a correction
//!
//! [`Assistant::resolve`] is total. Store and network failures are logged
//! and turned into fallback prose; nothing escapes as an error.

use std::sync::Mutex;

use crate::adapters::{self, fact_check, government, president, summary};
use crate::cache::{Clock, SessionCache, SystemClock};
use crate::classify::{Intent, classify};
use crate::config::AssistantConfig;
use crate::error::AssistResult;
use crate::fetch::Fetcher;
use crate::record::{Record, find_answer};
use crate::store::AnswerStore;

/// Reply when something unexpected went wrong.
pub const RETRY: &str = "Parece que tive um problema. Vamos tentar novamente?";

/// Reply when nothing was found and no correction was given.
pub const APOLOGY: &str =
    "Desculpe, não encontrei uma resposta precisa. Você pode tentar reformular sua pergunta?";

/// Question put to the user when the assistant does not know an answer.
pub const CORRECTION_PROMPT: &str =
    "Ainda não sei essa resposta, poderia me responder para as próximas vezes?";

const PREDEFINED: &[(&str, &str)] = &[
    ("olá", "Olá! Como posso te ajudar hoje? "),
    ("oi", "Oi! Estou aqui para responder suas perguntas!"),
    ("tudo bem", "Estou ótimo! E com você?"),
    (
        "quem é você",
        "Sou seu assistente virtual inteligente! Posso te informar sobre diversos assuntos.",
    ),
];

/// Canned reply for a greeting or identity question.
pub fn predefined(question: &str) -> Option<&'static str> {
    let lower = question.to_lowercase();
    PREDEFINED
        .iter()
        .find(|(q, _)| *q == lower)
        .map(|(_, a)| *a)
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Store,
    Predefined,
    President,
    Government,
    FactCheck,
    Web,
    /// Taught by the user after an unresolved question.
    Correction,
    /// A fixed apology or retry string.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    fn new(text: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// A question nobody could answer. Hand it back to
/// [`Assistant::complete`] with or without a correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCorrection {
    question: String,
}

impl PendingCorrection {
    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn prompt(&self) -> &'static str {
        CORRECTION_PROMPT
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Answered(Answer),
    Unresolved(PendingCorrection),
}

impl Resolution {
    /// Final answer without asking for a correction.
    pub fn into_answer(self) -> Answer {
        match self {
            Self::Answered(answer) => answer,
            Self::Unresolved(_) => Answer::new(APOLOGY, AnswerSource::Fallback),
        }
    }
}

/// The resolution context.
pub struct Assistant {
    config: AssistantConfig,
    store: Box<dyn AnswerStore>,
    fetcher: Box<dyn Fetcher>,
    clock: Box<dyn Clock>,
    president_cache: Mutex<SessionCache>,
}

impl Assistant {
    pub fn new(
        config: AssistantConfig,
        store: Box<dyn AnswerStore>,
        fetcher: Box<dyn Fetcher>,
    ) -> Self {
        let president_cache = Mutex::new(SessionCache::new(config.cache.ttl()));
        Self {
            config,
            store,
            fetcher,
            clock: Box::new(SystemClock),
            president_cache,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn AnswerStore {
        self.store.as_ref()
    }

    /// Resolve a question. Expects trimmed, non-empty input; never fails.
    pub fn resolve(&self, question: &str) -> Resolution {
        match self.try_resolve(question) {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::warn!(error = %e, question, "resolution failed");
                Resolution::Answered(Answer::new(RETRY, AnswerSource::Fallback))
            }
        }
    }

    fn try_resolve(&self, question: &str) -> AssistResult<Resolution> {
        if let Some(answer) = self.lookup_store(question) {
            tracing::debug!(question, "answered from store");
            return Ok(Resolution::Answered(Answer::new(answer, AnswerSource::Store)));
        }

        if let Some(answer) = predefined(question) {
            return Ok(Resolution::Answered(Answer::new(
                answer,
                AnswerSource::Predefined,
            )));
        }

        let intent = classify(question);
        tracing::debug!(question, %intent, "classified");
        let fetcher = self.fetcher.as_ref();
        let sources = &self.config.sources;

        let answer = match intent {
            Intent::CurrentPresident => {
                Answer::new(self.current_president(), AnswerSource::President)
            }
            Intent::CurrentGovernment => {
                // Surfaces as an error; see `resolve`.
                let text = government::lookup(fetcher)?;
                Answer::new(text, AnswerSource::Government)
            }
            Intent::FactCheck => Answer::new(
                fact_check::lookup(fetcher, sources, question),
                AnswerSource::FactCheck,
            ),
            Intent::General => {
                let text = summary::lookup(fetcher, sources, question);
                if adapters::is_not_found(&text) {
                    return Ok(Resolution::Unresolved(PendingCorrection {
                        question: question.to_string(),
                    }));
                }
                Answer::new(text, AnswerSource::Web)
            }
        };
        Ok(Resolution::Answered(answer))
    }

    /// First stored answer matching the question. A store that cannot be
    /// read counts as a miss.
    fn lookup_store(&self, question: &str) -> Option<String> {
        match self.store.fetch_all() {
            Ok(records) => find_answer(&records, question).map(|r| r.answer.clone()),
            Err(e) => {
                tracing::warn!(error = %e, store = %self.store.describe(), "answer store unavailable");
                None
            }
        }
    }

    /// Current president, served from the day-long cache when fresh.
    pub fn current_president(&self) -> String {
        let now = self.clock.now_millis();
        {
            let cache = self.president_cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(hit) = cache.get(now) {
                tracing::debug!("president served from cache");
                return hit.to_string();
            }
        }

        let answer = president::lookup(self.fetcher.as_ref(), &self.config.sources);
        if answer.cacheable {
            self.president_cache
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .set(answer.text.clone(), self.clock.now_millis());
        }
        answer.text
    }

    /// Finish an unresolved question.
    ///
    /// A non-blank correction is stored as a new record and returned
    /// verbatim, even when persisting it fails. Without one, the apology is
    /// returned.
    pub fn complete(&self, pending: PendingCorrection, correction: Option<&str>) -> Answer {
        let Some(correction) = correction.filter(|c| !c.trim().is_empty()) else {
            return Answer::new(APOLOGY, AnswerSource::Fallback);
        };
        let record = Record::new([pending.question], correction);
        if let Err(e) = self.store.append_and_persist(record) {
            tracing::warn!(error = %e, "could not persist correction");
        }
        Answer::new(correction, AnswerSource::Correction)
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("store", &self.store.describe())
            .finish_non_exhaustive()
    }
}

//! Intent classification for incoming questions.
//!
//! Keyword regexes, no model. Each intent is a pair of patterns: a
//! *subject* group and a *qualifier* group, and both must match. Intents
//! are tested in a fixed order and the first hit wins:
//!
//! 1. [`Intent::CurrentPresident`]
//! 2. [`Intent::CurrentGovernment`]
//! 3. [`Intent::FactCheck`] (subject only)
//! 4. [`Intent::General`] otherwise
//!
//! The order matters: "atual" and "governo" appear in more than one group,
//! so "quem é o atual ministro do brasil" lands on the president route.

use std::sync::LazyLock;

use regex::Regex;

/// Coarse question category used to pick a specialised lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    CurrentPresident,
    CurrentGovernment,
    FactCheck,
    General,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CurrentPresident => "current_president",
            Self::CurrentGovernment => "current_government",
            Self::FactCheck => "fact_check",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Patterns ────────────────────────────────────────────────────────────

static RE_PRESIDENT_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"presidente|atual|hoje|quem é o presidente|mandatário|governante").unwrap()
});

static RE_PRESIDENT_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"brasil|brasileiro|nacional|país").unwrap());

static RE_GOVERNMENT_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ministro|governo|atual|equipe|ministério").unwrap());

static RE_GOVERNMENT_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"federal|brasil|governo").unwrap());

static RE_FACT_CHECK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"verdade|verificar|confirmar|checar|fato").unwrap());

/// Classify a question. Case-insensitive; never fails.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();

    if RE_PRESIDENT_SUBJECT.is_match(&lower) && RE_PRESIDENT_QUALIFIER.is_match(&lower) {
        return Intent::CurrentPresident;
    }

    if RE_GOVERNMENT_SUBJECT.is_match(&lower) && RE_GOVERNMENT_QUALIFIER.is_match(&lower) {
        return Intent::CurrentGovernment;
    }

    if RE_FACT_CHECK.is_match(&lower) {
        return Intent::FactCheck;
    }

    Intent::General
}

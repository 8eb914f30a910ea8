//! Question/answer records as they appear in the answer database.
//!
//! The on-disk shape is `{"pergunta": ..., "resposta": "..."}` where
//! `pergunta` is either one question or a list of alternative phrasings.

use serde::{Deserialize, Serialize};

/// One or more phrasings of the same question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionForms {
    One(String),
    Many(Vec<String>),
}

impl QuestionForms {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::One(q) => std::slice::from_ref(q),
            Self::Many(qs) => qs,
        };
        slice.iter().map(String::as_str)
    }
}

/// A question(s)-to-answer mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "pergunta")]
    pub questions: QuestionForms,
    #[serde(rename = "resposta")]
    pub answer: String,
}

impl Record {
    /// Build a record in the list form used for newly taught answers.
    pub fn new<I, S>(questions: I, answer: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            questions: QuestionForms::Many(questions.into_iter().map(Into::into).collect()),
            answer: answer.into(),
        }
    }

    /// Whether any phrasing of this record contains every query token.
    ///
    /// Matching is substring containment per token, not equality: the
    /// token `"pix"` matches the phrasing `"o que é o pix?"` and also
    /// `"pixel"`. An empty token list never matches.
    pub fn matches(&self, tokens: &[String]) -> bool {
        if tokens.is_empty() {
            return false;
        }
        self.questions.iter().any(|form| {
            let form = form.to_lowercase();
            tokens.iter().all(|t| form.contains(t.as_str()))
        })
    }
}

/// Lowercase a question and split it on whitespace runs.
pub fn query_tokens(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// First record, in store order, matching the question.
pub fn find_answer<'a>(records: &'a [Record], question: &str) -> Option<&'a Record> {
    let tokens = query_tokens(question);
    records.iter().find(|r| r.matches(&tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_question_shapes() {
        let json = r#"[
            {"pergunta": "Qual o horário de atendimento?", "resposta": "Das 8h às 17h."},
            {"pergunta": ["o que é o pix", "como funciona o pix"], "resposta": "Pagamento instantâneo."}
        ]"#;
        let records: Vec<Record> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(matches!(records[0].questions, QuestionForms::One(_)));
        assert_eq!(records[1].questions.iter().count(), 2);
    }

    #[test]
    fn new_records_use_list_form() {
        let json = serde_json::to_string(&Record::new(["x"], "y")).unwrap();
        assert_eq!(json, r#"{"pergunta":["x"],"resposta":"y"}"#);
    }

    #[test]
    fn all_tokens_must_be_contained() {
        let r = Record::new(["Como funciona o PIX?"], "ok");
        assert!(r.matches(&query_tokens("como pix")));
        assert!(r.matches(&query_tokens("FUNC")));
        assert!(!r.matches(&query_tokens("como funciona o boleto")));
    }

    #[test]
    fn empty_query_matches_nothing() {
        let r = Record::new(["anything"], "ok");
        assert!(!r.matches(&query_tokens("")));
        assert!(!r.matches(&query_tokens("   ")));
    }

    #[test]
    fn first_match_in_store_order_wins() {
        let records = vec![
            Record::new(["horário do banco"], "first"),
            Record::new(["horário de atendimento do banco"], "second"),
        ];
        assert_eq!(
            find_answer(&records, "horário banco").map(|r| r.answer.as_str()),
            Some("first")
        );
        assert_eq!(
            find_answer(&records, "atendimento").map(|r| r.answer.as_str()),
            Some("second")
        );
        assert!(find_answer(&records, "cartório").is_none());
    }

    #[test]
    fn any_form_may_match() {
        let r = Record::new(["primeira forma", "segunda forma"], "ok");
        assert!(r.matches(&query_tokens("segunda")));
    }
}

//! Chat session: the message-send handler in front of the resolver.
//!
//! Trims input, ignores empty messages, and keeps a transcript of who said
//! what. Unresolved questions are handed back to the caller, which decides
//! how to ask for a correction before calling [`ChatSession::correct`].

use crate::resolver::{Answer, Assistant, PendingCorrection, Resolution};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Transcript label.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "Você",
            Self::Assistant => "Assistente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.speaker.label(), self.text)
    }
}

pub struct ChatSession<'a> {
    assistant: &'a Assistant,
    transcript: Vec<Turn>,
}

impl<'a> ChatSession<'a> {
    pub fn new(assistant: &'a Assistant) -> Self {
        Self {
            assistant,
            transcript: Vec::new(),
        }
    }

    /// Prime the president cache so the first such question is instant.
    pub fn warm_up(&self) {
        let _ = self.assistant.current_president();
    }

    /// Send one message. Returns `None` for blank input, which is neither
    /// resolved nor recorded.
    pub fn send(&mut self, input: &str) -> Option<Resolution> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        self.push(Speaker::User, message);

        let resolution = self.assistant.resolve(message);
        if let Resolution::Answered(answer) = &resolution {
            self.push(Speaker::Assistant, &answer.text);
        }
        Some(resolution)
    }

    /// Close out an unresolved question with the user's correction, if any.
    pub fn correct(&mut self, pending: PendingCorrection, correction: Option<&str>) -> Answer {
        let answer = self.assistant.complete(pending, correction);
        self.push(Speaker::Assistant, &answer.text);
        answer
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    fn push(&mut self, speaker: Speaker, text: &str) {
        self.transcript.push(Turn {
            speaker,
            text: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistantConfig;
    use crate::fetch::ScriptedFetcher;
    use crate::record::Record;
    use crate::store::MemStore;

    fn assistant() -> Assistant {
        Assistant::new(
            AssistantConfig::default(),
            Box::new(MemStore::with_records(vec![Record::new(
                ["qual o horário de atendimento"],
                "Das 8h às 17h.",
            )])),
            Box::new(ScriptedFetcher::new()),
        )
    }

    #[test]
    fn blank_input_is_ignored() {
        let assistant = assistant();
        let mut session = ChatSession::new(&assistant);
        assert!(session.send("   \n").is_none());
        assert!(session.transcript().is_empty());
    }

    #[test]
    fn input_is_trimmed_and_recorded() {
        let assistant = assistant();
        let mut session = ChatSession::new(&assistant);
        let resolution = session.send("  horário  ").unwrap();
        assert_eq!(resolution.into_answer().text, "Das 8h às 17h.");
        assert_eq!(
            session
                .transcript()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["Você: horário", "Assistente: Das 8h às 17h."]
        );
    }

    #[test]
    fn clear_empties_transcript() {
        let assistant = assistant();
        let mut session = ChatSession::new(&assistant);
        session.send("oi");
        session.clear();
        assert!(session.transcript().is_empty());
    }
}

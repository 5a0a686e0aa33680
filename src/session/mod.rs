// src/session/mod.rs

use thiserror::Error;

pub mod ollama;
pub mod scripted;

pub use ollama::OllamaGenerator;
pub use scripted::ScriptedGenerator;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("failed to parse response: {0}")]
    MalformedResponse(String),
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// One request/response exchange. Immutable once recorded.
#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub request: String,
    pub response: String,
}

/// Trait that defines a pluggable text-generation backend.
pub trait Generator {
    fn generate(
        &mut self,
        request: &str,
        history: &[ConversationTurn],
    ) -> Result<String, GenerationError>;
}

/// A single running conversation with a generation backend.
///
/// Every `predict` call resends the accumulated history, so later
/// generations stay consistent with earlier plan and file decisions.
/// The turn log is append-only; failed calls leave it untouched.
pub struct ConversationSession {
    generator: Box<dyn Generator>,
    turns: Vec<ConversationTurn>,
}

impl ConversationSession {
    pub fn new(generator: Box<dyn Generator>) -> Self {
        Self {
            generator,
            turns: Vec::new(),
        }
    }

    pub fn predict(&mut self, request: &str) -> Result<String, GenerationError> {
        log::debug!(
            "predict: {} chars of request, {} prior turns",
            request.len(),
            self.turns.len()
        );
        let response = self.generator.generate(request, &self.turns)?;
        self.turns.push(ConversationTurn {
            request: request.to_string(),
            response: response.clone(),
        });
        Ok(response)
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_appends_one_turn_per_call() {
        let mut session =
            ConversationSession::new(Box::new(ScriptedGenerator::new(["first", "second"])));

        let a = session.predict("plan please").unwrap();
        let b = session.predict("file please").unwrap();

        assert_eq!(a, "first");
        assert_eq!(b, "second");
        assert_eq!(session.turns().len(), 2);
        assert_eq!(session.turns()[0].request, "plan please");
        assert_eq!(session.turns()[1].response, "second");
    }

    #[test]
    fn history_grows_between_calls() {
        struct HistoryLen(Vec<usize>);
        impl Generator for HistoryLen {
            fn generate(
                &mut self,
                _request: &str,
                history: &[ConversationTurn],
            ) -> Result<String, GenerationError> {
                self.0.push(history.len());
                Ok(format!("seen {}", history.len()))
            }
        }

        let mut session = ConversationSession::new(Box::new(HistoryLen(Vec::new())));
        assert_eq!(session.predict("a").unwrap(), "seen 0");
        assert_eq!(session.predict("b").unwrap(), "seen 1");
        assert_eq!(session.predict("c").unwrap(), "seen 2");
    }

    #[test]
    fn failed_call_does_not_record_a_turn() {
        // An exhausted script reports a transport failure.
        let mut session = ConversationSession::new(Box::new(ScriptedGenerator::new(["only"])));

        session.predict("one").unwrap();
        assert!(session.predict("two").is_err());
        assert_eq!(session.turns().len(), 1);
    }
}

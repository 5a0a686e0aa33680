// src/session/scripted.rs

use crate::session::{ConversationTurn, GenerationError, Generator};
use std::collections::VecDeque;

/// Replays a fixed list of responses. Useful for offline dry runs and
/// for driving the orchestrator in tests without a live backend.
pub struct ScriptedGenerator {
    responses: VecDeque<String>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

impl Generator for ScriptedGenerator {
    fn generate(
        &mut self,
        _request: &str,
        _history: &[ConversationTurn],
    ) -> Result<String, GenerationError> {
        self.responses
            .pop_front()
            .ok_or_else(|| GenerationError::Transport("script exhausted".to_string()))
    }
}

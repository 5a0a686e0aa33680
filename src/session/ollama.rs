// src/session/ollama.rs

use crate::session::{ConversationTurn, GenerationError, Generator};
use serde_json::{Value, json};

/// Talks to a local Ollama server over its chat endpoint.
pub struct OllamaGenerator {
    pub model: String,
    pub host: String,
    pub system: String,
    client: reqwest::blocking::Client,
}

impl OllamaGenerator {
    pub fn new(model: &str, host: &str) -> Self {
        Self {
            model: model.to_string(),
            host: host.trim_end_matches('/').to_string(),
            system: String::new(),
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn with_system(mut self, system: &str) -> Self {
        self.system = system.to_string();
        self
    }
}

impl Default for OllamaGenerator {
    fn default() -> Self {
        Self::new("llama3", "http://localhost:11434")
    }
}

impl Generator for OllamaGenerator {
    fn generate(
        &mut self,
        request: &str,
        history: &[ConversationTurn],
    ) -> Result<String, GenerationError> {
        let mut messages = Vec::with_capacity(history.len() * 2 + 2);
        if !self.system.is_empty() {
            messages.push(json!({ "role": "system", "content": self.system }));
        }
        for turn in history {
            messages.push(json!({ "role": "user", "content": turn.request }));
            messages.push(json!({ "role": "assistant", "content": turn.response }));
        }
        messages.push(json!({ "role": "user", "content": request }));

        let payload = json!({
            "model": self.model,
            "messages": messages,
            "stream": false
        });

        let url = format!("{}/api/chat", self.host);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .map_err(|err| GenerationError::Transport(format!("Request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            // Covers rate limiting (429) as well as server errors.
            return Err(GenerationError::Transport(format!(
                "Server returned {status}"
            )));
        }

        let body: Value = response
            .json()
            .map_err(|err| GenerationError::MalformedResponse(format!("Failed to parse JSON: {err}")))?;

        let text = body
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                GenerationError::MalformedResponse(
                    "response missing 'message.content' field".to_string(),
                )
            })?;

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

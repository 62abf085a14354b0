use std::time::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self { role: Role::System, content: content.to_string() }
    }
    pub fn user(content: &str) -> Self {
        Self { role: Role::User, content: content.to_string() }
    }
}

/// Per-route sampling knobs; the gateway adds the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Per-attempt deadline. `None` leaves the HTTP client default.
    pub timeout: Option<Duration>,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self { temperature: 0.7, max_tokens: 2000, timeout: None }
    }
}

/// Body of one chat-completion call. Built fresh per call.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip)]
    pub timeout: Option<Duration>,
}

impl CompletionRequest {
    pub fn new(model: &str, messages: Vec<ChatMessage>, params: CompletionParams) -> Self {
        Self {
            model: model.to_string(),
            messages,
            temperature: params.temperature.clamp(0.0, 1.0),
            max_tokens: params.max_tokens.max(1),
            timeout: params.timeout,
        }
    }
}

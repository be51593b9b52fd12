use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::ProviderKind;

/// One turn of a chat exchange. `role` is `system`, `user` or `assistant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// Per-call generation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl ChatOptions {
    /// Zero temperature, for classification-style prompts.
    pub fn deterministic() -> Self {
        Self { temperature: 0.0, max_tokens: None }
    }
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self { temperature: 0.7, max_tokens: None }
    }
}

/// A text-generation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Sends the conversation and returns the reply text.
    async fn chat(&self, messages: Vec<ChatMessage>, options: ChatOptions) -> anyhow::Result<String>;
}

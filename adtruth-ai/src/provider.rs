use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::models::{ProviderConfig, ProviderKind};
use crate::traits::{ChatMessage, ChatOptions, ModelProvider};

fn ensure_api_key(config: &ProviderConfig) -> anyhow::Result<()> {
    if !config.has_api_key() {
        return Err(anyhow::anyhow!(
            "missing API key (set {})",
            config.kind.api_key_env()
        ));
    }
    Ok(())
}

/// Parses an HTTP body as JSON, surfacing the upstream error message on non-2xx.
fn decode_response(status: u16, body: &str) -> anyhow::Result<Value> {
    let data = match serde_json::from_str::<Value>(body) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to parse API response as JSON: {:?}", e);
            if !(200..300).contains(&status) {
                return Err(anyhow::anyhow!("HTTP {}: {}", status, body.trim()));
            }
            return Err(anyhow::anyhow!("API returned non-JSON response: {}", e));
        }
    };

    if !(200..300).contains(&status) {
        // Cohere puts the reason in `message`, OpenAI in `error.message`.
        let message = data
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| data.get("error").and_then(|e| e.get("message")).and_then(|m| m.as_str()))
            .unwrap_or("Unknown error");
        return Err(anyhow::anyhow!("HTTP {}: {}", status, message));
    }

    Ok(data)
}

/// Cohere provider implementation (v1 chat endpoint)
pub struct CohereProvider {
    config: ProviderConfig,
    client: Client,
}

impl CohereProvider {
    /// Create a new Cohere provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }

    /// Builds the `/chat` body: the last user turn becomes `message`, system
    /// turns are joined into `preamble`, everything else goes to `chat_history`.
    pub fn build_payload(model: &str, messages: &[ChatMessage], options: &ChatOptions) -> anyhow::Result<Value> {
        let last_user = messages
            .iter()
            .rposition(|m| m.role == "user")
            .ok_or_else(|| anyhow::anyhow!("chat request has no user message"))?;

        let preamble: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == "system")
            .map(|m| m.content.as_str())
            .collect();

        let history: Vec<Value> = messages[..last_user]
            .iter()
            .filter(|m| m.role != "system")
            .map(|m| {
                let role = match m.role.as_str() {
                    "assistant" => "CHATBOT",
                    _ => "USER",
                };
                json!({ "role": role, "message": m.content })
            })
            .collect();

        let mut payload = json!({
            "model": model,
            "message": messages[last_user].content,
            "temperature": options.temperature,
        });
        if !preamble.is_empty() {
            payload["preamble"] = json!(preamble.join("\n\n"));
        }
        if !history.is_empty() {
            payload["chat_history"] = json!(history);
        }
        if let Some(max_tokens) = options.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }
        Ok(payload)
    }

    pub fn extract_reply(data: &Value) -> anyhow::Result<String> {
        data.get("text")
            .and_then(|t| t.as_str())
            .map(|t| t.to_string())
            .ok_or_else(|| anyhow::anyhow!("Response missing 'text'"))
    }
}

#[async_trait]
impl ModelProvider for CohereProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Cohere
    }

    async fn chat(&self, messages: Vec<ChatMessage>, options: ChatOptions) -> anyhow::Result<String> {
        ensure_api_key(&self.config)?;
        let payload = Self::build_payload(&self.config.default_model, &messages, &options)?;

        tracing::debug!("Making API call to {}/chat (model={})", self.config.api_base(), self.config.default_model);

        let response = self.client
            .post(format!("{}/chat", self.config.api_base()))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let response_text = response.text().await?;
        tracing::debug!("Raw API response: {}", response_text);

        let data = decode_response(status, &response_text)?;
        Self::extract_reply(&data)
    }
}

/// OpenAI provider implementation
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }

    pub fn build_payload(model: &str, messages: &[ChatMessage], options: &ChatOptions) -> Value {
        let formatted_messages: Vec<Value> = messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role,
                    "content": msg.content
                })
            })
            .collect();

        let mut payload = json!({
            "model": model,
            "messages": formatted_messages,
            "temperature": options.temperature,
        });
        if let Some(max_tokens) = options.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }
        payload
    }

    pub fn extract_reply(data: &Value) -> anyhow::Result<String> {
        let choices = data
            .get("choices")
            .and_then(|c| c.as_array())
            .ok_or_else(|| anyhow::anyhow!("Response missing 'choices' array"))?;

        let first = choices
            .first()
            .ok_or_else(|| anyhow::anyhow!("No completions returned"))?;

        first
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|c| c.to_string())
            .ok_or_else(|| anyhow::anyhow!("Response message missing 'content'"))
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn chat(&self, messages: Vec<ChatMessage>, options: ChatOptions) -> anyhow::Result<String> {
        ensure_api_key(&self.config)?;
        let payload = Self::build_payload(&self.config.default_model, &messages, &options);

        tracing::debug!("Making API call to {}/chat/completions (model={})", self.config.api_base(), self.config.default_model);

        let response = self.client
            .post(format!("{}/chat/completions", self.config.api_base()))
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let response_text = response.text().await?;
        tracing::debug!("Raw API response: {}", response_text);

        let data = decode_response(status, &response_text)?;
        Self::extract_reply(&data)
    }
}

/// Factory for creating AI providers
pub struct Provider;

impl Provider {
    /// Create a Cohere provider from a configuration
    pub fn create_cohere(config: ProviderConfig) -> CohereProvider {
        CohereProvider::new(config)
    }

    /// Create an OpenAI provider from a configuration
    pub fn create_openai(config: ProviderConfig) -> OpenAIProvider {
        OpenAIProvider::new(config)
    }

    /// Builds whichever provider `config.kind` names.
    pub fn from_config(config: ProviderConfig) -> Arc<dyn ModelProvider> {
        if !config.has_api_key() {
            tracing::warn!(
                "{} is not set; classification requests will fail until it is",
                config.kind.api_key_env()
            );
        }
        match config.kind {
            ProviderKind::Cohere => Arc::new(Self::create_cohere(config)),
            ProviderKind::OpenAi => Arc::new(Self::create_openai(config)),
        }
    }
}

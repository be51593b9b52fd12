use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported generative model backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Cohere,
    OpenAi,
}

impl ProviderKind {
    /// Registry key, also accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Cohere => "cohere",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Human-facing name used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Cohere => "Cohere",
            ProviderKind::OpenAi => "OpenAI",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Cohere => "command-r",
            ProviderKind::OpenAi => "gpt-4o-mini",
        }
    }

    pub fn default_api_base(self) -> &'static str {
        match self {
            ProviderKind::Cohere => "https://api.cohere.ai/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Environment variable the credential is read from.
    pub fn api_key_env(self) -> &'static str {
        match self {
            ProviderKind::Cohere => "COHERE_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cohere" => Ok(ProviderKind::Cohere),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(format!("unsupported AI provider '{}' (expected cohere or openai)", other)),
        }
    }
}

/// Configuration for an AI provider
#[derive(Clone)]
pub struct ProviderConfig {
    /// Which backend to talk to
    pub kind: ProviderKind,

    /// Base URL for API requests; falls back to the provider default
    pub api_base: Option<String>,

    /// API key for authentication. May be empty, in which case every call fails.
    pub api_key: String,

    /// Model to use with this provider
    pub default_model: String,
}

impl ProviderConfig {
    /// Config with the provider's default model and endpoint.
    pub fn new(kind: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            kind,
            api_base: None,
            api_key: api_key.into(),
            default_model: kind.default_model().to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        self.api_base
            .as_deref()
            .unwrap_or_else(|| self.kind.default_api_base())
            .trim_end_matches('/')
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// Hand-written so the key never lands in logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("api_base", &self.api_base)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "" })
            .field("default_model", &self.default_model)
            .finish()
    }
}

impl fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (model={}, base={}, key={})",
            self.kind,
            self.default_model,
            self.api_base(),
            if self.has_api_key() { "set" } else { "missing" }
        )
    }
}

pub mod classifier;
pub mod models;
pub mod provider;
pub mod traits;

// Re-export public APIs
pub use classifier::VerdictClassifier;
pub use models::{ProviderConfig, ProviderKind};
pub use provider::{CohereProvider, OpenAIProvider, Provider};
pub use traits::{ChatMessage, ChatOptions, ModelProvider};

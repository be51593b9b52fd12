//! Verdict classification of ad claims by a generative model.
//!
//! The model is asked for a single word, but its reply is matched by
//! substring in a fixed priority order (see [`VERDICT_KEYWORDS`]), so a reply
//! that mentions several labels resolves to the most severe one listed first.

use std::sync::Arc;

use tracing::{debug, info};

use adtruth_common::error::Error;
use adtruth_common::models::{Classification, Verdict};

use crate::traits::{ChatMessage, ChatOptions, ModelProvider};

/// Keywords tested against the lower-cased reply, first match wins.
pub const VERDICT_KEYWORDS: [(&str, Verdict); 3] = [
    ("misleading", Verdict::Misleading),
    ("exaggerated", Verdict::Exaggerated),
    ("safe", Verdict::Safe),
];

pub struct VerdictClassifier {
    provider: Arc<dyn ModelProvider>,
}

impl VerdictClassifier {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    /// Instruction prompt with the claim embedded verbatim in quotes.
    pub fn build_prompt(ad_text: &str) -> String {
        format!(
            "\nYou are a truthful advertising analyst. Classify the following ad claim as:\n\
             \n\
             \"Safe\" if it is standard, realistic marketing\n\
             \"Exaggerated\" if it makes big claims without facts\n\
             \"Misleading\" if it's false, deceptive, or untrue\n\
             \n\
             Ad: \"{}\"\n\
             Respond with only one word: Safe, Exaggerated, or Misleading.\n",
            ad_text
        )
    }

    pub fn parse_verdict(reply: &str) -> Verdict {
        let normalized = reply.trim().to_lowercase();
        VERDICT_KEYWORDS
            .iter()
            .find(|(keyword, _)| normalized.contains(keyword))
            .map(|(_, verdict)| *verdict)
            .unwrap_or(Verdict::Unknown)
    }

    /// Asks the model about `ad_text`. Provider failures are returned, not absorbed.
    pub async fn classify(&self, ad_text: &str) -> Result<Classification, Error> {
        let kind = self.provider.kind();
        let messages = vec![ChatMessage::user(Self::build_prompt(ad_text))];

        let reply = self
            .provider
            .chat(messages, ChatOptions::deterministic())
            .await
            .map_err(|e| Error::Ai(format!("{} API error: {}", kind.label(), e)))?;

        debug!("{} response: {}", kind.label(), reply.trim());

        let classification = Classification::new(Self::parse_verdict(&reply), reply);
        info!(
            verdict = %classification.verdict,
            trust_score = %classification.trust_score,
            "claim classified"
        );
        Ok(classification)
    }
}

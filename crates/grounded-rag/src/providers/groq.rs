//! Groq-hosted LLM provider

use async_trait::async_trait;

use crate::config::{CorpusConfig, LlmConfig, GROQ_API_KEY_ENV};
use crate::error::{Error, Result};
use crate::generation::{GroqClient, PromptBuilder};

use super::llm::LlmProvider;

/// Groq chat-completions provider for grounded answers
pub struct GroqLlm {
    client: GroqClient,
    model: String,
    temperature: f32,
    system_prompt: String,
}

impl GroqLlm {
    /// Create a provider with an explicit API key
    pub fn new(config: &LlmConfig, corpus: &CorpusConfig, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: GroqClient::new(&config.base_url, api_key, config.timeout_secs)?,
            model: config.model.clone(),
            temperature: config.temperature,
            system_prompt: PromptBuilder::system_prompt(&corpus.refusal),
        })
    }

    /// Create a provider reading the key from `GROQ_API_KEY`
    pub fn from_env(config: &LlmConfig, corpus: &CorpusConfig) -> Result<Self> {
        let api_key = std::env::var(GROQ_API_KEY_ENV)
            .map_err(|_| Error::Config(format!("{} not set", GROQ_API_KEY_ENV)))?;
        Self::new(config, corpus, api_key)
    }
}

#[async_trait]
impl LlmProvider for GroqLlm {
    async fn generate(&self, query: &str, context: &str) -> Result<String> {
        let prompt = PromptBuilder::user_prompt(query, context);
        self.client
            .chat(&self.model, &self.system_prompt, &prompt, self.temperature)
            .await
    }

    fn name(&self) -> &str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

//! LLM provider trait for grounded answer generation

use async_trait::async_trait;
use crate::error::Result;

/// Trait for turning an evidence document into a final answer
///
/// `context` is exactly the evidence document built by the synthesizer.
/// Implementations must instruct the model to reply with the configured refusal
/// sentence when the context is insufficient.
///
/// Implementations:
/// - `GroqLlm`: Groq-hosted chat completions (llama-3.1-8b-instant)
/// - `OllamaLlm`: Local Ollama server
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate an answer to `query` using only `context`
    async fn generate(&self, query: &str, context: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}

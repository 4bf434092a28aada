//! Provider abstractions for embeddings, the vector index, and the grounded generator
//!
//! The pipeline only talks to these traits, so the real Ollama/Groq/file-backed
//! implementations can be swapped for in-memory doubles.

pub mod embedding;
pub mod groq;
pub mod llm;
pub mod ollama;
pub mod vector_index;

pub use embedding::EmbeddingProvider;
pub use groq::GroqLlm;
pub use llm::LlmProvider;
pub use ollama::{OllamaEmbedder, OllamaLlm};
pub use vector_index::VectorIndexProvider;

use std::sync::Arc;

use crate::config::{LlmBackend, RagConfig};
use crate::error::Result;

/// Build the generator selected by `config.llm.backend`
///
/// Fails with a configuration error when the backend's credentials are missing.
pub fn llm_from_config(config: &RagConfig) -> Result<Arc<dyn LlmProvider>> {
    let llm: Arc<dyn LlmProvider> = match config.llm.backend {
        LlmBackend::Groq => Arc::new(GroqLlm::from_env(&config.llm, &config.corpus)?),
        LlmBackend::Ollama => Arc::new(OllamaLlm::new(&config.llm, &config.corpus)?),
    };
    tracing::info!("Generator: {} ({})", llm.name(), llm.model());
    Ok(llm)
}

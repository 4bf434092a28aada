//! Configuration for the grounded RAG pipeline

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the Groq API key
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Main pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Source document description and refusal wording
    #[serde(default)]
    pub corpus: CorpusConfig,
    /// Retrieval planner configuration
    #[serde(default)]
    pub planner: PlannerConfig,
    /// Section-aware retrieval configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    /// Embedding configuration
    #[serde(default)]
    pub embeddings: EmbeddingConfig,
    /// Generator (LLM) configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Persisted artifact locations
    #[serde(default)]
    pub storage: StorageConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file; missing sections fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RagConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot serve with
    pub fn validate(&self) -> Result<()> {
        self.retrieval.validate()?;
        if self.planner.sections.is_empty() {
            return Err(Error::Config("planner.sections must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Description of the single indexed document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Title used in the coverage note
    pub title: String,
    /// Short name used in the grounding guarantee
    pub short_name: String,
    /// Sentence returned verbatim when the evidence cannot answer the question
    pub refusal: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            title: "AWS Prescriptive Guidance document".to_string(),
            short_name: "AWS guide".to_string(),
            refusal: "This information is not available in the provided AWS RAG guide.".to_string(),
        }
    }
}

/// Planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Sections searched for every query, in priority order
    pub sections: Vec<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                "Fully managed RAG options".to_string(),
                "Custom RAG architectures".to_string(),
            ],
        }
    }
}

/// Section-aware retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Passages kept per planned section
    pub top_k: usize,
    /// Raw neighbours fetched per kept passage before section filtering
    pub candidate_multiplier: usize,
}

impl RetrievalConfig {
    /// Both counts must be at least 1
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::Config("retrieval.top_k must be at least 1".to_string()));
        }
        if self.candidate_multiplier == 0 {
            return Err(Error::Config(
                "retrieval.candidate_multiplier must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            candidate_multiplier: 3,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// Embedding dimensions (384 for MiniLM)
    pub dimensions: usize,
    /// Batch size used while building the index
    pub batch_size: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "all-minilm".to_string(),
            dimensions: 384,
            batch_size: 32,
            timeout_secs: 60,
        }
    }
}

/// Generator backend selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    /// Groq-hosted OpenAI-compatible chat completions
    #[default]
    Groq,
    /// Local Ollama server
    Ollama,
}

/// Generator (LLM) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Which backend answers questions
    pub backend: LlmBackend,
    /// Base URL of the chosen backend
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::Groq,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.0,
            timeout_secs: 120,
        }
    }
}

/// Persisted artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Passage list produced by ingestion
    pub passages_path: PathBuf,
    /// File-backed vector index
    pub index_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("grounded-rag");

        Self {
            passages_path: base.join("passages.json"),
            index_path: base.join("index.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RagConfig::default();
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.retrieval.candidate_multiplier, 3);
        assert_eq!(
            config.planner.sections,
            vec!["Fully managed RAG options", "Custom RAG architectures"]
        );
        assert_eq!(config.llm.backend, LlmBackend::Groq);
        assert_eq!(config.llm.temperature, 0.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RagConfig::from_toml_str(
            r#"
            [retrieval]
            top_k = 3
            candidate_multiplier = 4

            [llm]
            backend = "ollama"
            base_url = "http://localhost:11434"
            model = "llama3.2:3b"
            temperature = 0.1
            timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.retrieval.top_k, 3);
        assert_eq!(config.retrieval.candidate_multiplier, 4);
        assert_eq!(config.llm.backend, LlmBackend::Ollama);
        assert_eq!(config.embeddings.model, "all-minilm");
        assert_eq!(config.planner.sections.len(), 2);
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let err = RagConfig::from_toml_str(
            r#"
            [retrieval]
            top_k = 0
            candidate_multiplier = 3
            "#,
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }
}

//! Error types for the grounded RAG pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credentials, bad config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The vector index holds no passages and cannot serve queries
    #[error("Vector index at '{0}' is empty; build it before querying")]
    EmptyIndex(String),

    /// PDF ingestion error
    #[error("Failed to ingest '{source_name}': {message}")]
    Ingestion { source_name: String, message: String },

    /// Embedding error
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Vector index error
    #[error("Vector index error: {0}")]
    VectorIndex(String),

    /// Generator/LLM error
    #[error("LLM error: {0}")]
    Llm(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML config parse error
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an ingestion error
    pub fn ingestion(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Ingestion {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a vector index error
    pub fn vector_index(message: impl Into<String>) -> Self {
        Self::VectorIndex(message.into())
    }

    /// Create an LLM error
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm(message.into())
    }

    /// Whether this error is a startup/configuration failure rather than a per-query one
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Config(_) | Error::EmptyIndex(_) | Error::Toml(_))
    }
}

//! Grounded answer generation clients and prompt templates

pub mod groq;
pub mod ollama;
pub mod prompt;

pub use groq::GroqClient;
pub use ollama::OllamaClient;
pub use prompt::PromptBuilder;

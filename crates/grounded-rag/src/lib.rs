//! grounded-rag: Single-document question answering with cited evidence
//!
//! Queries run through four stages: a planner picks the document sections to
//! search, a section-aware retriever pulls passages from a vector index, a
//! deterministic synthesizer merges them into a cited evidence document, and a
//! generator answers strictly from that evidence.
//!
//! The index and the generator sit behind traits in [`providers`]; the crate
//! ships an Ollama embedder, a file-backed cosine index, and Groq/Ollama
//! generators.

pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod retrieval;
pub mod synthesis;
pub mod types;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use pipeline::{EvidencePipeline, QaPipeline};
pub use retrieval::{RetrievalPlanner, SectionRetriever, StaticSectionPlanner};
pub use synthesis::EvidenceSynthesizer;
pub use types::{
    IndexHit, Passage, PipelineAnswer, RetrievalOutput, RetrievalPlan, RetrievedPassage,
};

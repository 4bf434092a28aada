//! Core types for the grounded RAG pipeline

pub mod passage;
pub mod plan;
pub mod response;

pub use passage::{IndexHit, Passage, RetrievedPassage, DEFAULT_SECTION};
pub use plan::{RetrievalOutput, RetrievalPlan};
pub use response::PipelineAnswer;

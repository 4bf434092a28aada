//! End-to-end pipeline answer

use serde::{Deserialize, Serialize};

use super::plan::{RetrievalOutput, RetrievalPlan};

/// Every artifact produced while answering one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineAnswer {
    /// Plan chosen for the query
    pub plan: RetrievalPlan,
    /// Passages retrieved for the plan
    pub retrieval: RetrievalOutput,
    /// Deterministic evidence document handed to the generator
    pub evidence: String,
    /// Final grounded answer
    pub answer: String,
    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,
}

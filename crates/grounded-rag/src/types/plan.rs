//! Retrieval plans and retriever output

use serde::{Deserialize, Serialize};

use super::passage::RetrievedPassage;

/// Ordered list of sections to search for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalPlan {
    /// The user query
    pub query: String,
    /// Sections to search, in priority order
    pub sections_to_search: Vec<String>,
}

impl RetrievalPlan {
    /// Create a new plan
    pub fn new(query: impl Into<String>, sections_to_search: Vec<String>) -> Self {
        Self {
            query: query.into(),
            sections_to_search,
        }
    }
}

/// Aggregated retriever output for a plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalOutput {
    /// The query the plan was built for
    pub query: String,
    /// Retrieved passages in section order, then similarity order
    pub results: Vec<RetrievedPassage>,
}

impl RetrievalOutput {
    /// Whether no planned section produced any passage
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

//! Retrieval planners map a query to the sections worth searching

use crate::config::PlannerConfig;
use crate::types::RetrievalPlan;

/// Maps a free-text query to a ranked list of candidate sections
///
/// Planning is pure and infallible.
pub trait RetrievalPlanner: Send + Sync {
    fn plan(&self, query: &str) -> RetrievalPlan;
}

/// Planner that targets the same sections for every query
#[derive(Debug, Clone)]
pub struct StaticSectionPlanner {
    sections: Vec<String>,
}

impl StaticSectionPlanner {
    /// Create a planner targeting `sections` in order
    pub fn new(sections: Vec<String>) -> Self {
        Self { sections }
    }

    /// Create a planner from configuration
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.sections.clone())
    }
}

impl Default for StaticSectionPlanner {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

impl RetrievalPlanner for StaticSectionPlanner {
    fn plan(&self, query: &str) -> RetrievalPlan {
        RetrievalPlan::new(query, self.sections.clone())
    }
}

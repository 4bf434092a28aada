//! Query planning and section-aware retrieval

mod planner;
mod retriever;

pub use planner::{RetrievalPlanner, StaticSectionPlanner};
pub use retriever::{RetrievalStage, SectionRetriever};

//! Passage records produced by ingestion and returned by retrieval

use serde::{Deserialize, Serialize};

/// Section label for passages that match no known section
pub const DEFAULT_SECTION: &str = "General";

fn default_section() -> String {
    DEFAULT_SECTION.to_string()
}

fn default_page() -> u32 {
    1
}

/// A paragraph of the source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Stable, unique passage ID (e.g. `para_0042`)
    pub passage_id: String,
    /// Raw paragraph text
    pub text: String,
    /// Section label assigned at ingestion
    #[serde(default = "default_section")]
    pub section: String,
    /// 1-indexed page number
    #[serde(default = "default_page")]
    pub page: u32,
}

impl Passage {
    /// Create a new passage
    pub fn new(
        passage_id: impl Into<String>,
        text: impl Into<String>,
        section: impl Into<String>,
        page: u32,
    ) -> Self {
        Self {
            passage_id: passage_id.into(),
            text: text.into(),
            section: section.into(),
            page,
        }
    }

    /// Whether the section label contains `section` (case-insensitive)
    pub fn in_section(&self, section: &str) -> bool {
        self.section
            .to_lowercase()
            .contains(&section.to_lowercase())
    }
}

/// A nearest-neighbour hit as reported by the vector index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexHit {
    /// The matched passage
    pub passage: Passage,
    /// Cosine distance to the query (lower is more similar)
    pub distance: f32,
}

/// A passage selected by the retriever for a planned section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPassage {
    /// Stable passage ID
    pub passage_id: String,
    /// Raw paragraph text
    pub text: String,
    /// The passage's own section label
    pub section: String,
    /// 1-indexed page number
    pub page: u32,
    /// Index distance (lower is more similar)
    pub score: f32,
    /// Section the retriever was targeting when it found this passage.
    /// On the unfiltered fallback this may differ from `section`.
    pub retrieved_from: String,
}

impl RetrievedPassage {
    /// Tag an index hit with the section it was retrieved for
    pub fn from_hit(hit: IndexHit, retrieved_from: impl Into<String>) -> Self {
        let IndexHit { passage, distance } = hit;
        Self {
            passage_id: passage.passage_id,
            text: passage.text,
            section: passage.section,
            page: passage.page,
            score: distance,
            retrieved_from: retrieved_from.into(),
        }
    }
}

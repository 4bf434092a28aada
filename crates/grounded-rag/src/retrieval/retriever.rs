//! Section-aware retrieval with staged relaxation
//!
//! For every planned section the retriever walks an ordered list of
//! [`RetrievalStage`]s. Each stage issues one nearest-neighbour query and keeps
//! the hits its predicate admits; the first stage that keeps anything wins.
//! The default stages are a strict section match followed by an unfiltered
//! fallback.

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::error::{Error, Result};
use crate::providers::VectorIndexProvider;
use crate::types::{IndexHit, RetrievalOutput, RetrievalPlan, RetrievedPassage};

/// One filtering pass over the raw nearest neighbours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStage {
    /// Keep hits whose section label contains the target (case-insensitive)
    SectionMatch,
    /// Keep every hit regardless of section
    Unfiltered,
}

impl RetrievalStage {
    /// Whether `hit` survives this stage when searching for `target`
    pub fn admits(&self, hit: &IndexHit, target: &str) -> bool {
        match self {
            RetrievalStage::SectionMatch => hit.passage.in_section(target),
            RetrievalStage::Unfiltered => true,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            RetrievalStage::SectionMatch => "section-filtered",
            RetrievalStage::Unfiltered => "unfiltered",
        }
    }
}

/// Default strict-then-relaxed stage order
pub const DEFAULT_STAGES: [RetrievalStage; 2] =
    [RetrievalStage::SectionMatch, RetrievalStage::Unfiltered];

/// Retrieves passages for each section of a plan from an injected index
pub struct SectionRetriever {
    index: Arc<dyn VectorIndexProvider>,
    /// Passages kept per section
    top_k: usize,
    /// Raw neighbours fetched per kept passage
    candidate_multiplier: usize,
    stages: Vec<RetrievalStage>,
}

impl SectionRetriever {
    /// Create a retriever without checking the index
    ///
    /// Fails with [`Error::Config`] when `top_k` or `candidate_multiplier` is 0.
    pub fn new(index: Arc<dyn VectorIndexProvider>, config: &RetrievalConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            index,
            top_k: config.top_k,
            candidate_multiplier: config.candidate_multiplier,
            stages: DEFAULT_STAGES.to_vec(),
        })
    }

    /// Create a retriever, failing if the index holds no passages
    pub async fn connect(index: Arc<dyn VectorIndexProvider>, config: &RetrievalConfig) -> Result<Self> {
        config.validate()?;

        let count = index.len().await?;
        tracing::info!("Vector index '{}' holds {} passages", index.name(), count);

        if count == 0 {
            return Err(Error::EmptyIndex(index.name().to_string()));
        }

        Self::new(index, config)
    }

    /// Replace the stage order (e.g. to disable or extend the fallback)
    pub fn with_stages(mut self, stages: Vec<RetrievalStage>) -> Self {
        self.stages = stages;
        self
    }

    /// Retrieve passages for every planned section, in plan order
    ///
    /// Passages found for several sections are kept once per section.
    pub async fn retrieve_for_plan(&self, plan: &RetrievalPlan) -> Result<RetrievalOutput> {
        tracing::info!(
            "Retrieving for \"{}\" across sections {:?}",
            plan.query,
            plan.sections_to_search
        );

        let mut results = Vec::new();

        for section in &plan.sections_to_search {
            tracing::info!("Retrieving from section: {}", section);

            let hits = self.retrieve_section(&plan.query, section).await?;
            if hits.is_empty() {
                tracing::warn!("No passages found for section '{}' at any stage", section);
                continue;
            }

            results.extend(
                hits.into_iter()
                    .map(|hit| RetrievedPassage::from_hit(hit, section.as_str())),
            );
        }

        if results.is_empty() {
            tracing::warn!("Retriever found no relevant passages");
        } else {
            tracing::info!("Retrieved {} total passages", results.len());
        }

        Ok(RetrievalOutput {
            query: plan.query.clone(),
            results,
        })
    }

    /// Run the stages for one section until one of them keeps a hit
    async fn retrieve_section(&self, query: &str, section: &str) -> Result<Vec<IndexHit>> {
        let fetch = self.top_k * self.candidate_multiplier;

        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                tracing::warn!(
                    "No hits for section '{}', retrying {}",
                    section,
                    stage.describe()
                );
            }

            let hits: Vec<IndexHit> = self
                .index
                .query(query, fetch)
                .await?
                .into_iter()
                .filter(|hit| stage.admits(hit, section))
                .take(self.top_k)
                .collect();

            if !hits.is_empty() {
                for hit in &hits {
                    tracing::debug!(
                        "[{}] section={} page={} distance={:.4}",
                        hit.passage.passage_id,
                        hit.passage.section,
                        hit.passage.page,
                        hit.distance
                    );
                }
                return Ok(hits);
            }
        }

        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Passage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory index that returns passages in a fixed similarity order
    struct FakeIndex {
        passages: Vec<Passage>,
        queries: AtomicUsize,
        /// `k` of every query received
        requested: Mutex<Vec<usize>>,
    }

    impl FakeIndex {
        fn new(passages: Vec<Passage>) -> Arc<Self> {
            Arc::new(Self {
                passages,
                queries: AtomicUsize::new(0),
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl VectorIndexProvider for FakeIndex {
        async fn query(&self, _text: &str, k: usize) -> Result<Vec<IndexHit>> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(k);
            Ok(self
                .passages
                .iter()
                .take(k)
                .enumerate()
                .map(|(i, p)| IndexHit {
                    passage: p.clone(),
                    distance: 0.1 * (i + 1) as f32,
                })
                .collect())
        }

        async fn len(&self) -> Result<usize> {
            Ok(self.passages.len())
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    /// Index that reports passages but cannot be queried
    struct UnreachableIndex;

    #[async_trait]
    impl VectorIndexProvider for UnreachableIndex {
        async fn query(&self, _text: &str, _k: usize) -> Result<Vec<IndexHit>> {
            Err(Error::vector_index("connection refused"))
        }

        async fn len(&self) -> Result<usize> {
            Ok(10)
        }

        fn name(&self) -> &str {
            "unreachable"
        }
    }

    fn passage(id: &str, section: &str) -> Passage {
        Passage::new(id, format!("Text of {}", id), section, 1)
    }

    fn config(top_k: usize) -> RetrievalConfig {
        RetrievalConfig {
            top_k,
            candidate_multiplier: 3,
        }
    }

    fn plan(sections: &[&str]) -> RetrievalPlan {
        RetrievalPlan::new(
            "Compare fully managed RAG options with custom architectures",
            sections.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_section_filter_keeps_similarity_order() {
        let index = FakeIndex::new(vec![
            passage("para_0001", "Custom RAG architectures"),
            passage("para_0002", "Fully managed RAG options"),
            passage("para_0003", "General"),
            passage("para_0004", "Fully managed RAG options"),
        ]);
        let retriever = SectionRetriever::new(index.clone(), &config(5)).unwrap();

        let output = retriever
            .retrieve_for_plan(&plan(&["fully managed", "Custom RAG architectures"]))
            .await
            .unwrap();

        let ids: Vec<&str> = output.results.iter().map(|r| r.passage_id.as_str()).collect();
        assert_eq!(ids, vec!["para_0002", "para_0004", "para_0001"]);
        assert_eq!(output.results[0].retrieved_from, "fully managed");
        assert_eq!(output.results[2].retrieved_from, "Custom RAG architectures");
        assert!(output.results[0].score < output.results[1].score);
        // One strict query per section, no fallback needed
        assert_eq!(index.queries.load(Ordering::SeqCst), 2);
        assert_eq!(*index.requested.lock().unwrap(), vec![15, 15]);
    }

    #[tokio::test]
    async fn test_fallback_tags_target_section() {
        let index = FakeIndex::new(vec![
            passage("para_0010", "General"),
            passage("para_0011", "Retrievers"),
            passage("para_0012", "General"),
        ]);
        let retriever = SectionRetriever::new(index.clone(), &config(5)).unwrap();

        let output = retriever.retrieve_for_plan(&plan(&["Generators"])).await.unwrap();

        assert_eq!(output.results.len(), 3);
        for result in &output.results {
            assert_eq!(result.retrieved_from, "Generators");
        }
        // True section labels are preserved
        assert_eq!(output.results[1].section, "Retrievers");
        assert_eq!(index.queries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fallback_capped_at_top_k() {
        let index = FakeIndex::new((0..10).map(|i| passage(&format!("para_{:04}", i), "General")).collect());
        let retriever = SectionRetriever::new(index, &config(2)).unwrap();

        let output = retriever.retrieve_for_plan(&plan(&["Generators"])).await.unwrap();
        let ids: Vec<&str> = output.results.iter().map(|r| r.passage_id.as_str()).collect();
        assert_eq!(ids, vec!["para_0000", "para_0001"]);
    }

    #[tokio::test]
    async fn test_strict_stage_only_sees_candidate_window() {
        // With top_k = 1 only 3 candidates are fetched; the matching passage is 4th
        let index = FakeIndex::new(vec![
            passage("para_0000", "General"),
            passage("para_0001", "General"),
            passage("para_0002", "General"),
            passage("para_0003", "Retrievers"),
        ]);
        let retriever = SectionRetriever::new(index, &config(1)).unwrap();

        let output = retriever.retrieve_for_plan(&plan(&["Retrievers"])).await.unwrap();
        assert_eq!(output.results.len(), 1);
        assert_eq!(output.results[0].passage_id, "para_0000");
        assert_eq!(output.results[0].retrieved_from, "Retrievers");
    }

    #[tokio::test]
    async fn test_duplicates_across_sections_are_kept() {
        let index = FakeIndex::new(vec![passage("para_0005", "Fully managed RAG options")]);
        let retriever = SectionRetriever::new(index, &config(5)).unwrap();

        let output = retriever
            .retrieve_for_plan(&plan(&["Fully managed", "RAG options"]))
            .await
            .unwrap();

        assert_eq!(output.results.len(), 2);
        assert_eq!(output.results[0].passage_id, output.results[1].passage_id);
        assert_eq!(output.results[0].retrieved_from, "Fully managed");
        assert_eq!(output.results[1].retrieved_from, "RAG options");
    }

    #[tokio::test]
    async fn test_strict_only_stages_skip_section() {
        let index = FakeIndex::new(vec![passage("para_0000", "General")]);
        let retriever = SectionRetriever::new(index.clone(), &config(5))
            .unwrap()
            .with_stages(vec![RetrievalStage::SectionMatch]);

        let output = retriever.retrieve_for_plan(&plan(&["Generators"])).await.unwrap();
        assert!(output.is_empty());
        assert_eq!(index.queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_strict_stage_truncates_to_top_k() {
        let index = FakeIndex::new(vec![
            passage("para_0000", "Retrievers"),
            passage("para_0001", "General"),
            passage("para_0002", "Retrievers"),
            passage("para_0003", "Retrievers"),
            passage("para_0004", "Generators"),
            passage("para_0005", "Retrievers"),
            passage("para_0006", "General"),
            passage("para_0007", "Retrievers"),
            passage("para_0008", "General"),
        ]);
        let retriever = SectionRetriever::new(index.clone(), &config(2)).unwrap();

        let output = retriever.retrieve_for_plan(&plan(&["Retrievers"])).await.unwrap();

        let ids: Vec<&str> = output.results.iter().map(|r| r.passage_id.as_str()).collect();
        assert_eq!(ids, vec!["para_0000", "para_0002"]);
        assert!(output.results.iter().all(|r| r.section == "Retrievers"));
        // Strict stage matched, so no fallback query
        assert_eq!(*index.requested.lock().unwrap(), vec![6]);
    }

    #[test]
    fn test_zero_counts_rejected() {
        let index = FakeIndex::new(vec![passage("para_0000", "General")]);

        let err = SectionRetriever::new(index.clone(), &config(0)).err().unwrap();
        assert!(err.is_configuration());

        let no_candidates = RetrievalConfig {
            top_k: 5,
            candidate_multiplier: 0,
        };
        let err = SectionRetriever::new(index, &no_candidates).err().unwrap();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_connect_rejects_zero_top_k_before_querying() {
        let index = FakeIndex::new(vec![passage("para_0000", "General")]);
        let result = SectionRetriever::connect(index.clone(), &config(0)).await;
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(index.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_index() {
        let result = SectionRetriever::connect(FakeIndex::new(Vec::new()), &config(5)).await;
        assert!(matches!(result, Err(Error::EmptyIndex(_))));
    }

    #[tokio::test]
    async fn test_index_failure_propagates() {
        let retriever = SectionRetriever::connect(Arc::new(UnreachableIndex), &config(5))
            .await
            .unwrap();
        let result = retriever.retrieve_for_plan(&plan(&["Retrievers"])).await;
        assert!(matches!(result, Err(Error::VectorIndex(_))));
    }
}

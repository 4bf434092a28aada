//! Planner → Retriever → Synthesizer → Generator call chain

use std::sync::Arc;
use std::time::Instant;

use crate::config::RagConfig;
use crate::error::Result;
use crate::providers::{LlmProvider, VectorIndexProvider};
use crate::retrieval::{RetrievalPlanner, SectionRetriever, StaticSectionPlanner};
use crate::synthesis::EvidenceSynthesizer;
use crate::types::{PipelineAnswer, RetrievalOutput, RetrievalPlan};

/// Generator-free half of the pipeline: plan, retrieve, synthesize
///
/// Needs only the vector index, so it serves `retrieve`/`evidence` style
/// requests without LLM credentials.
pub struct EvidencePipeline {
    planner: Box<dyn RetrievalPlanner>,
    retriever: SectionRetriever,
    synthesizer: EvidenceSynthesizer,
}

impl EvidencePipeline {
    pub fn new(
        planner: Box<dyn RetrievalPlanner>,
        retriever: SectionRetriever,
        synthesizer: EvidenceSynthesizer,
    ) -> Self {
        Self {
            planner,
            retriever,
            synthesizer,
        }
    }

    /// Build the default stages for `config` around an opened index
    ///
    /// Fails if the config is invalid or the index is empty.
    pub async fn from_config(config: &RagConfig, index: Arc<dyn VectorIndexProvider>) -> Result<Self> {
        config.validate()?;

        Ok(Self::new(
            Box::new(StaticSectionPlanner::from_config(&config.planner)),
            SectionRetriever::connect(index, &config.retrieval).await?,
            EvidenceSynthesizer::new(config.corpus.clone()),
        ))
    }

    pub fn plan(&self, query: &str) -> RetrievalPlan {
        self.planner.plan(query)
    }

    /// Plan and retrieve without synthesis
    pub async fn retrieve(&self, query: &str) -> Result<(RetrievalPlan, RetrievalOutput)> {
        let plan = self.plan(query);
        let retrieval = self.retriever.retrieve_for_plan(&plan).await?;
        Ok((plan, retrieval))
    }

    /// Plan, retrieve and synthesize the evidence document
    pub async fn evidence(&self, query: &str) -> Result<(RetrievalPlan, RetrievalOutput, String)> {
        let (plan, retrieval) = self.retrieve(query).await?;
        let evidence = self.synthesizer.synthesize(&retrieval.query, &retrieval.results);
        Ok((plan, retrieval, evidence))
    }
}

/// Grounded question-answering pipeline over a single indexed document
///
/// Holds no per-query state; one instance can serve queries one after another
/// or be shared behind an `Arc`.
pub struct QaPipeline {
    evidence: EvidencePipeline,
    llm: Arc<dyn LlmProvider>,
}

impl QaPipeline {
    pub fn new(evidence: EvidencePipeline, llm: Arc<dyn LlmProvider>) -> Self {
        Self { evidence, llm }
    }

    /// Build the default pipeline for `config` around an opened index
    ///
    /// Fails if the index is empty.
    pub async fn from_config(
        config: &RagConfig,
        index: Arc<dyn VectorIndexProvider>,
        llm: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        Ok(Self::new(EvidencePipeline::from_config(config, index).await?, llm))
    }

    /// Answer `query` from retrieved evidence
    ///
    /// The generator always receives the evidence document as its context,
    /// including the refusal document produced when nothing was retrieved.
    pub async fn answer(&self, query: &str) -> Result<PipelineAnswer> {
        let start = Instant::now();

        let (plan, retrieval, evidence) = self.evidence.evidence(query).await?;

        tracing::info!(
            "Synthesized evidence from {} passages; generating with {}",
            retrieval.results.len(),
            self.llm.name()
        );
        let answer = self.llm.generate(query, &evidence).await?;

        let processing_time_ms = start.elapsed().as_millis() as u64;
        tracing::info!("Answered in {}ms", processing_time_ms);

        Ok(PipelineAnswer {
            plan,
            retrieval,
            evidence,
            answer,
            processing_time_ms,
        })
    }
}

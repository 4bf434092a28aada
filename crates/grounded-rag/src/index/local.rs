//! Brute-force cosine index persisted as a JSON file

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorIndexProvider};
use crate::types::{IndexHit, Passage};

/// A passage together with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub passage: Passage,
    pub embedding: Vec<f32>,
}

/// On-disk layout of the index file
#[derive(Serialize, Deserialize)]
struct IndexFile {
    /// Embedding provider that produced the vectors
    embedder: String,
    dimensions: usize,
    entries: Vec<IndexEntry>,
}

/// Local vector index keyed by passage ID
///
/// The index is read-only while serving; it is rebuilt out-of-band with
/// [`LocalVectorIndex::build`] and written with [`LocalVectorIndex::save`].
pub struct LocalVectorIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    entries: Vec<IndexEntry>,
    label: String,
}

impl LocalVectorIndex {
    /// Create an index from already-embedded entries
    pub fn from_entries(entries: Vec<IndexEntry>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            entries,
            label: "in-memory".to_string(),
        }
    }

    /// Embed every passage and build a fresh index
    ///
    /// `on_batch` is called with the number of passages embedded after each batch.
    pub async fn build<F>(
        passages: Vec<Passage>,
        embedder: Arc<dyn EmbeddingProvider>,
        batch_size: usize,
        mut on_batch: F,
    ) -> Result<Self>
    where
        F: FnMut(usize),
    {
        tracing::info!(
            "Embedding {} passages with {} ({} dims)",
            passages.len(),
            embedder.name(),
            embedder.dimensions()
        );

        let mut entries = Vec::with_capacity(passages.len());
        for batch in passages.chunks(batch_size.max(1)) {
            let texts: Vec<String> = batch.iter().map(|p| p.text.clone()).collect();
            let embeddings = embedder.embed_batch(&texts).await?;

            if embeddings.len() != batch.len() {
                return Err(Error::embedding(format!(
                    "Expected {} embeddings, got {}",
                    batch.len(),
                    embeddings.len()
                )));
            }

            entries.extend(
                batch
                    .iter()
                    .cloned()
                    .zip(embeddings)
                    .map(|(passage, embedding)| IndexEntry { passage, embedding }),
            );
            on_batch(batch.len());
        }

        Ok(Self::from_entries(entries, embedder))
    }

    /// Open a previously saved index
    pub async fn open(path: impl AsRef<Path>, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::vector_index(format!("Failed to read index '{}': {}", path.display(), e))
        })?;
        let file: IndexFile = serde_json::from_str(&content)?;

        if file.dimensions != embedder.dimensions() {
            return Err(Error::Config(format!(
                "Index '{}' was built with {} dimensions but embedder '{}' produces {}",
                path.display(),
                file.dimensions,
                embedder.name(),
                embedder.dimensions()
            )));
        }

        tracing::info!(
            "Loaded vector index '{}' with {} passages",
            path.display(),
            file.entries.len()
        );

        Ok(Self {
            embedder,
            entries: file.entries,
            label: path.display().to_string(),
        })
    }

    /// Write the index to `path`, replacing any previous index
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = IndexFile {
            embedder: self.embedder.name().to_string(),
            dimensions: self.embedder.dimensions(),
            entries: self.entries.clone(),
        };
        tokio::fs::write(path, serde_json::to_string(&file)?).await?;

        tracing::info!("Saved {} passages to {}", self.entries.len(), path.display());
        Ok(())
    }

    /// Indexed entries in insertion order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Rank all entries by cosine distance to `embedding`
    fn nearest(&self, embedding: &[f32], k: usize) -> Vec<IndexHit> {
        let mut hits: Vec<IndexHit> = self
            .entries
            .iter()
            .map(|entry| IndexHit {
                passage: entry.passage.clone(),
                distance: 1.0 - cosine_similarity(embedding, &entry.embedding),
            })
            .collect();

        // Stable sort keeps ingestion order for equal distances
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        hits
    }
}

#[async_trait]
impl VectorIndexProvider for LocalVectorIndex {
    async fn query(&self, text: &str, k: usize) -> Result<Vec<IndexHit>> {
        let embedding = self.embedder.embed(text).await?;
        let hits = self.nearest(&embedding, k);
        tracing::debug!("Index query returned {} of {} requested hits", hits.len(), k);
        Ok(hits)
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.entries.len())
    }

    fn name(&self) -> &str {
        &self.label
    }
}

/// Cosine similarity between two vectors (0.0 when either is zero)
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOCAB: &[&str] = &["kendra", "bedrock", "custom", "managed"];

    /// Bag-of-keywords embedder: one dimension per vocabulary word
    struct KeywordEmbedder;

    #[async_trait]
    impl EmbeddingProvider for KeywordEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let lower = text.to_lowercase();
            Ok(VOCAB
                .iter()
                .map(|word| lower.matches(word).count() as f32)
                .collect())
        }

        fn dimensions(&self) -> usize {
            VOCAB.len()
        }

        fn name(&self) -> &str {
            "keywords"
        }
    }

    fn passages() -> Vec<Passage> {
        vec![
            Passage::new("para_0000", "Amazon Kendra is an intelligent search service", "Retrievers", 4),
            Passage::new("para_0001", "Amazon Bedrock hosts foundation models", "Generators", 5),
            Passage::new("para_0002", "Custom RAG pipelines give custom control", "Custom RAG architectures", 9),
        ]
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn test_query_orders_by_ascending_distance() {
        let index = LocalVectorIndex::build(passages(), Arc::new(KeywordEmbedder), 2, |_| {})
            .await
            .unwrap();

        let hits = index.query("Which custom options exist?", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].passage.passage_id, "para_0002");
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[tokio::test]
    async fn test_build_reports_progress() {
        let mut embedded = 0;
        let index = LocalVectorIndex::build(passages(), Arc::new(KeywordEmbedder), 2, |n| embedded += n)
            .await
            .unwrap();
        assert_eq!(embedded, 3);
        assert_eq!(index.len().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_save_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("index.json");

        let index = LocalVectorIndex::build(passages(), Arc::new(KeywordEmbedder), 32, |_| {})
            .await
            .unwrap();
        index.save(&path).await.unwrap();

        let reopened = LocalVectorIndex::open(&path, Arc::new(KeywordEmbedder)).await.unwrap();
        assert_eq!(reopened.len().await.unwrap(), 3);
        assert_eq!(reopened.entries()[1].passage.passage_id, "para_0001");

        let hits = reopened.query("kendra", 1).await.unwrap();
        assert_eq!(hits[0].passage.section, "Retrievers");
    }

    #[tokio::test]
    async fn test_missing_index_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = LocalVectorIndex::open(dir.path().join("absent.json"), Arc::new(KeywordEmbedder)).await;
        assert!(matches!(result, Err(Error::VectorIndex(_))));
    }
}

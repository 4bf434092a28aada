//! JSON-backed passage store

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Passage;

/// Ordered passage list keyed by stable passage ID
#[derive(Debug, Clone, Default)]
pub struct PassageStore {
    passages: Vec<Passage>,
}

impl PassageStore {
    /// Wrap an ingested passage list, rejecting duplicate IDs
    pub fn new(passages: Vec<Passage>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for passage in &passages {
            if !seen.insert(passage.passage_id.as_str()) {
                return Err(Error::ingestion(
                    "passage store",
                    format!("Duplicate passage ID '{}'", passage.passage_id),
                ));
            }
        }
        Ok(Self { passages })
    }

    /// Load a passage list written by [`PassageStore::save`]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::new(serde_json::from_str(&content)?)
    }

    /// Write the passage list as pretty-printed JSON
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, serde_json::to_string_pretty(&self.passages)?).await?;
        tracing::info!("Saved {} passages to {}", self.passages.len(), path.display());
        Ok(())
    }

    /// Look up a passage by ID
    pub fn get(&self, passage_id: &str) -> Option<&Passage> {
        self.passages.iter().find(|p| p.passage_id == passage_id)
    }

    pub fn into_passages(self) -> Vec<Passage> {
        self.passages
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = PassageStore::new(vec![
            Passage::new("para_0000", "a", "General", 1),
            Passage::new("para_0000", "b", "General", 1),
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("passages.json");

        let store = PassageStore::new(vec![
            Passage::new("para_0000", "Amazon Kendra is a search service", "Retrievers", 2),
            Passage::new("para_0001", "General introduction to the guide", "General", 1),
        ])
        .unwrap();
        store.save(&path).await.unwrap();

        let loaded = PassageStore::load(&path).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("para_0000").unwrap().section, "Retrievers");
        assert!(loaded.get("para_9999").is_none());
    }
}

//! Vector index provider trait for nearest-neighbour passage search

use async_trait::async_trait;
use crate::error::Result;
use crate::types::IndexHit;

/// Read-only similarity search over embedded passages
///
/// Implementations:
/// - `LocalVectorIndex`: file-backed brute-force cosine index
#[async_trait]
pub trait VectorIndexProvider: Send + Sync {
    /// Return up to `k` passages nearest to `text`, ordered by ascending distance
    async fn query(&self, text: &str, k: usize) -> Result<Vec<IndexHit>>;

    /// Get total number of passages stored
    async fn len(&self) -> Result<usize>;

    /// Check if index is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Get provider name for logging
    fn name(&self) -> &str;
}

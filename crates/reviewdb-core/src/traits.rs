use async_trait::async_trait;

use crate::types::{Document, ScoredDocument};

/// Maps text to fixed-length vectors. Every vector returned for one
/// `model_id` has exactly `dim()` components.
#[async_trait]
pub trait Embedder: Send + Sync {
    fn model_id(&self) -> &str;
    fn dim(&self) -> usize;
    async fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

/// Persistent document index with nearest-neighbour lookup.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Add `documents` under the parallel `ids` in one bulk operation.
    async fn add_documents(&self, documents: &[Document], ids: &[String]) -> anyhow::Result<()>;
    async fn count(&self) -> anyhow::Result<usize>;
    /// Up to `k` documents closest to `query`, best first.
    async fn similarity_search(&self, query: &str, k: usize) -> anyhow::Result<Vec<ScoredDocument>>;
}

use anyhow::Result;
use tracing::debug;

use reviewdb_core::traits::DocumentStore;
use reviewdb_core::types::{Document, ScoredDocument};

pub const DEFAULT_TOP_K: usize = 3;

/// Query settings fixed for the lifetime of a retriever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { k: DEFAULT_TOP_K }
    }
}

impl SearchConfig {
    pub fn k(&self) -> usize {
        self.k
    }
}

/// Read-only query handle over a document store.
pub struct Retriever<S> {
    store: S,
    config: SearchConfig,
}

impl<S: DocumentStore> Retriever<S> {
    pub fn new(store: S, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub async fn retrieve(&self, query: &str) -> Result<Vec<Document>> {
        Ok(self.retrieve_with_scores(query).await?.into_iter().map(|hit| hit.document).collect())
    }

    /// Ranked hits with the store's distance. Never more than `k`.
    pub async fn retrieve_with_scores(&self, query: &str) -> Result<Vec<ScoredDocument>> {
        let mut hits = self.store.similarity_search(query, self.config.k).await?;
        hits.truncate(self.config.k);
        debug!(query, hits = hits.len(), "retrieved");
        Ok(hits)
    }
}

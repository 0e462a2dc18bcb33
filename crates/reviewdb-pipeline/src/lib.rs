//! reviewdb-pipeline
//!
//! Wires the review table, the existence-gated loader and the retriever
//! factory into one run: load the table, populate the store if its directory
//! did not exist yet, and hand back a retriever over the store.

use anyhow::Result;
use tracing::info;

use reviewdb_core::config::AppConfig;
use reviewdb_core::table::ReviewTable;
pub use reviewdb_core::traits::{DocumentStore, Embedder};
use reviewdb_vector::{parse_distance, LanceReviewStore};

pub mod loader;
pub mod manifest;
pub mod retriever;

pub use loader::{ExistenceGatedLoader, IndexState, IngestOutcome};
pub use manifest::IngestManifest;
pub use retriever::{Retriever, SearchConfig, DEFAULT_TOP_K};

pub struct Pipeline {
    pub outcome: IngestOutcome,
    pub retriever: Retriever<LanceReviewStore>,
}

pub async fn run(settings: &AppConfig, embedder: Box<dyn Embedder>) -> Result<Pipeline> {
    let table = ReviewTable::load(&settings.reviews_csv_path())?;
    let db_path = settings.db_path();
    let loader = ExistenceGatedLoader::probe(&db_path, &settings.store.collection, embedder.model_id());
    info!(path = %db_path.display(), state = ?loader.state(), "probed review store");

    let distance = parse_distance(&settings.store.distance)?;
    let store = LanceReviewStore::open(&db_path, &settings.store.collection, distance, embedder)
        .await?
        .with_batch_size(settings.embedding.batch_size);
    let outcome = loader.load(&table, &store).await?;

    let retriever = Retriever::new(store, SearchConfig::default());
    Ok(Pipeline { outcome, retriever })
}

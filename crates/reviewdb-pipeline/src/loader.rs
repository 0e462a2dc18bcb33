//! Populate the store once.
//!
//! Whether ingestion runs is decided a single time, from the existence of the
//! store directory, before anything opens or writes to it. An existing
//! directory is trusted as-is.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use reviewdb_core::mapper::map_table;
use reviewdb_core::table::ReviewTable;
use reviewdb_core::traits::DocumentStore;

use crate::manifest::IngestManifest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    Absent,
    Present,
}

impl IndexState {
    pub fn probe(path: &Path) -> Self {
        if path.exists() { Self::Present } else { Self::Absent }
    }

    pub fn needs_ingest(self) -> bool {
        self == Self::Absent
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Ingested { documents: usize },
    Skipped { manifest: Option<IngestManifest> },
}

pub struct ExistenceGatedLoader {
    state: IndexState,
    db_path: PathBuf,
    collection: String,
    embedding_model: String,
}

impl ExistenceGatedLoader {
    /// Probe `db_path` now and remember the answer for the rest of the run.
    pub fn probe(db_path: &Path, collection: &str, embedding_model: &str) -> Self {
        Self::with_state(IndexState::probe(db_path), db_path, collection, embedding_model)
    }

    pub fn with_state(state: IndexState, db_path: &Path, collection: &str, embedding_model: &str) -> Self {
        Self {
            state,
            db_path: db_path.to_path_buf(),
            collection: collection.to_string(),
            embedding_model: embedding_model.to_string(),
        }
    }

    pub fn state(&self) -> IndexState {
        self.state
    }

    pub async fn load<S: DocumentStore + ?Sized>(&self, table: &ReviewTable, store: &S) -> Result<IngestOutcome> {
        if !self.state.needs_ingest() {
            let manifest = IngestManifest::read(&self.db_path).unwrap_or_else(|e| {
                warn!(path = %self.db_path.display(), error = %e, "unreadable ingest manifest, ignoring");
                None
            });
            match &manifest {
                Some(m) => info!(
                    path = %self.db_path.display(),
                    documents = m.documents,
                    completed_at = %m.completed_at,
                    "store already populated, skipping ingestion"
                ),
                None => warn!(
                    path = %self.db_path.display(),
                    "store directory exists without an ingest manifest; a previous run may be incomplete, skipping ingestion"
                ),
            }
            return Ok(IngestOutcome::Skipped { manifest });
        }

        let mapped = map_table(table)?;
        info!(documents = mapped.len(), collection = %self.collection, "ingesting review documents");
        store.add_documents(&mapped.documents, &mapped.ids).await?;

        let manifest = IngestManifest::new(&self.collection, &self.embedding_model, mapped.len());
        let written = manifest.write(&self.db_path)?;
        info!(manifest = %written.display(), "ingestion complete");
        Ok(IngestOutcome::Ingested { documents: mapped.len() })
    }
}

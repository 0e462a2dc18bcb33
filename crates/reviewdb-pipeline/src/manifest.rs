//! Completion marker written into the store directory once ingestion has
//! finished.
//!
//! The marker is written to a temp file in the same directory and renamed
//! into place, so readers see either no manifest or a complete one.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const MANIFEST_FILE: &str = "ingest-manifest.json";
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestManifest {
    pub format_version: u32,
    pub collection: String,
    pub embedding_model: String,
    pub documents: usize,
    pub completed_at: DateTime<Utc>,
}

impl IngestManifest {
    pub fn new(collection: &str, embedding_model: &str, documents: usize) -> Self {
        Self {
            format_version: MANIFEST_VERSION,
            collection: collection.to_string(),
            embedding_model: embedding_model.to_string(),
            documents,
            completed_at: Utc::now(),
        }
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(MANIFEST_FILE)
    }

    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        let target = Self::path_in(dir);
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error).with_context(|| format!("Failed to persist {}", target.display()))?;
        Ok(target)
    }

    /// `None` when no manifest has been written to `dir`.
    pub fn read(dir: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(dir);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        let manifest = serde_json::from_str(&raw).with_context(|| format!("Corrupt manifest {}", path.display()))?;
        Ok(Some(manifest))
    }
}

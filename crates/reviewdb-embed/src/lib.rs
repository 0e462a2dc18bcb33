//! Embedding backends for the review pipeline.
//!
//! The production backend talks to an Ollama server; `FakeEmbedder` gives
//! fast, deterministic vectors for tests and offline development.

use anyhow::Result;
use tracing::info;

use reviewdb_core::config::EmbeddingConfig;
use reviewdb_core::error::Error;
pub use reviewdb_core::traits::Embedder;

mod fake;
mod ollama;

pub use fake::FakeEmbedder;
pub use ollama::OllamaEmbedder;

/// Environment switch that forces the fake embedder regardless of config.
pub const FAKE_EMBEDDINGS_ENV: &str = "APP_USE_FAKE_EMBEDDINGS";

fn fake_forced() -> bool {
    std::env::var(FAKE_EMBEDDINGS_ENV)
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

pub fn get_default_embedder(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    if fake_forced() || config.provider == "fake" {
        info!(dim = config.dimension, "using FakeEmbedder");
        return Ok(Box::new(FakeEmbedder::new(config.dimension)));
    }
    match config.provider.as_str() {
        "ollama" => Ok(Box::new(OllamaEmbedder::new(config)?)),
        other => Err(Error::InvalidConfig(format!("unknown embedding provider '{other}'")).into()),
    }
}

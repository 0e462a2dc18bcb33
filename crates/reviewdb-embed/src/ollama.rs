//! Client for the Ollama `/api/embed` endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use reviewdb_core::config::EmbeddingConfig;
use reviewdb_core::error::Error;
use reviewdb_core::traits::Embedder;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

pub struct OllamaEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    dim: usize,
}

impl OllamaEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        let endpoint = format!("{}/api/embed", config.base_url.trim_end_matches('/'));
        Ok(Self { client, endpoint, model: config.model.clone(), dim: config.dimension })
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    fn model_id(&self) -> &str { &self.model }

    fn dim(&self) -> usize { self.dim }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!(model = %self.model, batch = texts.len(), "requesting embeddings");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest { model: &self.model, input: texts })
            .send()
            .await
            .with_context(|| format!("Failed POST {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!("{} returned {status}: {body}", self.endpoint)).into());
        }

        let parsed: EmbedResponse = response.json().await.context("Malformed embed response")?;
        if parsed.embeddings.len() != texts.len() {
            return Err(Error::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            ))
            .into());
        }
        if let Some(bad) = parsed.embeddings.iter().find(|v| v.len() != self.dim) {
            return Err(Error::Embedding(format!(
                "model '{}' returned dimension {}, configured {}",
                self.model,
                bad.len(),
                self.dim
            ))
            .into());
        }
        Ok(parsed.embeddings)
    }
}

//! Shared start-up and reporting for the reviewdb binaries.

use anyhow::Result;
use reviewdb_core::config::{AppConfig, Config};
use reviewdb_pipeline::{DocumentStore, IngestOutcome, Pipeline};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// `RUST_LOG` wins when set; otherwise reviewdb logs at info and lance stays quiet.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "info,lance=warn,lance_datafusion=warn,datafusion=warn"
    } else {
        "reviewdb_pipeline=info,reviewdb_vector=info,reviewdb_core=info,lance=error,lance_datafusion=error,datafusion=error,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();
}

pub fn load_settings() -> Result<AppConfig> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {e}"); e })?;
    config.settings()
}

/// Lines the indexer prints once the pipeline has run.
pub async fn index_report(pipeline: &Pipeline) -> Result<Vec<String>> {
    let outcome = match &pipeline.outcome {
        IngestOutcome::Ingested { documents } => format!("✅ Ingested {documents} review documents"),
        IngestOutcome::Skipped { manifest: Some(m) } => {
            format!("⏭️  Store already exists, ingested {} documents at {}", m.documents, m.completed_at)
        }
        IngestOutcome::Skipped { manifest: None } => {
            "⚠️  Store directory already exists, skipped ingestion (no manifest found)".to_string()
        }
    };
    let count = pipeline.retriever.store().count().await?;
    Ok(vec![outcome, format!("📊 Documents in store: {count}")])
}

//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nested keys, e.g. `APP_STORE__DB_LOCATION`).
//! Paths from configuration go through `expand_path` so `~` and `${VAR}` work.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::Error;

/// Distance metrics the vector store understands.
pub const DISTANCE_METRICS: [&str; 3] = ["l2", "cosine", "dot"];

/// Embedding providers known to `reviewdb-embed`.
pub const EMBEDDING_PROVIDERS: [&str; 2] = ["ollama", "fake"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub data: DataConfig,
    pub store: StoreConfig,
    pub embedding: EmbeddingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// CSV export of the review dataset.
    pub reviews_csv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Directory holding the persistent vector store. Its presence at startup
    /// is what decides whether ingestion runs.
    pub db_location: String,
    pub collection: String,
    pub distance: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub model: String,
    pub base_url: String,
    pub dimension: usize,
    pub batch_size: usize,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig { reviews_csv: "Amazon_Unlocked_Mobile.csv".to_string() },
            store: StoreConfig {
                db_location: "./reviews_lancedb".to_string(),
                collection: "mobile_phone_reviews".to_string(),
                distance: "l2".to_string(),
            },
            embedding: EmbeddingConfig::default(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            model: "mxbai-embed-large".to_string(),
            base_url: "http://localhost:11434".to_string(),
            dimension: 1024,
            batch_size: 64,
            timeout_secs: 120,
        }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    /// Wrap an already assembled figment; used by tests and embedders of the library.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract and validate the typed application settings.
    pub fn settings(&self) -> anyhow::Result<AppConfig> {
        let settings: AppConfig = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.store.collection.trim().is_empty() {
            return Err(Error::InvalidConfig("store.collection must not be empty".into()));
        }
        if !DISTANCE_METRICS.contains(&self.store.distance.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "store.distance must be one of {:?}, got '{}'",
                DISTANCE_METRICS, self.store.distance
            )));
        }
        if !EMBEDDING_PROVIDERS.contains(&self.embedding.provider.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "embedding.provider must be one of {:?}, got '{}'",
                EMBEDDING_PROVIDERS, self.embedding.provider
            )));
        }
        if self.embedding.dimension == 0 {
            return Err(Error::InvalidConfig("embedding.dimension must be > 0".into()));
        }
        if self.embedding.batch_size == 0 {
            return Err(Error::InvalidConfig("embedding.batch_size must be > 0".into()));
        }
        Ok(())
    }

    pub fn reviews_csv_path(&self) -> PathBuf {
        expand_path(&self.data.reviews_csv)
    }

    pub fn db_path(&self) -> PathBuf {
        expand_path(&self.store.db_location)
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}


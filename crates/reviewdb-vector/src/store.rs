use anyhow::{anyhow, Result};
use arrow_array::types::Float32Type;
use arrow_array::{Array, FixedSizeListArray, Float32Array, Int64Array, RecordBatch, RecordBatchIterator, StringArray};
use async_trait::async_trait;
use futures::TryStreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use lancedb::query::{ExecutableQuery, QueryBase};
use lancedb::{connect, Connection, DistanceType};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use reviewdb_core::error::Error;
use reviewdb_core::traits::{DocumentStore, Embedder};
use reviewdb_core::types::{Document, ReviewMetadata, ScoredDocument};

use crate::schema::build_arrow_schema;

pub fn parse_distance(name: &str) -> Result<DistanceType> {
	match name {
		"l2" => Ok(DistanceType::L2),
		"cosine" => Ok(DistanceType::Cosine),
		"dot" => Ok(DistanceType::Dot),
		other => Err(Error::InvalidConfig(format!("unknown distance '{other}'")).into()),
	}
}

/// Review collection persisted as a LanceDB table under `path`.
pub struct LanceReviewStore {
	db: Connection,
	path: PathBuf,
	collection: String,
	distance: DistanceType,
	embedder: Box<dyn Embedder>,
	dim: i32,
	batch_size: usize,
}

impl LanceReviewStore {
	pub async fn open(path: &Path, collection: &str, distance: DistanceType, embedder: Box<dyn Embedder>) -> Result<Self> {
		let dim = i32::try_from(embedder.dim()).map_err(|_| anyhow!("embedding dimension {} too large", embedder.dim()))?;
		let db = connect(path.to_string_lossy().as_ref()).execute().await?;
		debug!(path = %path.display(), collection, model = embedder.model_id(), "opened review store");
		Ok(Self { db, path: path.to_path_buf(), collection: collection.to_string(), distance, embedder, dim, batch_size: 64 })
	}

	/// Texts sent to the embedder per request while bulk loading.
	#[must_use]
	pub fn with_batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = batch_size.max(1);
		self
	}

	pub fn path(&self) -> &Path { &self.path }

	pub fn collection(&self) -> &str { &self.collection }

	pub fn embedder_id(&self) -> &str { self.embedder.model_id() }

	pub async fn table_exists(&self) -> Result<bool> {
		Ok(self.db.table_names().execute().await?.contains(&self.collection))
	}

	fn progress_bar(&self, len: usize) -> Result<ProgressBar> {
		let pb = ProgressBar::new(len as u64);
		pb.set_style(ProgressStyle::default_bar().template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} documents ({percent}%) {msg}")?.progress_chars("#>-"));
		Ok(pb)
	}

	fn docs_to_record_batch(&self, docs: &[Document], ids: &[String], vectors: Vec<Vec<f32>>) -> Result<RecordBatch> {
		let contents: Vec<&str> = docs.iter().map(|d| d.content.as_str()).collect();
		let ratings: Vec<i64> = docs.iter().map(|d| d.metadata.rating).collect();
		let dates: Vec<&str> = docs.iter().map(|d| d.metadata.date.as_str()).collect();
		let vectors = vectors.into_iter().map(|v| Some(v.into_iter().map(Some)));
		Ok(RecordBatch::try_new(build_arrow_schema(self.dim), vec![
			Arc::new(StringArray::from(ids.to_vec())),
			Arc::new(StringArray::from(contents)),
			Arc::new(Int64Array::from(ratings)),
			Arc::new(StringArray::from(dates)),
			Arc::new(FixedSizeListArray::from_iter_primitive::<Float32Type, _, _>(vectors, self.dim)),
		])?)
	}

	fn batch_to_scored(batch: &RecordBatch) -> Result<Vec<ScoredDocument>> {
		let ids = string_column(batch, "id")?;
		let contents = string_column(batch, "content")?;
		let dates = string_column(batch, "date")?;
		let ratings = batch.column_by_name("rating").and_then(|c| c.as_any().downcast_ref::<Int64Array>()).ok_or_else(|| anyhow!("rating column missing"))?;
		let distances = batch.column_by_name("_distance").and_then(|c| c.as_any().downcast_ref::<Float32Array>());
		Ok((0..batch.num_rows())
			.map(|i| ScoredDocument {
				document: Document {
					id: ids.value(i).to_string(),
					content: contents.value(i).to_string(),
					metadata: ReviewMetadata { rating: ratings.value(i), date: dates.value(i).to_string() },
				},
				distance: distances.filter(|d| d.is_valid(i)).map_or(0.0, |d| d.value(i)),
			})
			.collect())
	}
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
	batch.column_by_name(name).and_then(|c| c.as_any().downcast_ref::<StringArray>()).ok_or_else(|| anyhow!("{name} column missing"))
}

#[async_trait]
impl DocumentStore for LanceReviewStore {
	async fn add_documents(&self, documents: &[Document], ids: &[String]) -> Result<()> {
		if documents.len() != ids.len() {
			return Err(Error::Operation(format!("{} documents but {} ids", documents.len(), ids.len())).into());
		}
		if documents.is_empty() { info!("No documents to index"); return Ok(()); }
		info!(documents = documents.len(), collection = %self.collection, "embedding documents");
		let pb = self.progress_bar(documents.len())?;
		let mut batches = Vec::new();
		for (docs, doc_ids) in documents.chunks(self.batch_size).zip(ids.chunks(self.batch_size)) {
			let texts: Vec<String> = docs.iter().map(|d| d.content.clone()).collect();
			let vectors = self.embedder.embed_batch(&texts).await?;
			if vectors.len() != docs.len() || vectors.iter().any(|v| v.len() != self.embedder.dim()) {
				return Err(Error::Embedding(format!("embedder '{}' returned malformed vectors", self.embedder.model_id())).into());
			}
			batches.push(self.docs_to_record_batch(docs, doc_ids, vectors)?);
			pb.inc(docs.len() as u64);
		}
		pb.finish_with_message("embedded");

		// one write for the whole set
		let schema = build_arrow_schema(self.dim);
		let reader = Box::new(RecordBatchIterator::new(batches.into_iter().map(Ok::<_, arrow_schema::ArrowError>), schema));
		if self.table_exists().await? {
			self.db.open_table(&self.collection).execute().await?.add(reader).execute().await?;
		} else {
			self.db.create_table(&self.collection, reader).execute().await?;
		}
		info!(documents = documents.len(), collection = %self.collection, "stored documents");
		Ok(())
	}

	async fn count(&self) -> Result<usize> {
		if !self.table_exists().await? { return Ok(0); }
		Ok(self.db.open_table(&self.collection).execute().await?.count_rows(None).await?)
	}

	async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<ScoredDocument>> {
		if k == 0 || !self.table_exists().await? { return Ok(Vec::new()); }
		let query_vec = self.embedder.embed_batch(&[query.to_string()]).await?.into_iter().next().ok_or_else(|| anyhow!("embedder returned no vector for query"))?;
		let table = self.db.open_table(&self.collection).execute().await?;
		let mut stream = table.vector_search(query_vec)?.distance_type(self.distance).limit(k).execute().await?;
		let mut hits = Vec::new();
		while let Some(batch) = stream.try_next().await? {
			hits.extend(Self::batch_to_scored(&batch)?);
		}
		hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
		hits.truncate(k);
		Ok(hits)
	}
}

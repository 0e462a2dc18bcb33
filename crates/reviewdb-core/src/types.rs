//! Domain types shared by the mapper, the vector store and the retriever.

use serde::{Deserialize, Serialize};

pub type DocumentId = String;

/// One review row as read from the source table. `None` means the cell was
/// absent or held a missing-value marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRecord {
    pub product_name: Option<String>,
    pub brand_name: Option<String>,
    pub reviews: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub review_votes: Option<String>,
}

/// Structured metadata stored next to every document.
///
/// `date` holds the review-votes cell, not a calendar date. The key name is
/// kept as-is so stored metadata stays compatible with existing consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMetadata {
    pub rating: i64,
    pub date: String,
}

/// The unit that is embedded, stored and retrieved.
///
/// - `id`: zero-based source row position, unique within one ingestion run
/// - `content`: product, brand, review text and price joined by spaces
/// - `metadata`: rating and the review-votes value (see [`ReviewMetadata`])
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub content: String,
    pub metadata: ReviewMetadata,
}

/// A document returned by a similarity query. `distance` comes straight from
/// the store; lower is closer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub distance: f32,
}

//! Row-to-document mapping.
//!
//! Pure transformation: one [`Document`] and one id per table row, in row
//! order. Missing text cells become empty strings, a missing rating becomes 0
//! and a missing review-votes cell becomes an empty `date`.

use tracing::debug;

use crate::error::{Error, Result};
use crate::table::ReviewTable;
use crate::types::{Document, ReviewMetadata, ReviewRecord};

pub const PRODUCT_NAME: &str = "Product Name";
pub const BRAND_NAME: &str = "Brand Name";
pub const REVIEWS: &str = "Reviews";
pub const PRICE: &str = "Price";
pub const RATING: &str = "Rating";
pub const REVIEW_VOTES: &str = "Review Votes";

/// Documents and their ids, index-aligned.
#[derive(Debug, Clone, Default)]
pub struct MappedDocuments {
    pub documents: Vec<Document>,
    pub ids: Vec<String>,
}

impl MappedDocuments {
    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
}

struct Columns {
    product_name: usize,
    brand_name: usize,
    reviews: usize,
    price: usize,
    rating: usize,
    review_votes: usize,
}

impl Columns {
    fn resolve(table: &ReviewTable) -> Result<Self> {
        Ok(Self {
            product_name: table.column_index(PRODUCT_NAME)?,
            brand_name: table.column_index(BRAND_NAME)?,
            reviews: table.column_index(REVIEWS)?,
            price: table.column_index(PRICE)?,
            rating: table.column_index(RATING)?,
            review_votes: table.column_index(REVIEW_VOTES)?,
        })
    }

    fn record(&self, table: &ReviewTable, row: usize) -> ReviewRecord {
        let cell = |col: usize| table.value(row, col).map(str::to_string);
        ReviewRecord {
            product_name: cell(self.product_name),
            brand_name: cell(self.brand_name),
            reviews: cell(self.reviews),
            price: cell(self.price),
            rating: cell(self.rating),
            review_votes: cell(self.review_votes),
        }
    }
}

/// Map every row of `table`. Fails if any required column is absent or a
/// rating cell is not numeric.
pub fn map_table(table: &ReviewTable) -> Result<MappedDocuments> {
    let columns = Columns::resolve(table)?;
    let mut mapped = MappedDocuments {
        documents: Vec::with_capacity(table.len()),
        ids: Vec::with_capacity(table.len()),
    };
    for row in 0..table.len() {
        let document = map_record(row, &columns.record(table, row))?;
        mapped.ids.push(document.id.clone());
        mapped.documents.push(document);
    }
    debug!(documents = mapped.len(), "mapped review rows");
    Ok(mapped)
}

/// Build the document for the record at zero-based position `row`.
pub fn map_record(row: usize, record: &ReviewRecord) -> Result<Document> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let content = format!(
        "{} {} {} {}",
        text(&record.product_name),
        text(&record.brand_name),
        text(&record.reviews),
        text(&record.price)
    )
    .trim()
    .to_string();

    let rating = match record.rating.as_deref() {
        Some(raw) => parse_rating(raw).ok_or_else(|| Error::InvalidValue {
            column: RATING.to_string(),
            row,
            value: raw.to_string(),
        })?,
        None => 0,
    };

    Ok(Document {
        id: row.to_string(),
        content,
        metadata: ReviewMetadata { rating, date: text(&record.review_votes) },
    })
}

/// Integer part of a numeric rating ("4", "4.0" and "4.7" all give 4).
#[allow(clippy::cast_possible_truncation)]
fn parse_rating(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(v) = raw.parse::<i64>() {
        return Some(v);
    }
    let v = raw.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v.trunc() as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rating_truncates_toward_zero() {
        assert_eq!(parse_rating("4"), Some(4));
        assert_eq!(parse_rating("4.0"), Some(4));
        assert_eq!(parse_rating(" 3.9 "), Some(3));
        assert_eq!(parse_rating("-1.5"), Some(-1));
        assert_eq!(parse_rating("inf"), None);
        assert_eq!(parse_rating("five"), None);
    }

    #[test]
    fn map_record_keeps_interior_spacing() {
        let record = ReviewRecord {
            product_name: Some("Phone".into()),
            brand_name: None,
            reviews: Some("fine".into()),
            price: Some("5".into()),
            ..Default::default()
        };
        let doc = map_record(7, &record).expect("map");
        assert_eq!(doc.content, "Phone  fine 5");
        assert_eq!(doc.id, "7");
    }
}

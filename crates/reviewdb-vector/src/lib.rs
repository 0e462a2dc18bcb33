//! reviewdb-vector
//!
//! LanceDB-backed persistent review collection: Arrow schema, one-shot bulk
//! load with embedding, row count and nearest-neighbour search.

pub mod schema;
pub mod store;

pub use store::{parse_distance, LanceReviewStore};

//! reviewdb-core
//!
//! Configuration, error taxonomy, domain types and trait seams shared by the
//! review indexing pipeline, plus the CSV table loader and the pure
//! row-to-document mapper.

pub mod config;
pub mod error;
pub mod mapper;
pub mod table;
pub mod traits;
pub mod types;

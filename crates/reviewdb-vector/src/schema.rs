use arrow_schema::{DataType, Field, Schema};
use std::sync::Arc;

/// Arrow layout of a review collection. `vector` width follows the embedder.
pub fn build_arrow_schema(dim: i32) -> Arc<Schema> {
	Arc::new(Schema::new(vec![
		Field::new("id", DataType::Utf8, false),
		Field::new("content", DataType::Utf8, false),
		Field::new("rating", DataType::Int64, false),
		Field::new("date", DataType::Utf8, false),
		Field::new("vector", DataType::FixedSizeList(Arc::new(Field::new("item", DataType::Float32, true)), dim), true),
	]))
}

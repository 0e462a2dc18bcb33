use lancedb::DistanceType;
use reviewdb_core::traits::DocumentStore;
use reviewdb_core::types::{Document, ReviewMetadata};
use reviewdb_embed::FakeEmbedder;
use reviewdb_vector::{parse_distance, LanceReviewStore};
use tempfile::TempDir;

const DIM: usize = 64;

fn docs(contents: &[&str]) -> (Vec<Document>, Vec<String>) {
    let documents: Vec<Document> = contents
        .iter()
        .enumerate()
        .map(|(i, c)| Document {
            id: i.to_string(),
            content: (*c).to_string(),
            metadata: ReviewMetadata { rating: i64::try_from(i % 6).expect("rating"), date: format!("{i}") },
        })
        .collect();
    let ids = documents.iter().map(|d| d.id.clone()).collect();
    (documents, ids)
}

async fn open(tmp: &TempDir) -> LanceReviewStore {
    LanceReviewStore::open(&tmp.path().join("db"), "reviews_test", DistanceType::L2, Box::new(FakeEmbedder::new(DIM)))
        .await
        .expect("open store")
        .with_batch_size(3)
}

#[tokio::test]
async fn bulk_add_then_count_and_search() {
    let tmp = TempDir::new().expect("tmp");
    let store = open(&tmp).await;
    assert_eq!(store.count().await.expect("count"), 0);

    let (documents, ids) = docs(&[
        "Galaxy S5 Samsung battery lasts all day 199.99",
        "iPhone 6 Apple screen cracked quickly 350",
        "Moto G Motorola great value for money 120",
        "Lumia 520 Nokia slow but sturdy 60",
        "Xperia Z Sony waterproof and sleek 220",
    ]);
    store.add_documents(&documents, &ids).await.expect("add");
    assert_eq!(store.count().await.expect("count"), documents.len());

    let hits = store.similarity_search("Moto G Motorola great value for money 120", 3).await.expect("search");
    assert!(!hits.is_empty());
    assert!(hits.len() <= 3);
    assert_eq!(hits[0].document.id, "2");
    assert_eq!(hits[0].document.metadata, ReviewMetadata { rating: 2, date: "2".into() });
    for pair in hits.windows(2) { assert!(pair[0].distance <= pair[1].distance); }
}

#[tokio::test]
async fn search_never_exceeds_k() {
    let tmp = TempDir::new().expect("tmp");
    let store = open(&tmp).await;
    let contents: Vec<String> = (0..40).map(|i| format!("phone model {i} review text")).collect();
    let refs: Vec<&str> = contents.iter().map(String::as_str).collect();
    let (documents, ids) = docs(&refs);
    store.add_documents(&documents, &ids).await.expect("add");

    for k in [1, 3, 5] {
        let hits = store.similarity_search("phone review", k).await.expect("search");
        assert_eq!(hits.len(), k);
    }
}

#[tokio::test]
async fn search_on_empty_store_returns_nothing() {
    let tmp = TempDir::new().expect("tmp");
    let store = open(&tmp).await;
    assert!(store.similarity_search("anything", 3).await.expect("search").is_empty());
}

#[tokio::test]
async fn mismatched_ids_are_rejected() {
    let tmp = TempDir::new().expect("tmp");
    let store = open(&tmp).await;
    let (documents, _) = docs(&["a", "b"]);
    let err = store.add_documents(&documents, &["0".to_string()]).await.expect_err("mismatch");
    assert!(err.to_string().contains("2 documents but 1 ids"));
    assert_eq!(store.count().await.expect("count"), 0);
}

#[tokio::test]
async fn empty_add_is_a_noop() {
    let tmp = TempDir::new().expect("tmp");
    let store = open(&tmp).await;
    store.add_documents(&[], &[]).await.expect("add");
    assert!(!store.table_exists().await.expect("exists"));
}

#[test]
fn distance_names_parse() {
    assert!(parse_distance("l2").is_ok());
    assert!(parse_distance("cosine").is_ok());
    assert!(parse_distance("dot").is_ok());
    assert!(parse_distance("manhattan").is_err());
}

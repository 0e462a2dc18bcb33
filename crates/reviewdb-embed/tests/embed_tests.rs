use mockito::{Matcher, Server};
use reviewdb_core::config::EmbeddingConfig;
use reviewdb_embed::{get_default_embedder, Embedder, FakeEmbedder, OllamaEmbedder};

fn ollama_config(base_url: String, dimension: usize) -> EmbeddingConfig {
    EmbeddingConfig { base_url, dimension, timeout_secs: 5, ..EmbeddingConfig::default() }
}

#[tokio::test]
async fn fake_embedder_shapes_and_determinism() {
    let embedder = FakeEmbedder::new(1024);
    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).await.expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 1024, "embedding dim is 1024");

    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    for (a, b) in v1.iter().zip(v2.iter()) { assert!((a - b).abs() <= 1e-6); }
}

#[test]
fn fake_embedder_zero_dim_is_clamped() {
    let embedder = FakeEmbedder::new(0);
    assert_eq!(embedder.dim(), 1);
    let v = embedder.embed_text("battery lasts all day");
    assert_eq!(v.len(), 1);
    assert!((v[0] - 1.0).abs() <= 1e-6);
}

#[tokio::test]
async fn fake_provider_selected_from_config() {
    let config = EmbeddingConfig { provider: "fake".into(), dimension: 16, ..EmbeddingConfig::default() };
    let embedder = get_default_embedder(&config).expect("embedder");
    assert_eq!(embedder.dim(), 16);
    assert!(embedder.model_id().starts_with("fake:"));
}

#[test]
fn unknown_provider_is_rejected() {
    let config = EmbeddingConfig { provider: "word2vec".into(), ..EmbeddingConfig::default() };
    if std::env::var(reviewdb_embed::FAKE_EMBEDDINGS_ENV).is_ok() { return; }
    assert!(get_default_embedder(&config).is_err());
}

#[tokio::test]
async fn ollama_posts_model_and_input() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/embed")
        .match_body(Matcher::PartialJsonString(
            r#"{"model":"mxbai-embed-large","input":["a","b"]}"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"model":"mxbai-embed-large","embeddings":[[0.1,0.2,0.3],[0.4,0.5,0.6]]}"#)
        .create_async()
        .await;

    let embedder = OllamaEmbedder::new(&ollama_config(server.url(), 3)).expect("client");
    let out = embedder.embed_batch(&["a".to_string(), "b".to_string()]).await.expect("embed");

    mock.assert_async().await;
    assert_eq!(out.len(), 2);
    assert!((out[1][2] - 0.6).abs() < 1e-6);
}

#[tokio::test]
async fn ollama_dimension_mismatch_is_an_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/embed")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"embeddings":[[0.1,0.2]]}"#)
        .create_async()
        .await;

    let embedder = OllamaEmbedder::new(&ollama_config(server.url(), 3)).expect("client");
    let err = embedder.embed_batch(&["a".to_string()]).await.expect_err("mismatch");
    assert!(err.to_string().contains("dimension"));
}

#[tokio::test]
async fn ollama_error_status_surfaces() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/embed")
        .with_status(404)
        .with_body(r#"{"error":"model \"mxbai-embed-large\" not found"}"#)
        .create_async()
        .await;

    let embedder = OllamaEmbedder::new(&ollama_config(server.url(), 3)).expect("client");
    let err = embedder.embed_batch(&["a".to_string()]).await.expect_err("404");
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn ollama_skips_request_for_empty_batch() {
    let embedder = OllamaEmbedder::new(&ollama_config("http://127.0.0.1:9".into(), 3)).expect("client");
    assert!(embedder.embed_batch(&[]).await.expect("empty").is_empty());
}

use std::env;
use reviewdb_cli::{index_report, init_tracing, load_settings};
use reviewdb_embed::get_default_embedder;
use reviewdb_pipeline::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut verbose = false;
    for arg in &args { match arg.as_str() {
        "--verbose" | "-v" => verbose = true,
        "--help" | "-h" => { println!("Usage: reviewdb-indexer [--verbose]\nConfig: config.toml, config.<RUST_ENV>.toml, APP_* env vars"); return Ok(()); }
        other => { eprintln!("Error: unknown argument {other}"); std::process::exit(2); } } }
    init_tracing(verbose);

    let settings = load_settings()?;
    println!("Review Indexer\n==============");
    println!("Reviews CSV: {}", settings.reviews_csv_path().display());
    println!("Store: {} (collection {})", settings.db_path().display(), settings.store.collection);

    let embedder = get_default_embedder(&settings.embedding)?;
    println!("Embedder: {}", embedder.model_id());
    let pipeline = run(&settings, embedder).await?;
    println!();
    for line in index_report(&pipeline).await? { println!("{line}"); }
    println!("\n💡 To query, use: cargo run --bin reviewdb-search '<query>'");
    Ok(())
}

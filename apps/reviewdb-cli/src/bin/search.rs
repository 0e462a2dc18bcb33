use std::env;
use reviewdb_cli::{init_tracing, load_settings};
use reviewdb_embed::get_default_embedder;
use reviewdb_pipeline::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut verbose = false; let mut query = None;
    for arg in args.iter().skip(1) { match arg.as_str() {
        "--verbose" | "-v" => verbose = true,
        _ if !arg.starts_with('-') && query.is_none() => query = Some(arg.clone()),
        _ => {} } }
    let Some(query) = query else {
        eprintln!("Usage: {} <query> [--verbose]", args[0]);
        eprintln!("Example: {} 'battery life on samsung phones'", args[0]);
        std::process::exit(1);
    };
    init_tracing(verbose);

    let settings = load_settings()?;
    let embedder = get_default_embedder(&settings.embedding)?;
    let pipeline = run(&settings, embedder).await?;

    println!("🔍 reviewdb-search\n=================");
    println!("Query: {query}");
    let hits = pipeline.retriever.retrieve_with_scores(&query).await?;
    println!("\n🔍 Found {} results", hits.len());
    for (i, hit) in hits.iter().enumerate() {
        let doc = &hit.document;
        println!("\n  {}. distance={:.4}  id={}  rating={}  votes={}", i + 1, hit.distance, doc.id, doc.metadata.rating, doc.metadata.date);
        println!("     📝 {}", doc.content);
    }
    Ok(())
}

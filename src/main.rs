use std::{env, fs::File, io::{self, BufReader, Write}, process, time::Instant};

use item_based_recommender::{RecommendConfig, RecommendResult, Recommender, TagLinkReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn open_links(path: &str) -> RecommendResult<TagLinkReader<BufReader<File>>> {
    Ok(TagLinkReader::new(BufReader::new(File::open(path)?)))
}

fn run(profile_path: &str, candidate_path: &str) -> RecommendResult<()> {
    let config = RecommendConfig::from_env()?;
    info!(
        policy = ?config.selection_policy,
        weighting = ?config.weighting,
        max_recommended = config.max_recommended,
        threshold = ?config.similarity_threshold,
        "loaded configuration"
    );
    let engine = Recommender::from_config(&config)?;

    let start = Instant::now();
    let result = engine.recommend(open_links(profile_path)?, open_links(candidate_path)?)?;
    info!(selected = result.len(), elapsed = ?start.elapsed(), "recommendation finished");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &result)?;
    writeln!(out)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        let program = args.first().map(String::as_str).unwrap_or("item-based-recommender");
        eprintln!("usage: {} <liked-tag-links> <candidate-tag-links>", program);
        eprintln!("  each file holds one `item,tag` pair per line");
        process::exit(2);
    }

    if let Err(e) = run(&args[1], &args[2]) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

use std::env;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use askdoc_answer::AnswerComposer;
use askdoc_core::config::{expand_path, Config, Settings};
use askdoc_ingest::DocumentLoader;
use askdoc_search::SearchEngine;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <search|ask|stats> [args...]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn docs_dir(args: &[String], config: &Config) -> PathBuf {
    args.first().map(|s| expand_path(s)).unwrap_or_else(|| {
        let dir: String = config.get("data.docs_dir").unwrap_or_else(|_| "./docs".to_string());
        expand_path(dir)
    })
}

fn build_engine(folder: &Path, settings: &Settings) -> anyhow::Result<SearchEngine> {
    let loader = DocumentLoader::new(settings);
    let files = loader.supported_files(folder);
    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let mut chunks = Vec::new();
    for path in &files {
        bar.set_message(path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());
        match loader.load_file(path, chunks.len()) {
            Ok(file_chunks) => chunks.extend(file_chunks),
            Err(e) => warn!(error = %e, "skipping file"),
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    println!("Loaded {} chunks from {} files", chunks.len(), files.len());
    Ok(SearchEngine::new(chunks, settings.search.clone()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = Settings::from_config(&config);
    settings.validate()?;

    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "search" => {
            let folder = docs_dir(&args, &config);
            let query = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("Usage: askdoc search <folder> \"<query>\" [top_k]");
                std::process::exit(1)
            });
            let top_k = args
                .get(2)
                .and_then(|s| s.parse().ok())
                .unwrap_or(settings.search.max_results);
            let engine = build_engine(&folder, &settings)?;
            let results = engine.search(&query, top_k)?;
            if results.is_empty() {
                println!("No relevant results for \"{}\"", query);
            }
            for r in &results {
                println!("{:>2}. [{:.4}] {} ({})", r.rank, r.similarity, r.display_name, r.method.as_str());
            }
        }
        "ask" => {
            let folder = docs_dir(&args, &config);
            let query = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("Usage: askdoc ask <folder> \"<question>\"");
                std::process::exit(1)
            });
            let engine = build_engine(&folder, &settings)?;
            let results = engine.search(&query, settings.search.max_results)?;
            let composer = AnswerComposer::new(settings.answer.clone());
            println!("{}", composer.compose_answer(&query, &results));
        }
        "stats" => {
            let folder = docs_dir(&args, &config);
            let engine = build_engine(&folder, &settings)?;
            let stats = engine.index_stats();
            println!("corpus size:     {}", stats.corpus_size);
            println!("vocabulary size: {}", stats.vocabulary_size);
            println!("method:          {}", stats.method.as_str());
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}

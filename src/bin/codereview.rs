use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use code_review_engine::analysis::ast::language_for_extension;
use code_review_engine::analysis::review::{CodeReviewer, ReviewRequest};
use code_review_engine::config::{self, Config};
use code_review_engine::logging::init_tracing;
use code_review_engine::providers::{collect_advisory, Advisory, TextAdvisory};

/// Review a source file and print the score bundle as JSON
#[derive(Debug, Parser)]
#[command(name = "codereview", version, about)]
struct Cli {
    /// Source file to review; `-` or nothing reads stdin
    path: Option<PathBuf>,

    /// Language tag (defaults to the file extension, then the configured default)
    #[arg(short, long)]
    language: Option<String>,

    /// Recorded reviewer output (structured JSON or free text) to merge in
    #[arg(long)]
    advisory: Option<PathBuf>,

    /// JSON array of review requests to process in parallel instead of one file
    #[arg(long, conflicts_with = "path")]
    batch: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read source file {}", p.display())),
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read source from stdin")?;
            Ok(buffer)
        }
    }
}

fn resolve_language(cli: &Cli, cfg: &Config) -> String {
    if let Some(lang) = &cli.language {
        return lang.clone();
    }
    cli.path
        .as_deref()
        .and_then(|p| p.extension())
        .and_then(|ext| ext.to_str())
        .and_then(language_for_extension)
        .map(str::to_string)
        .unwrap_or_else(|| cfg.default_language.clone())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(value).context("Failed to serialize JSON")
    } else {
        serde_json::to_string(value).context("Failed to serialize JSON")
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut cfg = config::load_config();
    match cli.verbose {
        0 => {}
        1 => cfg.log_level = "info".to_string(),
        2 => cfg.log_level = "debug".to_string(),
        _ => cfg.log_level = "trace".to_string(),
    }
    init_tracing(&cfg)?;

    let pretty = cli.pretty || cfg.pretty;
    let reviewer = CodeReviewer::global();

    if let Some(batch_path) = &cli.batch {
        let text = std::fs::read_to_string(batch_path)
            .with_context(|| format!("Failed to read batch file {}", batch_path.display()))?;
        let requests: Vec<ReviewRequest> = serde_json::from_str(&text)
            .with_context(|| format!("Invalid batch file {}", batch_path.display()))?;
        tracing::info!(requests = requests.len(), "reviewing batch");
        let bundles = reviewer.review_batch(&requests);
        println!("{}", to_json(&bundles, pretty)?);
        return Ok(());
    }

    let source = read_source(cli.path.as_deref())?;
    let language = resolve_language(&cli, &cfg);

    let advisory: Option<Advisory> = match &cli.advisory {
        Some(path) => match TextAdvisory::from_path(path) {
            Ok(provider) => Some(collect_advisory(&provider, &source, &language)),
            Err(e) => {
                tracing::warn!(error = %e, "advisory unavailable");
                Some(Advisory::failed(e))
            }
        },
        None => None,
    };

    let bundle = reviewer.review(&source, &language, advisory.as_ref());
    println!("{}", to_json(&bundle, pretty)?);
    Ok(())
}

//! webdoc CLI
//!
//! Loads documents from web pages and/or a local directory and prints them
//! as a JSON array, the shape handed to the index builder.

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use webdoc_reader::{DirectoryReader, Document, ExtractorConfig, WebDocumentExtractor};

/// Turn web pages and local files into indexable documents
#[derive(Parser, Debug)]
#[command(name = "webdoc")]
#[command(version)]
#[command(about = "Extract documents from web pages for indexing")]
struct Args {
    /// URLs to fetch, in order
    urls: Vec<String>,

    /// Also load text, markdown and HTML files from this directory
    #[arg(short, long)]
    dir: Option<String>,

    /// Descend into subdirectories of --dir
    #[arg(short, long)]
    recursive: bool,

    /// Hostname used for strategy dispatch instead of each URL's own host
    #[arg(long)]
    hostname: Option<String>,

    /// HTTP Basic Authentication username
    #[arg(short, long, env = "WEBDOC_USERNAME")]
    username: Option<String>,

    /// HTTP Basic Authentication password
    #[arg(short, long, env = "WEBDOC_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    if args.urls.is_empty() && args.dir.is_none() {
        bail!("nothing to load: pass at least one URL or --dir");
    }

    let mut documents: Vec<Document> = Vec::new();

    if let Some(dir) = &args.dir {
        let reader = DirectoryReader::new(dir).recursive(args.recursive);
        documents.extend(
            reader
                .load_data()
                .with_context(|| format!("failed to load documents from {dir}"))?,
        );
    }

    if !args.urls.is_empty() {
        let config = ExtractorConfig::builder()
            .timeout_ms(args.timeout_secs.saturating_mul(1000))
            .build();
        let extractor = WebDocumentExtractor::with_config(None, config)?;
        let pages = extractor
            .load_data(
                args.urls.as_slice(),
                args.hostname.as_deref(),
                args.username.as_deref(),
                args.password.as_deref(),
            )
            .await
            .context("failed to load web documents")?;
        documents.extend(pages);
    }

    tracing::info!("Extracted {} document(s)", documents.len());

    let json = if args.pretty {
        serde_json::to_string_pretty(&documents)?
    } else {
        serde_json::to_string(&documents)?
    };
    println!("{json}");

    Ok(())
}

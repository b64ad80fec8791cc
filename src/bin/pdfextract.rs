//! CLI binary for adobe-pdf-extract.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractConfig` / `LoadOptions` and prints results.

use adobe_pdf_extract::{ExtractConfig, ExtractReader, LoadOptions};
use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic extraction (per-page text to stdout)
  pdfextract document.pdf

  # Write to a file
  pdfextract document.pdf -o document.txt

  # JSON output: [{"text": ..., "metadata": {"page_number": N}}, ...]
  pdfextract --json document.pdf > pages.json

  # Attach extra metadata to every page record
  pdfextract --json --extra source=quarterly-report document.pdf

  # Plain text only, no page markers or metadata
  pdfextract --no-page-metadata document.pdf

ENVIRONMENT VARIABLES:
  PDF_SERVICES_CLIENT_ID      OAuth server-to-server client id
  PDF_SERVICES_CLIENT_SECRET  OAuth server-to-server client secret
  PDF_SERVICES_BASE_URL       Override the service endpoint (regional/testing)

SETUP:
  1. Create credentials at https://developer.adobe.com/document-services/
  2. export PDF_SERVICES_CLIENT_ID=...  PDF_SERVICES_CLIENT_SECRET=...
  3. pdfextract document.pdf
"#;

/// Extract per-page text from a PDF using the Adobe PDF Services Extract API.
#[derive(Parser, Debug)]
#[command(
    name = "pdfextract",
    version,
    about = "Extract per-page text from PDF files using the Adobe PDF Services Extract API",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path.
    input: PathBuf,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// OAuth client id.
    #[arg(long, env = "PDF_SERVICES_CLIENT_ID", hide_env_values = true)]
    client_id: String,

    /// OAuth client secret.
    #[arg(long, env = "PDF_SERVICES_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Service endpoint override.
    #[arg(long, env = "PDF_SERVICES_BASE_URL")]
    base_url: Option<String>,

    /// Output page records as JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Omit the page_number entry from each record's metadata.
    #[arg(long)]
    no_page_metadata: bool,

    /// Extra metadata attached to every page record (repeatable, key=value).
    #[arg(long, value_name = "KEY=VALUE")]
    extra: Vec<String>,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, default_value_t = 60)]
    api_timeout: u64,

    /// Delay between job-status polls in milliseconds.
    #[arg(long, default_value_t = 2000)]
    poll_interval: u64,

    /// Overall job deadline in seconds.
    #[arg(long, default_value_t = 600)]
    poll_timeout: u64,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config and options ─────────────────────────────────────────
    let mut builder = ExtractConfig::builder()
        .client_id(&cli.client_id)
        .client_secret(&cli.client_secret)
        .api_timeout_secs(cli.api_timeout)
        .poll_interval_ms(cli.poll_interval)
        .poll_timeout_secs(cli.poll_timeout);
    if let Some(ref url) = cli.base_url {
        builder = builder.base_url(url);
    }
    let config = builder.build().context("Invalid configuration")?;

    let mut options = LoadOptions::new().include_page_metadata(!cli.no_page_metadata);
    if !cli.extra.is_empty() {
        options = options.extra_info(parse_extra(&cli.extra)?);
    }

    // ── Run extraction ───────────────────────────────────────────────────
    let reader = ExtractReader::with_config(config)?;
    let documents = reader
        .load_data_with(&cli.input, &options)
        .await
        .with_context(|| format!("Extraction failed for {}", cli.input.display()))?;

    let rendered = if cli.json {
        let mut json =
            serde_json::to_string_pretty(&documents).context("Failed to serialise output")?;
        json.push('\n');
        json
    } else {
        let mut text = String::new();
        for doc in &documents {
            text.push_str(&doc.text);
        }
        text
    };

    match cli.output {
        Some(ref path) => {
            tokio::fs::write(path, rendered.as_bytes())
                .await
                .with_context(|| format!("Failed to write output file {}", path.display()))?;
            if !cli.quiet {
                eprintln!("{} pages → {}", documents.len(), path.display());
            }
        }
        None => {
            io::stdout()
                .lock()
                .write_all(rendered.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Parse repeated `key=value` flags into a metadata map.
fn parse_extra(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut map = Map::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Invalid --extra '{pair}': expected KEY=VALUE"))?;
        map.insert(key.to_string(), Value::from(value.to_string()));
    }
    Ok(map)
}

//! Command line interface for the pharmpapers pipeline.
//!
//! Fetches research papers from PubMed and reports the ones with at least one
//! pharmaceutical/biotech company author, either as a console listing or as a
//! CSV file.
//!
//! # Usage
//!
//! ```bash
//! # Print qualifying papers to the console
//! pharmpapers "cancer immunotherapy"
//!
//! # Save them as CSV instead
//! pharmpapers "cancer immunotherapy" --file results.csv
//!
//! # Identify yourself to NCBI and raise the rate limit
//! pharmpapers "aspirin" -e you@example.com -k $NCBI_API_KEY
//! ```
//!
//! A run that finds zero qualifying papers is a successful run: it exits zero
//! after printing an explicit no-results message.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use clap::Parser;
use console::style;
use pharmpapers::{
  classify::KeywordSets,
  client::PubMedClient,
  error::PharmpapersError,
  export, format, paper,
  prelude::RecordSource,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub mod error;

use crate::error::*;

/// Prefix for informational status lines.
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success status lines.
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error status lines.
static ERROR_PREFIX: &str = "✗ ";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(
  author,
  version,
  about = "Fetch research papers from PubMed with pharmaceutical/biotech company authors"
)]
pub struct Cli {
  /// PubMed search query (supports full PubMed query syntax)
  query: String,

  /// Output file path to save results as CSV (prints to console when absent)
  #[arg(long, short)]
  file: Option<std::path::PathBuf>,

  /// Print debug information during execution
  #[arg(long, short)]
  debug: bool,

  /// Maximum number of papers to fetch
  #[arg(long, short, default_value_t = 500)]
  max_results: usize,

  /// Email address for the NCBI E-utilities API (required by NCBI)
  #[arg(long, short, default_value = "your.email@example.com")]
  email: String,

  /// NCBI API key to increase rate limits
  #[arg(long, short = 'k')]
  api_key: Option<String>,
}

/// Configures the logging system.
///
/// The `--debug` flag raises the default level to debug; `RUST_LOG` in the
/// environment overrides both.
fn setup_logging(debug: bool) {
  let default_filter = if debug { "pharmpapers=debug,pharmpapersd=debug" } else { "warn" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

  tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Entry point: search, fetch, assemble, filter, and render.
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.debug);
  debug!("Debug mode enabled");

  if !format::validate_email(&cli.email) {
    eprintln!(
      "{} Invalid email address {:?} for the NCBI API",
      style(ERROR_PREFIX).red(),
      cli.email
    );
    return Err(PharmpapersError::Config(format!("invalid email: {}", cli.email)).into());
  }

  let client = PubMedClient::new(cli.email, cli.api_key);

  println!("{} Searching PubMed for: {}", style(INFO_PREFIX).cyan(), style(&cli.query).bold());
  let ids = client.search(&cli.query, cli.max_results).await?;
  if ids.is_empty() {
    println!("{} No papers found matching the query", style(INFO_PREFIX).cyan());
    return Ok(());
  }
  info!("Found {} papers matching the query", ids.len());

  println!("{} Fetching details for {} papers...", style(INFO_PREFIX).cyan(), ids.len());
  let records = client.fetch(&ids).await?;

  let rows = paper::assemble(&records, &KeywordSets::default());
  let filtered = export::filter_company_papers(rows);
  info!("Found {} papers with company authors", filtered.len());

  match cli.file {
    Some(path) => {
      export::write_csv_file(&filtered, &path)?;
      if filtered.is_empty() {
        println!("{} No qualifying papers; nothing written", style(INFO_PREFIX).cyan());
      } else {
        println!(
          "{} Saved {} papers to {}",
          style(SUCCESS_PREFIX).green(),
          filtered.len(),
          path.display()
        );
      }
    },
    None => {
      let stdout = std::io::stdout();
      export::print_results(&filtered, &mut stdout.lock())?;
    },
  }

  Ok(())
}

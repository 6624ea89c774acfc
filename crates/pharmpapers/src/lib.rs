//! PubMed paper retrieval and industry-affiliation screening library.
//!
//! `pharmpapers` fetches bibliographic records from PubMed and surfaces the
//! papers that have at least one author affiliated with a pharmaceutical or
//! biotech company rather than a purely academic institution. It provides:
//!
//! - A PubMed E-utilities client (esearch/efetch) with batching
//! - Best-effort extraction of semi-structured PubMed records
//! - Heuristic academic-vs-industry affiliation classification
//! - Filtering and export of results to console or CSV
//!
//! # Pipeline
//!
//! Data flows strictly forward through the library:
//!
//! ```text
//! raw XML record -> normalized fields -> classified authors -> paper row
//!                -> filtered row -> rendered output
//! ```
//!
//! Each stage is a pure function over immutable inputs; a malformed record is
//! skipped without aborting the batch.
//!
//! # Getting Started
//!
//! ```no_run
//! use pharmpapers::{
//!   classify::KeywordSets,
//!   client::{PubMedClient, RecordSource},
//!   export, paper,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let client = PubMedClient::new("you@example.com", None);
//!
//!   // Search for papers and fetch their full records
//!   let ids = client.search("cancer immunotherapy", 100).await?;
//!   let records = client.fetch(&ids).await?;
//!
//!   // Assemble rows and keep only those with company-affiliated authors
//!   let keywords = KeywordSets::default();
//!   let rows = export::filter_company_papers(paper::assemble(&records, &keywords));
//!   println!("{}", export::to_csv_string(&rows)?);
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: PubMed E-utilities search and fetch
//! - [`record`]: XML-to-JSON conversion and record normalization
//! - [`format`]: Publication date formatting and small text helpers
//! - [`classify`]: Keyword-driven affiliation classification
//! - [`paper`]: Core row types and the per-record assembler
//! - [`export`]: Filtering, CSV serialization, and console rendering

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};
#[cfg(test)]
use tracing_test::traced_test;

pub mod classify;
pub mod client;
pub mod error;
pub mod export;
pub mod format;
pub mod paper;
pub mod record;

use crate::error::*;

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use pharmpapers::prelude::*;
///
/// async fn example(source: &impl RecordSource) -> Result<()> {
///   let ids = source.search("aspirin", 10).await?;
///   let _records = source.fetch(&ids).await?;
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    client::RecordSource,
    error::{PharmpapersError, Result},
  };
}

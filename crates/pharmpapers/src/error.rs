//! Error types for the pharmpapers library.
//!
//! The taxonomy distinguishes per-record failures from batch-level ones:
//!
//! - [`PharmpapersError::Extraction`] is recoverable per record: the assembler
//!   catches it, skips the record, and continues the batch.
//! - Network and export errors surface to the caller; they are never silently
//!   swallowed.
//!
//! Absence of any matching classification keyword is *not* an error — it is a
//! valid "academic" classification.

use thiserror::Error;

/// Error type alias used for the [`pharmpapers`](crate) crate.
pub type Result<T> = core::result::Result<T, PharmpapersError>;

/// Errors that can occur when fetching, extracting, or exporting papers.
#[derive(Error, Debug)]
pub enum PharmpapersError {
  /// A single record could not be normalized.
  ///
  /// Raised when a required field (PMID, article title) is absent or the
  /// record is not shaped like a PubMed citation. The batch loop treats this
  /// as "skip this record", never as a fatal condition.
  #[error("Failed to extract record: {0}")]
  Extraction(String),

  /// A network request to the E-utilities API failed.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The E-utilities API returned a response we could not interpret.
  #[error("API error: {0}")]
  Api(String),

  /// CSV serialization failed.
  #[error(transparent)]
  Csv(#[from] csv::Error),

  /// A file system operation failed, typically writing the CSV output.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Finalizing the CSV output buffer failed.
  #[error("Failed to export papers: {0}")]
  Export(String),

  /// Invalid configuration supplied by the caller (e.g. a malformed contact
  /// email for the NCBI API).
  #[error("{0}")]
  Config(String),
}

//! Error types for the pharmpapers CLI.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = core::result::Result<T, PharmpapersdError>;

/// Errors surfaced by the CLI wrapper around the library.
#[derive(Error, Debug)]
pub enum PharmpapersdError {
  /// An error bubbled up from the pharmpapers library.
  #[error(transparent)]
  Pharmpapers(#[from] pharmpapers::error::PharmpapersError),

  /// A file system operation failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

//! Filtering and rendering of assembled paper rows.
//!
//! Output contract:
//!
//! - CSV has a fixed six-column header, every field quoted, multi-value
//!   fields joined with `"; "`, row order equal to filtered-row order. An
//!   empty row set yields an empty string and [`write_csv_file`] performs no
//!   file write — never a header-only artifact.
//! - Console output prints an explicit no-results message for an empty set,
//!   otherwise one six-line labeled block per paper framed by 80-character
//!   separator rules.

use std::{io::Write, path::Path};

use csv::{QuoteStyle, WriterBuilder};

use super::*;
use crate::paper::PaperRow;

/// Fixed CSV column header, in output order.
pub const CSV_COLUMNS: [&str; 6] = [
  "PubmedID",
  "Title",
  "Publication Date",
  "Non-academic Author(s)",
  "Company Affiliation(s)",
  "Corresponding Author Email",
];

/// Width of the console separator rule.
const RULE_WIDTH: usize = 80;

/// Retains exactly the rows with at least one non-academic author *and* at
/// least one company affiliation, preserving order.
pub fn filter_company_papers(rows: Vec<PaperRow>) -> Vec<PaperRow> {
  rows
    .into_iter()
    .filter(|row| !row.non_academic_authors.is_empty() && !row.company_affiliations.is_empty())
    .collect()
}

/// Serializes rows to a CSV string with every field quoted.
///
/// An empty row set yields an empty string rather than a header-only
/// document.
pub fn to_csv_string(rows: &[PaperRow]) -> Result<String> {
  if rows.is_empty() {
    return Ok(String::new());
  }

  let mut writer =
    WriterBuilder::new().quote_style(QuoteStyle::Always).from_writer(Vec::new());
  writer.write_record(CSV_COLUMNS)?;
  for row in rows {
    writer.write_record([
      row.pmid.as_str(),
      row.title.as_str(),
      row.publication_date.as_str(),
      &row.non_academic_authors.join("; "),
      &row.company_affiliations.join("; "),
      row.corresponding_email.as_str(),
    ])?;
  }

  let bytes = writer
    .into_inner()
    .map_err(|e| PharmpapersError::Export(format!("Failed to flush CSV writer: {e}")))?;
  String::from_utf8(bytes)
    .map_err(|e| PharmpapersError::Export(format!("CSV output was not UTF-8: {e}")))
}

/// Writes rows to a CSV file at `path`.
///
/// With no rows, nothing is written and no file is created.
pub fn write_csv_file(rows: &[PaperRow], path: impl AsRef<Path>) -> Result<()> {
  if rows.is_empty() {
    warn!("No papers to export");
    return Ok(());
  }

  let csv = to_csv_string(rows)?;
  std::fs::write(path.as_ref(), csv)?;
  debug!("Exported {} papers to {}", rows.len(), path.as_ref().display());
  Ok(())
}

/// Renders rows as a labeled console listing to any writer.
///
/// An empty set prints exactly the no-results message. Struct fields are
/// always present, so the `N/A` presentation default of the labeled blocks is
/// reserved for values that are entirely empty.
pub fn print_results(rows: &[PaperRow], out: &mut impl Write) -> Result<()> {
  if rows.is_empty() {
    writeln!(out, "No papers found matching the criteria.")?;
    return Ok(());
  }

  writeln!(out, "Found {} papers with pharmaceutical/biotech company authors:", rows.len())?;
  writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

  for (index, row) in rows.iter().enumerate() {
    writeln!(out, "Paper {}:", index + 1)?;
    writeln!(out, "  PubMed ID: {}", or_na(&row.pmid))?;
    writeln!(out, "  Title: {}", or_na(&row.title))?;
    writeln!(out, "  Publication Date: {}", or_na(&row.publication_date))?;
    writeln!(out, "  Non-academic Author(s): {}", or_na(&row.non_academic_authors.join("; ")))?;
    writeln!(out, "  Company Affiliation(s): {}", or_na(&row.company_affiliations.join("; ")))?;
    writeln!(out, "  Corresponding Author Email: {}", or_na(&row.corresponding_email))?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
  }

  Ok(())
}

/// Presentation-layer default for absent values.
fn or_na(value: &str) -> &str {
  if value.is_empty() {
    "N/A"
  } else {
    value
  }
}

//! Core row types and the per-record paper assembler.
//!
//! This module ties the pipeline together: it runs the normalizer on a raw
//! record, formats the publication date, classifies each author, and
//! aggregates the result into one immutable [`PaperRow`] per paper. A record
//! that cannot be normalized is dropped from the batch, never fatal to it.

use super::*;
use crate::{
  classify::{classify, KeywordSets},
  record::NormalizedRecord,
};

/// A single author extracted from a PubMed record.
///
/// Immutable once built. `name` is never empty: the normalizer falls back to
/// the `"Unknown Author"` sentinel before constructing one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  /// Author's display name.
  pub name:         String,
  /// Affiliation strings in source order; may be empty.
  pub affiliations: Vec<String>,
  /// Contact email found in the affiliations, empty when none was present.
  pub email:        String,
}

/// The canonical output unit: one flattened, classified paper.
///
/// Created once per raw record, then either rendered or dropped by the
/// filter. Only the non-academic authors and their companies are retained;
/// the full author list is not preserved past assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRow {
  /// PubMed identifier.
  pub pmid:                 String,
  /// Article title.
  pub title:                String,
  /// Canonical publication date string (see
  /// [`format_pub_date`](crate::format::format_pub_date)).
  pub publication_date:     String,
  /// Names of authors classified non-academic, in encounter order. Duplicate
  /// names are allowed; a person may legitimately appear once per record.
  pub non_academic_authors: Vec<String>,
  /// Company names from those authors, deduplicated in order of first
  /// appearance.
  pub company_affiliations: Vec<String>,
  /// First non-empty email found across *all* authors, in author-list order.
  pub corresponding_email:  String,
}

impl PaperRow {
  /// Assembles one row from a raw record.
  ///
  /// Returns `None` when the normalizer rejects the record; the failure is
  /// logged and the batch continues. Pure otherwise: the same record always
  /// yields an identical row.
  pub fn from_record(raw: &Value, keywords: &KeywordSets) -> Option<Self> {
    let record = match NormalizedRecord::from_raw(raw) {
      Ok(record) => record,
      Err(e) => {
        debug!("Skipping record: {e}");
        return None;
      },
    };

    let publication_date = format::format_pub_date(&record.pub_date);

    let mut non_academic_authors = Vec::new();
    let mut company_affiliations: Vec<String> = Vec::new();
    let mut corresponding_email = String::new();

    for author in &record.authors {
      let classification = classify(author, keywords);
      if classification.is_non_academic {
        non_academic_authors.push(author.name.clone());
        if !classification.company_name.is_empty()
          && !company_affiliations.contains(&classification.company_name)
        {
          company_affiliations.push(classification.company_name);
        }
      }

      if corresponding_email.is_empty() && !author.email.is_empty() {
        corresponding_email = author.email.clone();
      }
    }

    Some(Self {
      pmid: record.pmid,
      title: record.title,
      publication_date,
      non_academic_authors,
      company_affiliations,
      corresponding_email,
    })
  }
}

/// Assembles rows for a batch of raw records, preserving arrival order.
///
/// Records that fail extraction are skipped; the output order equals the
/// input order of the records that survive.
pub fn assemble(records: &[Value], keywords: &KeywordSets) -> Vec<PaperRow> {
  records.iter().filter_map(|record| PaperRow::from_record(record, keywords)).collect()
}

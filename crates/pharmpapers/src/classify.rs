//! Keyword-driven academic-vs-industry affiliation classification.
//!
//! Classification is heuristic substring matching over two plain-data keyword
//! tables. The tables live in [`KeywordSets`] and are passed into
//! [`classify`] as configuration rather than being baked into control flow,
//! so they stay independently testable and swappable.
//!
//! # Precedence
//!
//! Within a single affiliation string, an academic keyword disqualifies that
//! string from being a company signal even when a company keyword is also
//! present. Many real affiliations read like "University Hospital, Dept. of
//! Oncology, in partnership with Pharma Inc"; treating the academic phrase as
//! decisive for that string reduces false positives at the cost of sometimes
//! misclassifying genuinely hybrid affiliations. This is a known
//! precision/recall trade-off, not a bug. The suppression is per string, not
//! per author: a later affiliation of the same author can still match.

use super::*;
use crate::paper::Author;

/// The two keyword tables driving classification.
///
/// Matching is case-insensitive substring containment. [`KeywordSets::default`]
/// carries the built-in tables; callers can supply their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSets {
  /// Phrases indicating an academic or public institution.
  pub academic: Vec<String>,
  /// Phrases indicating a pharmaceutical or biotech company.
  pub company:  Vec<String>,
}

impl Default for KeywordSets {
  fn default() -> Self {
    Self {
      academic: [
        "university",
        "college",
        "institute",
        "school",
        "academy",
        "hospital",
        "clinic",
        "medical center",
        "centre",
        "laboratory",
        "national",
        "federal",
        "ministry",
      ]
      .map(String::from)
      .to_vec(),
      company:  [
        "pharm",
        "bio",
        "therapeutics",
        "medicines",
        "drugs",
        "health",
        "medical",
        "life sciences",
        "biotech",
        "inc",
        "corp",
        "llc",
        "ltd",
        "gmbh",
        "biopharma",
        "drug",
        "labs",
        "diagnostics",
        "genomics",
        "biosciences",
        "technologies",
        "biologics",
        "pharmaceuticals",
      ]
      .map(String::from)
      .to_vec(),
    }
  }
}

/// Outcome of classifying one author's affiliations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
  /// Whether the author is affiliated with a company rather than academia.
  pub is_non_academic: bool,
  /// Company name derived from the matching affiliation; empty when academic.
  pub company_name:    String,
}

/// Classifies one author as academic or industry-affiliated.
///
/// Affiliation strings are evaluated in order, stopping at the first that
/// yields a company match:
///
/// 1. An academic keyword in the lowercased string skips it (see the module
///    docs for the precedence rationale).
/// 2. Otherwise a company keyword marks the author non-academic; the company
///    name is the text before the first comma of the *original* string,
///    trimmed.
///
/// Total: an author with no affiliations, or none matching, is academic with
/// an empty company name.
pub fn classify(author: &Author, keywords: &KeywordSets) -> Classification {
  for affiliation in &author.affiliations {
    let lowered = affiliation.to_lowercase();

    if keywords.academic.iter().any(|keyword| lowered.contains(keyword)) {
      continue;
    }

    if keywords.company.iter().any(|keyword| lowered.contains(keyword)) {
      let company_name =
        affiliation.split(',').next().unwrap_or(affiliation.as_str()).trim().to_string();
      debug!("Author {:?} matched company affiliation {:?}", author.name, company_name);
      return Classification { is_non_academic: true, company_name };
    }
  }

  Classification { is_non_academic: false, company_name: String::new() }
}

//! Raw record handling: XML conversion and best-effort field extraction.
//!
//! PubMed efetch responses are deeply nested XML with no guaranteed schema
//! beyond "may or may not contain" each field. This module converts a response
//! into a [`serde_json::Value`] tree (elements become objects, repeated
//! siblings become arrays, text-only elements collapse to strings, attributes
//! get an `@` prefix) and then extracts the semantic fields of each article
//! with explicit presence checks per key.
//!
//! Extraction is best-effort: optional sub-structures fall back to defaults,
//! while a record missing its PMID or title fails with
//! [`PharmpapersError::Extraction`] so the batch loop can skip it.

use quick_xml::{events::Event, Reader};
use serde_json::Map;

use super::*;
use crate::paper::Author;

/// Characters stripped from the end of an email token found in an affiliation.
const EMAIL_TRIM: [char; 5] = ['.', ',', ';', '(', ')'];

/// Converts an XML document into a JSON value tree.
///
/// Elements map to objects keyed by tag name. A tag that repeats under the
/// same parent becomes an array, so consumers must tolerate both the single
/// and repeated shapes (see [`as_list`]). Attributes are stored under
/// `@`-prefixed keys and element text under `$text`; an element with text and
/// no attributes collapses to a plain string.
///
/// Text fragments accumulate in document order, and an element with mixed
/// content (inline markup such as `<i>` or `<sup>` inside a title) stores the
/// full flattened text under `$text`, so consumers see the complete string
/// rather than the fragment after the last child.
pub fn to_json(xml: &str) -> Value {
  let mut reader = Reader::from_str(xml);
  let mut stack = Vec::new();
  let mut current = Map::new();
  let mut fragments: Vec<String> = Vec::new();
  let mut has_direct_text = false;

  while let Ok(event) = reader.read_event() {
    match event {
      Event::Start(ref e) => {
        let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();

        let mut new_obj = Map::new();
        for attr in e.attributes().flatten() {
          if let Ok(key) = String::from_utf8(attr.key.as_ref().to_vec()) {
            if let Ok(value) = attr.unescape_value() {
              new_obj.insert(format!("@{}", key), Value::String(value.into_owned()));
            }
          }
        }

        // Remember whether this tag repeats under its parent
        let repeated = match current.get_mut(&tag) {
          Some(Value::Array(_)) => true,
          Some(_) => {
            let existing = current.remove(&tag).unwrap();
            current.insert(tag.clone(), Value::Array(vec![existing]));
            true
          },
          None => false,
        };

        stack.push((tag, current, repeated, std::mem::take(&mut fragments), has_direct_text));
        current = new_obj;
        has_direct_text = false;
      },
      Event::Empty(ref e) => {
        let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let mut obj = Map::new();
        for attr in e.attributes().flatten() {
          if let Ok(key) = String::from_utf8(attr.key.as_ref().to_vec()) {
            if let Ok(value) = attr.unescape_value() {
              obj.insert(format!("@{}", key), Value::String(value.into_owned()));
            }
          }
        }
        append_child(&mut current, tag, Value::Object(obj));
      },
      Event::Text(e) =>
        if let Ok(txt) = e.unescape() {
          let text = txt.trim();
          if !text.is_empty() {
            fragments.push(text.to_string());
            has_direct_text = true;
          }
        },
      Event::End(_) => {
        if let Some((tag, mut parent, is_array, parent_fragments, parent_has_text)) = stack.pop() {
          // Flattened text of this element and its children, in document order
          let flattened = fragments.join(" ");
          if has_direct_text {
            current.insert("$text".to_string(), Value::String(flattened.clone()));
          }

          // Text-only elements collapse to a plain string
          let value = if current.len() == 1 && current.contains_key("$text") {
            current.remove("$text").unwrap()
          } else {
            Value::Object(current)
          };

          if is_array {
            if let Some(Value::Array(arr)) = parent.get_mut(&tag) {
              arr.push(value);
            }
          } else {
            parent.insert(tag, value);
          }

          current = parent;
          fragments = parent_fragments;
          has_direct_text = parent_has_text;
          if !flattened.is_empty() {
            fragments.push(flattened);
          }
        }
      },
      Event::Eof => break,
      _ => (),
    }
  }

  Value::Object(current)
}

/// Inserts a child value, promoting an existing entry to an array on repeat.
fn append_child(parent: &mut Map<String, Value>, tag: String, value: Value) {
  match parent.get_mut(&tag) {
    Some(Value::Array(arr)) => arr.push(value),
    Some(_) => {
      let existing = parent.remove(&tag).unwrap();
      parent.insert(tag, Value::Array(vec![existing, value]));
    },
    None => {
      parent.insert(tag, value);
    },
  }
}

/// Splits a converted `PubmedArticleSet` document into per-article records.
///
/// Tolerant of any article count: a missing set or empty document yields an
/// empty vector, a single article (which the XML conversion does not wrap in
/// an array) yields a one-element vector.
pub fn split_articles(document: &Value) -> Vec<Value> {
  as_list(document.pointer("/PubmedArticleSet/PubmedArticle"))
    .into_iter()
    .cloned()
    .collect()
}

/// Views a converted value as a list of elements.
///
/// The XML conversion only produces an array when a tag repeats, so a single
/// occurrence arrives as a bare value. `None` or `Null` is an empty list.
pub fn as_list(value: Option<&Value>) -> Vec<&Value> {
  match value {
    None | Some(Value::Null) => Vec::new(),
    Some(Value::Array(items)) => items.iter().collect(),
    Some(single) => vec![single],
  }
}

/// Extracts the text content of a converted element.
///
/// Handles both the collapsed form (plain string) and the attributed form
/// (object carrying a `$text` key, e.g. `<PMID Version="1">123</PMID>`).
pub fn text_of(value: Option<&Value>) -> Option<&str> {
  match value? {
    Value::String(s) => Some(s),
    Value::Object(map) => map.get("$text").and_then(Value::as_str),
    _ => None,
  }
}

/// Semantic fields of one PubMed record, extracted but not yet classified.
///
/// Produced by [`NormalizedRecord::from_raw`] and consumed by
/// [`PaperRow::from_record`](crate::paper::PaperRow::from_record).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
  /// PubMed identifier of the record.
  pub pmid:     String,
  /// Article title.
  pub title:    String,
  /// Raw publication date sub-structure, [`Value::Null`] when absent. Shape
  /// varies; [`format::format_pub_date`](crate::format::format_pub_date)
  /// renders it.
  pub pub_date: Value,
  /// Authors in source order; empty when the record lists none.
  pub authors:  Vec<Author>,
}

impl NormalizedRecord {
  /// Extracts the normalized fields from one raw record.
  ///
  /// PMID and title are required; everything else is best-effort with
  /// defaults. A record that is not a citation-shaped mapping fails with
  /// [`PharmpapersError::Extraction`].
  pub fn from_raw(raw: &Value) -> Result<Self> {
    let citation = raw
      .get("MedlineCitation")
      .filter(|c| c.is_object())
      .ok_or_else(|| PharmpapersError::Extraction("record has no MedlineCitation".into()))?;

    let pmid = text_of(citation.get("PMID"))
      .ok_or_else(|| PharmpapersError::Extraction("record has no PMID".into()))?
      .to_string();

    let article = citation
      .get("Article")
      .filter(|a| a.is_object())
      .ok_or_else(|| PharmpapersError::Extraction(format!("record {pmid} has no Article")))?;

    let title = text_of(article.get("ArticleTitle"))
      .ok_or_else(|| PharmpapersError::Extraction(format!("record {pmid} has no ArticleTitle")))?
      .to_string();

    let pub_date =
      article.pointer("/Journal/JournalIssue/PubDate").cloned().unwrap_or(Value::Null);

    let authors = extract_authors(article);
    trace!("Extracted {} authors from record {}", authors.len(), pmid);

    Ok(Self { pmid, title, pub_date, authors })
  }
}

/// Extracts the author list from an article, skipping unattributable entries.
///
/// An author sub-record with neither a `LastName` nor a `CollectiveName` is
/// unnamed and dropped. Name assembly precedence: `ForeName LastName`, then
/// `Initials LastName`, then the collective name verbatim.
fn extract_authors(article: &Value) -> Vec<Author> {
  as_list(article.pointer("/AuthorList/Author"))
    .into_iter()
    .filter_map(extract_author)
    .collect()
}

/// Builds one [`Author`] from its raw sub-record, or `None` if it is unnamed.
fn extract_author(author: &Value) -> Option<Author> {
  let last_name = text_of(author.get("LastName"));
  let collective = text_of(author.get("CollectiveName"));
  if last_name.is_none() && collective.is_none() {
    return None;
  }

  let name = match last_name {
    Some(last) =>
      if let Some(fore) = text_of(author.get("ForeName")) {
        format!("{fore} {last}")
      } else if let Some(initials) = text_of(author.get("Initials")) {
        format!("{initials} {last}")
      } else {
        last.to_string()
      },
    None => collective.unwrap_or("Unknown Author").to_string(),
  };

  let affiliations: Vec<String> = as_list(author.get("AffiliationInfo"))
    .into_iter()
    .filter_map(|info| text_of(info.get("Affiliation")))
    .map(str::to_string)
    .collect();

  let email = extract_email(&affiliations);

  Some(Author { name, affiliations, email })
}

/// Scans affiliation strings for an email address.
///
/// Takes the first whitespace-delimited token containing `@` across all of
/// the author's affiliations, with trailing punctuation stripped. First match
/// wins; the scan stops there.
fn extract_email(affiliations: &[String]) -> String {
  for affiliation in affiliations {
    for token in affiliation.split_whitespace() {
      if token.contains('@') {
        return token.trim_end_matches(EMAIL_TRIM).to_string();
      }
    }
  }
  String::new()
}

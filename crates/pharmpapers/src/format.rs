//! Publication date formatting and small text helpers.

use super::*;
use crate::record::text_of;

/// Three-letter month abbreviations as they appear in PubMed `PubDate`
/// elements, mapped to two-digit numeric codes.
const MONTHS: [(&str, &str); 12] = [
  ("Jan", "01"),
  ("Feb", "02"),
  ("Mar", "03"),
  ("Apr", "04"),
  ("May", "05"),
  ("Jun", "06"),
  ("Jul", "07"),
  ("Aug", "08"),
  ("Sep", "09"),
  ("Oct", "10"),
  ("Nov", "11"),
  ("Dec", "12"),
];

/// Renders a raw `PubDate` sub-structure as a canonical date string.
///
/// PubMed dates come in several shapes and this function is total over all of
/// them:
///
/// - A `Year` (with optional `Month`/`Day`) becomes `YYYY-MM-DD`, month names
///   mapped through the fixed table, missing parts defaulting to `01`.
/// - No year but a free-text `MedlineDate` (e.g. `"2022 Jan-Feb"`) is
///   returned verbatim, unparsed.
/// - Anything else, including [`Value::Null`], becomes `"Unknown"`.
pub fn format_pub_date(pub_date: &Value) -> String {
  if let Some(year) = text_of(pub_date.get("Year")) {
    let month = text_of(pub_date.get("Month")).map_or_else(|| "01".to_string(), numeric_month);
    let day = text_of(pub_date.get("Day")).map_or_else(|| "01".to_string(), zero_pad);
    return format!("{year}-{month}-{day}");
  }

  match text_of(pub_date.get("MedlineDate")) {
    Some(medline_date) => medline_date.to_string(),
    None => "Unknown".to_string(),
  }
}

/// Maps a month name through the abbreviation table, zero-padding values that
/// are already numeric.
fn numeric_month(month: &str) -> String {
  MONTHS
    .iter()
    .find(|(name, _)| *name == month)
    .map_or_else(|| zero_pad(month), |(_, code)| (*code).to_string())
}

/// Left-pads a date component to two digits.
fn zero_pad(part: &str) -> String { format!("{part:0>2}") }

lazy_static! {
  /// Deliberately simple email shape check for the NCBI contact address.
  static ref EMAIL_RE: Regex =
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
}

/// Returns whether a string looks like a properly formed email address.
pub fn validate_email(email: &str) -> bool { EMAIL_RE.is_match(email) }

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn full_date_maps_month_name() {
    let date = json!({"Year": "2022", "Month": "Jan", "Day": "15"});
    assert_eq!(format_pub_date(&date), "2022-01-15");
  }

  #[test]
  fn missing_month_and_day_default_to_01() {
    assert_eq!(format_pub_date(&json!({"Year": "2022"})), "2022-01-01");
    assert_eq!(format_pub_date(&json!({"Year": "2022", "Month": "Dec"})), "2022-12-01");
  }

  #[test]
  fn numeric_parts_are_zero_padded() {
    let date = json!({"Year": "2023", "Month": "3", "Day": "7"});
    assert_eq!(format_pub_date(&date), "2023-03-07");

    let already_padded = json!({"Year": "2023", "Month": "11", "Day": "21"});
    assert_eq!(format_pub_date(&already_padded), "2023-11-21");
  }

  #[test]
  fn medline_date_is_returned_verbatim() {
    let date = json!({"MedlineDate": "2022 Jan-Feb"});
    assert_eq!(format_pub_date(&date), "2022 Jan-Feb");
  }

  #[test]
  fn empty_or_null_date_is_unknown() {
    assert_eq!(format_pub_date(&json!({})), "Unknown");
    assert_eq!(format_pub_date(&Value::Null), "Unknown");
  }

  #[test]
  fn email_validation() {
    assert!(validate_email("jane.doe@pharma.com"));
    assert!(validate_email("a_b+c@sub.example.org"));
    assert!(!validate_email("not-an-email"));
    assert!(!validate_email("missing@tld"));
    assert!(!validate_email("two@@example.com"));
  }
}

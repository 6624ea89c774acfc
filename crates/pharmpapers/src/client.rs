//! PubMed E-utilities client.
//!
//! Endpoints used:
//!
//! - esearch: query -> total count and ordered PMID list, paged
//! - efetch: PMID list -> full article XML, batched
//!
//! NCBI asks clients to identify themselves with a tool name and contact
//! email, and throttles unauthenticated callers; an API key raises the rate
//! limit. The client paces itself with a short delay between batch requests.
//!
//! The [`RecordSource`] trait is the boundary the rest of the pipeline sees:
//! an ordered identifier list from `search` and raw records from `fetch`. An
//! empty result set is valid at this boundary — the pipeline produces zero
//! rows from zero records and does not distinguish "no matches" from an
//! upstream failure a collaborator already logged.

use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::record;

/// NCBI esearch endpoint.
const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
/// NCBI efetch endpoint.
const EFETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";
/// Pause between consecutive batch requests, to be polite to NCBI servers.
const COURTESY_DELAY: Duration = Duration::from_millis(500);

/// The fetch-layer contract the core pipeline depends on.
///
/// Implemented by [`PubMedClient`] for the live API; tests implement it over
/// canned data to drive the pipeline without a network.
#[async_trait]
pub trait RecordSource: Send + Sync {
  /// Searches for records matching a query.
  ///
  /// Returns an ordered list of opaque record identifiers, at most
  /// `max_results` long. An empty list is a valid, non-error result.
  async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>>;

  /// Fetches raw records for a list of identifiers.
  ///
  /// Callers must handle any number of returned records, including zero or
  /// fewer than requested.
  async fn fetch(&self, ids: &[String]) -> Result<Vec<Value>>;
}

/// Client for the PubMed E-utilities API.
#[derive(Debug, Clone)]
pub struct PubMedClient {
  /// Underlying HTTP client, reused across requests.
  client:     reqwest::Client,
  /// Contact email sent with every request, as NCBI requires.
  email:      String,
  /// Optional NCBI API key to increase rate limits.
  api_key:    Option<String>,
  /// Number of records requested per esearch page / efetch batch.
  batch_size: usize,
}

impl PubMedClient {
  /// Creates a client identifying itself with the given contact email.
  pub fn new(email: impl Into<String>, api_key: Option<String>) -> Self {
    Self { client: reqwest::Client::new(), email: email.into(), api_key, batch_size: 100 }
  }

  /// Overrides the per-request batch size (mostly for tests).
  pub fn with_batch_size(mut self, batch_size: usize) -> Self {
    self.batch_size = batch_size.max(1);
    self
  }

  /// Query parameters common to every E-utilities request.
  fn base_params(&self) -> Vec<(&'static str, String)> {
    let mut params = vec![
      ("db", "pubmed".to_string()),
      ("tool", "pharmpapers".to_string()),
      ("email", self.email.clone()),
    ];
    if let Some(key) = &self.api_key {
      params.push(("api_key", key.clone()));
    }
    params
  }

  /// Runs one esearch page and returns its parsed JSON body.
  async fn esearch_page(&self, query: &str, retstart: usize, retmax: usize) -> Result<Value> {
    let mut params = self.base_params();
    params.push(("term", query.to_string()));
    params.push(("retstart", retstart.to_string()));
    params.push(("retmax", retmax.to_string()));
    params.push(("retmode", "json".to_string()));

    let response =
      self.client.get(ESEARCH_URL).query(&params).send().await?.error_for_status()?;
    Ok(response.json().await?)
  }

  /// Fetches and converts one efetch batch.
  async fn efetch_batch(&self, ids: &[String]) -> Result<Vec<Value>> {
    let mut params = self.base_params();
    params.push(("id", ids.join(",")));
    params.push(("rettype", "abstract".to_string()));
    params.push(("retmode", "xml".to_string()));

    let xml = self
      .client
      .get(EFETCH_URL)
      .query(&params)
      .send()
      .await?
      .error_for_status()?
      .text()
      .await?;
    trace!("efetch response: {} bytes", xml.len());

    Ok(record::split_articles(&record::to_json(&xml)))
  }
}

#[async_trait]
impl RecordSource for PubMedClient {
  async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
    debug!("Searching PubMed for: {query}");

    // First request only asks for the total count
    let count_body = self.esearch_page(query, 0, 0).await?;
    let count: usize = count_body
      .pointer("/esearchresult/count")
      .and_then(Value::as_str)
      .and_then(|count| count.parse().ok())
      .ok_or_else(|| PharmpapersError::Api("esearch response has no result count".into()))?;
    let count = count.min(max_results);
    debug!("Query matches {count} records (capped at {max_results})");

    let mut ids = Vec::with_capacity(count);
    let mut start = 0;
    while start < count {
      let retmax = self.batch_size.min(count - start);
      debug!("Downloading records {} to {}", start + 1, start + retmax);

      let page = self.esearch_page(query, start, retmax).await?;
      let page_ids = page
        .pointer("/esearchresult/idlist")
        .and_then(Value::as_array)
        .map(|list| {
          list.iter().filter_map(|id| id.as_str().map(String::from)).collect::<Vec<_>>()
        })
        .unwrap_or_default();
      if page_ids.is_empty() {
        // The server returned fewer pages than the count promised
        break;
      }
      ids.extend(page_ids);

      start += self.batch_size;
      if start < count {
        tokio::time::sleep(COURTESY_DELAY).await;
      }
    }

    ids.truncate(max_results);
    Ok(ids)
  }

  async fn fetch(&self, ids: &[String]) -> Result<Vec<Value>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    debug!("Fetching details for {} records", ids.len());

    let batch_count = ids.len().div_ceil(self.batch_size);
    let mut records = Vec::with_capacity(ids.len());
    for (index, batch) in ids.chunks(self.batch_size).enumerate() {
      debug!("Fetching batch {} of {batch_count} ({} ids)", index + 1, batch.len());

      // A failed batch is skipped, not fatal to the run
      match self.efetch_batch(batch).await {
        Ok(batch_records) => records.extend(batch_records),
        Err(e) => warn!("Error fetching batch {}: {e}", index + 1),
      }

      if index + 1 < batch_count {
        tokio::time::sleep(COURTESY_DELAY).await;
      }
    }

    Ok(records)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn base_params_include_identification() {
    let client = PubMedClient::new("jane.doe@pharma.com", Some("secret-key".to_string()));
    let params = client.base_params();
    assert!(params.contains(&("db", "pubmed".to_string())));
    assert!(params.contains(&("email", "jane.doe@pharma.com".to_string())));
    assert!(params.contains(&("api_key", "secret-key".to_string())));
  }

  #[test]
  fn base_params_omit_missing_api_key() {
    let client = PubMedClient::new("jane.doe@pharma.com", None);
    assert!(client.base_params().iter().all(|(key, _)| *key != "api_key"));
  }

  #[test]
  fn batch_size_is_never_zero() {
    let client = PubMedClient::new("jane.doe@pharma.com", None).with_batch_size(0);
    assert_eq!(client.batch_size, 1);
  }

  #[tokio::test]
  async fn fetch_of_no_ids_makes_no_request() {
    // An unroutable base URL is irrelevant because the empty-input path
    // returns before any network activity.
    let client = PubMedClient::new("jane.doe@pharma.com", None);
    let records = client.fetch(&[]).await.unwrap();
    assert!(records.is_empty());
  }
}

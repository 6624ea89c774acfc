//! End-to-end pipeline tests over a fixture efetch response.
//!
//! These exercise the full forward flow without a network: raw XML ->
//! converted records -> assembled rows -> filtered rows -> rendered output.

use anyhow::Result;
use async_trait::async_trait;
use pharmpapers::{classify::KeywordSets, export, paper, prelude::RecordSource, record};
use serde_json::Value;

/// A realistic slice of an efetch `retmode=xml` response: one paper with a
/// company author, one purely academic paper, and one malformed record.
const EFETCH_FIXTURE: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">40000001</PMID>
      <Article PubModel="Print">
        <Journal>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2024</Year><Month>Mar</Month><Day>5</Day></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>Phase II trial of acmezumab in solid tumors.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Scholar</LastName>
            <ForeName>Alice</ForeName>
            <Initials>A</Initials>
            <AffiliationInfo>
              <Affiliation>Department of Oncology, Example University, Springfield, USA. alice@example.edu.</Affiliation>
            </AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <LastName>Suit</LastName>
            <ForeName>Bob</ForeName>
            <Initials>B</Initials>
            <AffiliationInfo>
              <Affiliation>Acme Therapeutics, Cambridge, MA, USA.</Affiliation>
            </AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <CollectiveName>ACME-201 Study Group</CollectiveName>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">40000002</PMID>
      <Article PubModel="Print">
        <Journal>
          <JournalIssue CitedMedium="Print">
            <PubDate><MedlineDate>2022 Jan-Feb</MedlineDate></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>A purely academic study of something.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Gown</LastName>
            <ForeName>Grace</ForeName>
            <AffiliationInfo>
              <Affiliation>School of Medicine, Other University, Berlin, Germany.</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">40000003</PMID>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>
"#;

/// Canned implementation of the fetch-layer boundary.
struct FixtureSource;

#[async_trait]
impl RecordSource for FixtureSource {
  async fn search(&self, _query: &str, max_results: usize) -> pharmpapers::error::Result<Vec<String>> {
    let ids = ["40000001", "40000002", "40000003"];
    Ok(ids.iter().take(max_results).map(|id| id.to_string()).collect())
  }

  async fn fetch(&self, ids: &[String]) -> pharmpapers::error::Result<Vec<Value>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    Ok(record::split_articles(&record::to_json(EFETCH_FIXTURE)))
  }
}

#[tokio::test]
async fn pipeline_keeps_only_company_papers() -> Result<()> {
  let source = FixtureSource;
  let ids = source.search("acmezumab", 500).await?;
  let records = source.fetch(&ids).await?;
  assert_eq!(records.len(), 3);

  let rows = paper::assemble(&records, &KeywordSets::default());
  // The record missing its Article is skipped, not fatal
  assert_eq!(rows.len(), 2);

  let filtered = export::filter_company_papers(rows);
  assert_eq!(filtered.len(), 1);

  let row = &filtered[0];
  assert_eq!(row.pmid, "40000001");
  assert_eq!(row.title, "Phase II trial of acmezumab in solid tumors.");
  assert_eq!(row.publication_date, "2024-03-05");
  assert_eq!(row.non_academic_authors, vec!["Bob Suit"]);
  assert_eq!(row.company_affiliations, vec!["Acme Therapeutics"]);
  assert_eq!(row.corresponding_email, "alice@example.edu");
  Ok(())
}

#[tokio::test]
async fn pipeline_renders_console_and_csv() -> Result<()> {
  let source = FixtureSource;
  let records = source.fetch(&["40000001".to_string()]).await?;
  let filtered =
    export::filter_company_papers(paper::assemble(&records, &KeywordSets::default()));

  let csv = export::to_csv_string(&filtered)?;
  assert!(csv.starts_with("\"PubmedID\",\"Title\""));
  assert!(csv.contains("\"40000001\""));
  assert!(csv.contains("\"Bob Suit\""));

  let mut console = Vec::new();
  export::print_results(&filtered, &mut console)?;
  let console = String::from_utf8(console)?;
  assert!(console.starts_with("Found 1 papers with pharmaceutical/biotech company authors:"));
  assert!(console.contains("  PubMed ID: 40000001"));
  Ok(())
}

#[tokio::test]
async fn zero_records_is_a_successful_empty_run() -> Result<()> {
  let source = FixtureSource;
  let records = source.fetch(&[]).await?;
  let filtered =
    export::filter_company_papers(paper::assemble(&records, &KeywordSets::default()));
  assert!(filtered.is_empty());

  assert_eq!(export::to_csv_string(&filtered)?, "");

  let mut console = Vec::new();
  export::print_results(&filtered, &mut console)?;
  assert_eq!(String::from_utf8(console)?, "No papers found matching the criteria.\n");
  Ok(())
}

#[test]
fn medline_date_survives_to_the_row() {
  let records = record::split_articles(&record::to_json(EFETCH_FIXTURE));
  let rows = paper::assemble(&records, &KeywordSets::default());
  let academic = rows.iter().find(|row| row.pmid == "40000002").unwrap();
  assert_eq!(academic.publication_date, "2022 Jan-Feb");
  assert!(academic.non_academic_authors.is_empty());
}

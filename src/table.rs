//! Survey table of well-cited papers.

use crate::error::{Result, SurveyError};
use crate::extract::{authors_for, num_citations, related_ref, year_for};
use crate::filter::{has_enough_citations, FilterArgs};
use crate::record::ResultRecord;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Column order of the survey table and its CSV export
pub const SURVEY_COLUMNS: [&str; 8] = [
    "Key", "Citations", "Year", "Title", "Authors", "Link", "Related", "Snippet",
];

/// One well-cited paper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyRow {
    /// Cites id, for "papers citing this one" follow-up queries
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Citations")]
    pub citations: u64,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "Link")]
    pub link: String,
    /// Result id, for related-paper follow-up queries
    #[serde(rename = "Related")]
    pub related: String,
    #[serde(rename = "Snippet")]
    pub snippet: String,
}

impl SurveyRow {
    fn from_record(record: &ResultRecord, args: &FilterArgs) -> Result<Self> {
        let key = record
            .inline_links
            .cited_by
            .as_ref()
            .and_then(|c| c.cites_id.clone())
            .ok_or_else(|| SurveyError::MissingField {
                result_id: record.result_id.clone(),
                field: "inline_links.cited_by.cites_id",
            })?;

        Ok(Self {
            key,
            citations: num_citations(record),
            year: year_for(record, args.default_year)?,
            title: record.title.clone(),
            authors: authors_for(record).to_string(),
            link: record.link.clone().unwrap_or_default(),
            related: related_ref(record).to_string(),
            snippet: record.snippet.clone().unwrap_or_default(),
        })
    }
}

/// Rows in the same order as the records they came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyTable {
    rows: Vec<SurveyRow>,
}

impl SurveyTable {
    pub fn rows(&self) -> &[SurveyRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &SURVEY_COLUMNS
    }

    /// Write the table as CSV with a header row, even when empty.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)?;

        wtr.write_record(SURVEY_COLUMNS)?;
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;

        info!(rows = self.rows.len(), path = ?path, "Saved survey table");
        Ok(())
    }
}

/// Build the survey table from the records that pass the citation filter.
pub fn build_table(records: &[ResultRecord], args: &FilterArgs) -> Result<SurveyTable> {
    let mut rows = Vec::new();
    for record in records {
        if has_enough_citations(record, args)? {
            rows.push(SurveyRow::from_record(record, args)?);
        }
    }

    info!(
        input = records.len(),
        kept = rows.len(),
        "Built survey table"
    );
    Ok(SurveyTable { rows })
}

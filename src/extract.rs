//! Field extraction from result records.
//!
//! Structured dates and author lists are unreliable in provider output, so
//! the year comes from free text and the author list from the summary line.

use crate::error::{Result, SurveyError};
use crate::query::Query;
use crate::record::ResultRecord;
use once_cell::sync::Lazy;
use regex::Regex;

/// Year assumed when no year-like token is found
pub const DEFAULT_YEAR: i32 = 2022;

/// Matches 1980 through 2029, anywhere in the text
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:198|199|200|201|202)\d").expect("valid year regex"));

/// Publication year from the summary line and the first resource link.
///
/// Returns the first year-like token, or `default_year` when there is none.
/// Tokens inside unrelated numbers (ids, page counts) also match.
///
/// # Errors
///
/// [`SurveyError::MissingField`] if the record has no publication summary.
pub fn year_for(record: &ResultRecord, default_year: i32) -> Result<i32> {
    let summary = record
        .publication_info
        .summary
        .as_deref()
        .ok_or_else(|| SurveyError::MissingField {
            result_id: record.result_id.clone(),
            field: "publication_info.summary",
        })?;

    let resource_link = record
        .resources
        .first()
        .and_then(|r| r.link.as_deref())
        .unwrap_or("");

    let text = format!("{}{}", summary, resource_link);
    let year = YEAR_RE
        .find(&text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(default_year);

    Ok(year)
}

/// Citation count; a missing block or a null total both count as zero
pub fn num_citations(record: &ResultRecord) -> u64 {
    record
        .inline_links
        .cited_by
        .as_ref()
        .and_then(|c| c.total)
        .unwrap_or(0)
}

/// Author list as printed before the first `" -"` of the summary line.
///
/// Often truncated by the provider ("A Smith, B Jones…").
pub fn authors_for(record: &ResultRecord) -> &str {
    let summary = record.publication_info.summary.as_deref().unwrap_or("");
    summary.split(" -").next().unwrap_or("")
}

/// Key used to build a related-papers query
pub fn related_ref(record: &ResultRecord) -> &str {
    &record.result_id
}

/// Query for papers related to the result with id `id`
pub fn related_query(id: &str) -> Query {
    Query::related(id)
}

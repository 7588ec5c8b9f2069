//! Result record schema for SerpApi Google Scholar organic results.
//!
//! Fields the provider populates inconsistently are `Option`s or default to
//! empty; `title` and `result_id` are required, so a page containing a
//! record without them fails to deserialize.

use serde::{Deserialize, Serialize};

/// One organic result (one paper)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    /// Paper title
    pub title: String,
    /// Provider-assigned result id, also the related-query key
    pub result_id: String,
    /// Author/venue/year summary line
    pub publication_info: PublicationInfo,
    /// Citation and related-article links
    #[serde(default)]
    pub inline_links: InlineLinks,
    /// Text snippet
    #[serde(default)]
    pub snippet: Option<String>,
    /// Link to the article
    #[serde(default)]
    pub link: Option<String>,
    /// Full-text resources (PDF, HTML versions)
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// Publication info block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PublicationInfo {
    /// e.g. "A Author, B Author - Journal, 2019 - publisher.com"
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InlineLinks {
    #[serde(default)]
    pub cited_by: Option<CitedBy>,
    #[serde(default)]
    pub related_pages_link: Option<String>,
}

/// Citation metadata block
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CitedBy {
    /// Number of citing works; occasionally null upstream
    #[serde(default)]
    pub total: Option<u64>,
    /// Key for "papers citing this one" queries
    #[serde(default)]
    pub cites_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file_format: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// One page of results as returned by a [`QueryExecutor`](crate::executor::QueryExecutor)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPage {
    pub records: Vec<ResultRecord>,
    /// Total matches reported by the provider; `None` means this page is everything
    pub total_results: Option<u64>,
}

impl ResultPage {
    pub fn new(records: Vec<ResultRecord>, total_results: Option<u64>) -> Self {
        Self {
            records,
            total_results,
        }
    }
}

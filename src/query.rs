//! Immutable search query values.
//!
//! A [`Query`] is a set of provider parameters. Pagination never mutates a
//! query; [`Query::with_offset`] derives a new one with the `start`
//! parameter replaced.

use std::collections::BTreeMap;
use std::fmt;

/// Provider parameter carrying the pagination offset
pub const OFFSET_PARAM: &str = "start";

/// Provider parameter for free-text searches
pub const TEXT_PARAM: &str = "q";

/// Provider parameter for "papers citing X" searches
pub const CITES_PARAM: &str = "cites";

/// Provider search parameters for one result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: BTreeMap<String, String>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Papers citing the paper with the given cites id
    pub fn cites(cites_id: &str) -> Self {
        Self::new().with_param(CITES_PARAM, cites_id)
    }

    /// Free-text search
    pub fn search(text: &str) -> Self {
        Self::new().with_param(TEXT_PARAM, text)
    }

    /// Papers related to the result with the given id.
    pub fn related(result_id: &str) -> Self {
        Self::search(&format!("related:{}:scholar.google.com/", result_id))
    }

    /// Return a copy with `key` set to `value`
    pub fn with_param(&self, key: &str, value: &str) -> Self {
        let mut params = self.params.clone();
        params.insert(key.to_string(), value.to_string());
        Self { params }
    }

    /// Return a copy positioned at the given result offset
    pub fn with_offset(&self, offset: usize) -> Self {
        self.with_param(OFFSET_PARAM, &offset.to_string())
    }

    /// Look up a parameter value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Current pagination offset, 0 when unset or unparsable
    pub fn offset(&self) -> usize {
        self.get(OFFSET_PARAM)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    /// Iterate over parameters in key order
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.params().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

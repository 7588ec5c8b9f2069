//! The fetch seam between pagination and the search provider.

use crate::error::Result;
use crate::query::Query;
use crate::record::ResultPage;
use async_trait::async_trait;

/// Executes one page request against a search provider.
///
/// The pagination offset travels inside the query (see [`Query::with_offset`]).
/// Provider-reported errors must surface as [`SurveyError::Provider`] so the
/// accumulator can tell the empty-result sentinel apart from fatal failures.
///
/// [`SurveyError::Provider`]: crate::error::SurveyError::Provider
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Fetch the page of results starting at `query.offset()`
    async fn fetch(&self, query: &Query) -> Result<ResultPage>;
}

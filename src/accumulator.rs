//! Pagination over a result set of unknown size.
//!
//! The caller's maximum is an upper bound; the provider's reported total can
//! only lower it. Pages are fetched one at a time at offset
//! `collected.len()`, so no page is requested twice.

use crate::error::Result;
use crate::executor::QueryExecutor;
use crate::query::Query;
use crate::record::ResultRecord;
use tracing::{debug, info, warn};

/// Default cap on results per accumulation
pub const DEFAULT_MAX_RESULTS: usize = 200;

/// Fetch up to `max_results` records for `query`.
///
/// An empty-result response from the provider ends pagination and returns
/// what was collected so far. Any other error aborts and is returned as is.
/// `max_results == 0` returns an empty list without contacting the provider.
pub async fn accumulate<E>(executor: &E, query: &Query, max_results: usize) -> Result<Vec<ResultRecord>>
where
    E: QueryExecutor + ?Sized,
{
    if max_results == 0 {
        debug!(query = %query, "max_results is 0, nothing to fetch");
        return Ok(Vec::new());
    }

    let mut collected: Vec<ResultRecord> = Vec::new();
    let mut effective_max = max_results;

    while collected.len() < effective_max {
        let offset = collected.len();
        let page = match executor.fetch(&query.with_offset(offset)).await {
            Ok(page) => page,
            Err(e) if e.is_empty_result() => {
                info!(query = %query, offset, "No results for query");
                break;
            }
            Err(e) => return Err(e),
        };

        let fetched = page.records.len();
        collected.extend(page.records);

        let available = page
            .total_results
            .map(|t| usize::try_from(t).unwrap_or(usize::MAX))
            .unwrap_or(collected.len());
        effective_max = effective_max.min(available);

        if offset == 0 {
            info!(query = %query, effective_max, "Retrieving papers");
        }
        debug!(offset, fetched, effective_max, "Page fetched");

        if fetched == 0 {
            if collected.len() < effective_max {
                warn!(
                    query = %query,
                    offset,
                    expected = effective_max,
                    "Provider returned an empty page before the reported total"
                );
            }
            break;
        }
    }

    collected.truncate(effective_max);
    Ok(collected)
}

/// First record matching `query`, or `None` if the provider has no results.
pub async fn get_paper<E>(executor: &E, query: &Query) -> Result<Option<ResultRecord>>
where
    E: QueryExecutor + ?Sized,
{
    info!(query = %query, "Looking up first matching paper");
    Ok(accumulate(executor, query, 1).await?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SurveyError, EMPTY_RESULT_SENTINEL};
    use crate::record::{PublicationInfo, ResultPage};
    use async_trait::async_trait;
    use std::sync::Mutex;

    const PAGE_SIZE: usize = 10;

    fn record(n: usize) -> ResultRecord {
        ResultRecord {
            title: format!("Paper {}", n),
            result_id: format!("r{}", n),
            publication_info: PublicationInfo {
                summary: Some("A Author - Venue, 2019".to_string()),
            },
            inline_links: Default::default(),
            snippet: None,
            link: None,
            resources: Vec::new(),
        }
    }

    fn provider_error(message: &str) -> SurveyError {
        SurveyError::Provider {
            query: "{}".to_string(),
            message: message.to_string(),
            payload: format!(r#"{{"error": "{}"}}"#, message),
        }
    }

    /// Serves `available` records in pages of 10 and records every offset requested.
    struct PagedProvider {
        available: usize,
        total_results: Option<u64>,
        fail_at_offset: Option<(usize, &'static str)>,
        offsets: Mutex<Vec<usize>>,
    }

    impl PagedProvider {
        fn new(available: usize) -> Self {
            Self {
                available,
                total_results: Some(available as u64),
                fail_at_offset: None,
                offsets: Mutex::new(Vec::new()),
            }
        }

        fn offsets(&self) -> Vec<usize> {
            self.offsets.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl QueryExecutor for PagedProvider {
        async fn fetch(&self, query: &Query) -> Result<ResultPage> {
            let offset = query.offset();
            self.offsets.lock().expect("lock").push(offset);

            if let Some((at, message)) = self.fail_at_offset {
                if at == offset {
                    return Err(provider_error(message));
                }
            }
            if self.available == 0 {
                return Err(provider_error(EMPTY_RESULT_SENTINEL));
            }

            let end = (offset + PAGE_SIZE).min(self.available);
            let records = (offset..end).map(record).collect();
            Ok(ResultPage::new(records, self.total_results))
        }
    }

    #[tokio::test]
    async fn test_small_request_is_single_fetch_and_truncated() {
        let provider = PagedProvider::new(100);
        let records = accumulate(&provider, &Query::search("x"), 3).await.expect("accumulate");

        assert_eq!(records.len(), 3);
        assert_eq!(provider.offsets(), vec![0]);
        assert_eq!(records[2].result_id, "r2");
    }

    #[tokio::test]
    async fn test_fewer_available_than_requested_in_one_page() {
        let provider = PagedProvider::new(5);
        let records = accumulate(&provider, &Query::search("x"), 8).await.expect("accumulate");

        assert_eq!(records.len(), 5);
        assert_eq!(provider.offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_total_caps_request() {
        let provider = PagedProvider::new(25);
        let records = accumulate(&provider, &Query::search("x"), 200).await.expect("accumulate");

        assert_eq!(records.len(), 25);
        assert_eq!(provider.offsets(), vec![0, 10, 20]);
    }

    #[tokio::test]
    async fn test_request_caps_total() {
        let provider = PagedProvider::new(25);
        let records = accumulate(&provider, &Query::search("x"), 15).await.expect("accumulate");

        assert_eq!(records.len(), 15);
        assert_eq!(provider.offsets(), vec![0, 10]);
        let ids: Vec<&str> = records.iter().map(|r| r.result_id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"r0"));
        assert_eq!(ids.last(), Some(&"r14"));
    }

    #[tokio::test]
    async fn test_missing_total_means_single_page() {
        let mut provider = PagedProvider::new(25);
        provider.total_results = None;
        let records = accumulate(&provider, &Query::search("x"), 200).await.expect("accumulate");

        assert_eq!(records.len(), 10);
        assert_eq!(provider.offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_empty_sentinel_returns_empty() {
        let provider = PagedProvider::new(0);
        let records = accumulate(&provider, &Query::cites("1"), 200).await.expect("accumulate");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_sentinel_mid_pagination_keeps_collected() {
        let mut provider = PagedProvider::new(30);
        provider.fail_at_offset = Some((20, EMPTY_RESULT_SENTINEL));
        let records = accumulate(&provider, &Query::search("x"), 200).await.expect("accumulate");
        assert_eq!(records.len(), 20);
    }

    #[tokio::test]
    async fn test_other_error_is_fatal() {
        let mut provider = PagedProvider::new(30);
        provider.fail_at_offset = Some((10, "Invalid API key. Your API key should be here"));
        let err = accumulate(&provider, &Query::search("x"), 200)
            .await
            .expect_err("should fail");

        assert!(!err.is_empty_result());
        assert!(matches!(err, SurveyError::Provider { .. }));
    }

    #[tokio::test]
    async fn test_zero_max_does_not_fetch() {
        let provider = PagedProvider::new(30);
        let records = accumulate(&provider, &Query::search("x"), 0).await.expect("accumulate");
        assert!(records.is_empty());
        assert!(provider.offsets().is_empty());
    }

    #[tokio::test]
    async fn test_overreported_total_stops_on_empty_page() {
        let mut provider = PagedProvider::new(12);
        provider.total_results = Some(500);
        let records = accumulate(&provider, &Query::search("x"), 200).await.expect("accumulate");

        assert_eq!(records.len(), 12);
        assert_eq!(provider.offsets(), vec![0, 10, 12]);
    }

    #[tokio::test]
    async fn test_get_paper() {
        let provider = PagedProvider::new(5);
        let paper = get_paper(&provider, &Query::search("x")).await.expect("get_paper");
        assert_eq!(paper.map(|p| p.result_id), Some("r0".to_string()));

        let none = get_paper(&PagedProvider::new(0), &Query::search("x"))
            .await
            .expect("get_paper");
        assert!(none.is_none());
    }
}

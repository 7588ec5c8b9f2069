//! SerpApi Google Scholar client.
//!
//! Issues `search.json` requests with `engine=google_scholar` and turns the
//! JSON body into a [`ResultPage`]. Provider-side errors are reported in the
//! body's `error` field, usually with a 200 status.

use crate::error::{SurveyError, Result};
use crate::executor::QueryExecutor;
use crate::query::Query;
use crate::record::{ResultPage, ResultRecord};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Default SerpApi endpoint
pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com";

/// Results per page served by the Google Scholar engine
pub const PAGE_SIZE: usize = 10;

const USER_AGENT: &str = concat!("scholarsurvey/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// SerpApi client for the Google Scholar engine
#[derive(Debug, Clone)]
pub struct SerpApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    /// Create a client against the public SerpApi endpoint
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_SERPAPI_URL)
    }

    /// Create a client against a custom endpoint (mirror or test server)
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SurveyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_search_url(&self, query: &Query) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/search.json", self.base_url))
            .map_err(|e| SurveyError::Config(format!("Invalid base URL: {}", e)))?;

        {
            let mut params = url.query_pairs_mut();
            params.append_pair("engine", "google_scholar");
            for (key, value) in query.params() {
                params.append_pair(key, value);
            }
            params.append_pair("api_key", &self.api_key);
        }

        Ok(url)
    }
}

#[async_trait]
impl QueryExecutor for SerpApiClient {
    async fn fetch(&self, query: &Query) -> Result<ResultPage> {
        let url = self.build_search_url(query)?;
        debug!(query = %query, offset = query.offset(), "Fetching page");

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SurveyError::RateLimited(60));
        }

        let body = response.text().await?;
        parse_response(query, status.as_u16(), &body)
    }
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    search_information: Option<SearchInformation>,
    #[serde(default)]
    organic_results: Vec<ResultRecord>,
}

#[derive(Debug, Deserialize)]
struct SearchInformation {
    #[serde(default)]
    total_results: Option<u64>,
}

/// Turn a raw response body into a page, classifying provider errors.
fn parse_response(query: &Query, status: u16, body: &str) -> Result<ResultPage> {
    let success = (200..300).contains(&status);

    let parsed: SerpResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !success => {
            return Err(SurveyError::Api {
                code: status,
                message: format!("SerpApi error: {}", truncate(body, 200)),
            });
        }
        Err(e) => return Err(SurveyError::Json(e)),
    };

    if let Some(message) = parsed.error {
        return Err(SurveyError::Provider {
            query: query.to_string(),
            message,
            payload: body.to_string(),
        });
    }

    if !success {
        warn!(status, "SerpApi returned non-success status without error field");
        return Err(SurveyError::Api {
            code: status,
            message: format!("HTTP error: {}", status),
        });
    }

    let total_results = parsed.search_information.and_then(|info| info.total_results);
    Ok(ResultPage::new(parsed.organic_results, total_results))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

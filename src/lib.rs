//! # scholarsurvey
//!
//! Well-cited paper surveys from Google Scholar results, fetched through SerpApi.
//!
//! ## Modules
//!
//! - [`accumulator`] - Pagination up to a result cap
//! - [`serpapi`] - SerpApi Google Scholar client
//! - [`extract`] - Year, citation, author and related-key extraction
//! - [`filter`] - Year-scaled citation threshold
//! - [`table`] - Survey table and CSV export
//! - [`config`] - API key loading
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scholarsurvey::{accumulate, build_table, Credentials, FilterArgs, Query, SerpApiClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let creds = Credentials::load(None)?;
//!     let client = SerpApiClient::new(creds.into_api_key())?;
//!     let citing = accumulate(&client, &Query::cites("7379463099867128855"), 200).await?;
//!     let table = build_table(&citing, &FilterArgs::default())?;
//!     println!("{} well-cited papers", table.len());
//!     Ok(())
//! }
//! ```

pub mod accumulator;
pub mod config;
pub mod error;
pub mod executor;
pub mod extract;
pub mod filter;
pub mod query;
pub mod record;
pub mod serpapi;
pub mod table;

pub use accumulator::{accumulate, get_paper, DEFAULT_MAX_RESULTS};
pub use config::Credentials;
pub use error::{Result, SurveyError, EMPTY_RESULT_SENTINEL};
pub use executor::QueryExecutor;
pub use filter::{has_enough_citations, FilterArgs};
pub use query::Query;
pub use record::{ResultPage, ResultRecord};
pub use serpapi::SerpApiClient;
pub use table::{build_table, SurveyRow, SurveyTable, SURVEY_COLUMNS};

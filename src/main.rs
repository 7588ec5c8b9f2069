//! scholarsurvey - well-cited paper surveys from Google Scholar
//!
//! ## Usage
//!
//! ```bash
//! scholarsurvey papers --cites 7379463099867128855 --max 200
//! scholarsurvey papers --related 5Gohgn6QFikJ
//! scholarsurvey paper --query "Attention is all you need"
//! scholarsurvey paper --cites 7379463099867128855
//! ```

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use scholarsurvey::{
    accumulate, build_table, get_paper, Credentials, FilterArgs, Query, SerpApiClient,
    DEFAULT_MAX_RESULTS,
};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Well-cited paper surveys from Google Scholar
#[derive(Parser)]
#[command(name = "scholarsurvey")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Config file holding SERP_API_KEY (default: ~/.serpapi.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect papers and save the well-cited ones as CSV
    Papers {
        #[command(flatten)]
        target: Target,

        /// Maximum number of results to fetch
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max: usize,

        /// Citations per year required for inclusion
        #[arg(long, default_value_t = 8)]
        required_annual_count: u32,

        /// Last full year of the survey
        #[arg(long, default_value_t = 2020)]
        final_year: i32,

        /// Year assumed for papers with no detectable year
        #[arg(long, default_value_t = 2022)]
        default_year: i32,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,
    },

    /// Show the first paper matching a search
    Paper {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Target {
    /// Papers citing the paper with this cites id
    #[arg(long)]
    cites: Option<String>,

    /// Free-text search
    #[arg(long)]
    query: Option<String>,

    /// Papers related to the result with this id
    #[arg(long)]
    related: Option<String>,
}

impl Target {
    fn to_query(&self) -> Result<Query> {
        match (&self.cites, &self.query, &self.related) {
            (Some(id), _, _) => Ok(Query::cites(id)),
            (_, Some(text), _) => Ok(Query::search(text)),
            (_, _, Some(id)) => Ok(Query::related(id)),
            _ => anyhow::bail!("One of --cites, --query or --related is required"),
        }
    }

    fn label(&self) -> &str {
        self.cites
            .as_deref()
            .or(self.query.as_deref())
            .or(self.related.as_deref())
            .unwrap_or("survey")
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if cli.log_json {
        fmt().json().with_env_filter(filter).with_target(true).init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .init();
    }

    let credentials = Credentials::load(cli.config.as_deref())
        .context("Failed to load SerpApi credentials")?;
    let client = SerpApiClient::new(credentials.into_api_key())?;

    match cli.command {
        Commands::Papers {
            target,
            max,
            required_annual_count,
            final_year,
            default_year,
            output,
        } => {
            let args = FilterArgs {
                required_annual_count,
                final_year,
                default_year,
            };
            run_papers(&client, &target, max, &args, &output).await
        }
        Commands::Paper { target } => run_paper(&client, &target).await,
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn run_papers(
    client: &SerpApiClient,
    target: &Target,
    max: usize,
    args: &FilterArgs,
    output_dir: &Path,
) -> Result<()> {
    let query = target.to_query()?;

    let records = accumulate(client, &query, max)
        .await
        .with_context(|| format!("Failed to retrieve papers for {}", query))?;

    if records.is_empty() {
        println!("No results for {}.", query);
        return Ok(());
    }
    println!("Retrieved {} papers.", records.len());

    let table = build_table(&records, args).context("Failed to build survey table")?;
    println!(
        "{} of {} papers are well cited ({} citations/year, final year {}).",
        table.len(),
        records.len(),
        args.required_annual_count,
        args.final_year
    );

    let output_folder = output_folder(output_dir, target.label());
    std::fs::create_dir_all(&output_folder).context("Failed to create output directory")?;

    let path = output_folder.join("well_cited.csv");
    table.write_csv(&path).context("Failed to write CSV")?;
    println!("Saved: {}", path.display());
    Ok(())
}

async fn run_paper(client: &SerpApiClient, target: &Target) -> Result<()> {
    let query = target.to_query()?;
    match get_paper(client, &query).await? {
        Some(record) => {
            info!(result_id = %record.result_id, "Found paper");
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        None => println!("No results for {}.", query),
    }
    Ok(())
}

/// `<output_dir>/<timestamp>_<label>`, with the label reduced to safe characters
fn output_folder(output_dir: &Path, label: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let safe_label: String = label
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect::<String>()
        .trim()
        .replace(' ', "_");
    output_dir.join(format!("{}_{}", timestamp, safe_label))
}

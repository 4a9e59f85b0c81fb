//! Command-line interface for bq-should
//!
//! # Usage Examples
//!
//! ## Suite files
//! ```bash
//! # Run every test in a suite
//! bq-should run --suite checks.yaml \
//!   --key-path /path/to/key.json \
//!   --project-id my-project
//!
//! # Run selected tests only, with credentials from the environment
//! GOOGLE_KEY_PATH=/path/to/key.json GOOGLE_PROJECT_ID=my-project \
//!   bq-should run --suite checks.yaml --only "comment count,story count"
//! ```
//!
//! ## Ad-hoc checks
//! ```bash
//! bq-should check \
//!   --sql "#standardSQL
//! SELECT COUNT(*) FROM \`bigquery-public-data.hacker_news.comments\`" \
//!   --expect "comments@0,0=8399417"
//! ```
//!
//! ## Expectation Format
//! - `ROW,COL=VALUE` compares the cell at (ROW, COL) with VALUE as text
//! - `LABEL@ROW,COL=VALUE` also names the condition in failure messages

use anyhow::Context;
use bq_should::{BigQueryArgs, BigQueryConfig, BigQueryExecutor, Expectation, Suite, TestSet};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bq-should")]
#[command(about = "Check BigQuery query results against expected cell values")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tests in a YAML suite file
    Run {
        /// Path to suite YAML file
        #[arg(long, short = 's')]
        suite: PathBuf,

        /// Only run these tests (comma-separated, empty = all tests)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// BigQuery connection options
        #[command(flatten)]
        bigquery: BigQueryArgs,
    },

    /// Run one query and check cells given on the command line
    Check {
        /// SQL to execute
        #[arg(long)]
        sql: String,

        /// Expected cell, as [LABEL@]ROW,COL=VALUE (repeatable)
        #[arg(long = "expect", value_name = "EXPECTATION", required = true)]
        expectations: Vec<Expectation>,

        /// BigQuery connection options
        #[command(flatten)]
        bigquery: BigQueryArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            suite,
            only,
            bigquery,
        } => run_suite(suite, only, bigquery).await,
        Commands::Check {
            sql,
            expectations,
            bigquery,
        } => run_check(sql, expectations, bigquery).await,
    }
}

async fn connect(args: &BigQueryArgs) -> anyhow::Result<BigQueryExecutor> {
    let config = BigQueryConfig::try_from(args).context("Invalid BigQuery configuration")?;
    BigQueryExecutor::connect(config)
        .await
        .context("Failed to connect to BigQuery")
}

/// Run a suite file and fail if any test fails
async fn run_suite(path: PathBuf, only: Vec<String>, bigquery: BigQueryArgs) -> anyhow::Result<()> {
    let suite = Suite::from_file(&path)
        .with_context(|| format!("Failed to load suite from {path:?}"))?
        .filter(&only)?;

    tracing::info!(
        "Running {} test(s) from {:?}",
        suite.tests.len(),
        path
    );

    let executor = connect(&bigquery).await?;
    let report = suite.run(&executor).await;

    if report.is_success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(report.summary()))
    }
}

/// Run a single ad-hoc test set
async fn run_check(
    sql: String,
    expectations: Vec<Expectation>,
    bigquery: BigQueryArgs,
) -> anyhow::Result<()> {
    let mut set = TestSet::query(sql);
    for expectation in &expectations {
        expectation.apply(&mut set);
    }

    let executor = connect(&bigquery).await?;
    set.test(&executor).await.into_result()?;
    tracing::info!("All {} condition(s) passed", set.len());
    Ok(())
}

//! Command-line entry point for the `txhistory` binary.

use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::Address;
use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::{debug, info, warn};

use crate::config::constants::{
    API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_END_BLOCK, DEFAULT_OUTPUT_DIR,
};
use crate::export::whole_range_path;
use crate::transport::total_backoff;
use crate::{
    fetch_whole_range, BatchSize, BlockRange, CsvExporter, ExplorerClient, ExplorerConfigBuilder,
    RangeBatcher, TransactionSink,
};

/// Fetch an account's transaction history and export it as CSV
#[derive(Debug, Clone, Parser)]
#[command(name = "txhistory", version, about)]
pub struct Args {
    /// Account address to fetch transactions for
    #[arg(long, value_parser = parse_address)]
    pub address: String,

    /// Explorer API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub apikey: String,

    /// Directory to save CSV output
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Starting block number
    #[arg(long, default_value_t = 0)]
    pub start: u64,

    /// Ending block number
    #[arg(long, default_value_t = DEFAULT_END_BLOCK)]
    pub end: u64,

    /// Process in chunks of this many blocks (0 fetches the whole range at once)
    #[arg(long, default_value_t = 0)]
    pub batch: u64,

    /// Explorer API endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
}

/// Accept a 20-byte hex address, keeping the text as given.
fn parse_address(raw: &str) -> Result<String, String> {
    Address::from_str(raw)
        .map(|_| raw.to_string())
        .map_err(|e| format!("invalid address {raw:?}: {e}"))
}

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables before parsing so the API key can come from .env
    dotenv().ok();

    let args = Args::parse();
    execute(args).await
}

/// Run one export for already parsed arguments.
pub async fn execute(args: Args) -> anyhow::Result<()> {
    let config = ExplorerConfigBuilder::new(args.apikey.as_str())
        .base_url(args.base_url.as_str())
        .build();
    debug!(
        config = ?config,
        worst_case_backoff_ms = total_backoff(&config.retry).as_millis() as u64,
        "Explorer configuration"
    );

    tokio::fs::create_dir_all(&args.output)
        .await
        .with_context(|| format!("Error creating output directory {}", args.output.display()))?;

    let client = ExplorerClient::from_config(config)?;
    let range = BlockRange::new(args.start, args.end);
    info!(address = %args.address, range = %range, "Fetching transactions");

    if args.batch > 0 {
        let batcher = RangeBatcher::new(client, CsvExporter::new(), &args.output);
        let summary = batcher
            .run(&args.address, range, BatchSize::new(args.batch))
            .await?;

        if !summary.is_complete() {
            warn!(
                failures = summary.failures.len(),
                "Some categories were skipped; see warnings above"
            );
        }
        info!(
            transactions = summary.transactions.len(),
            chunks = summary.chunks_processed,
            path = %summary.output_path.display(),
            "Batch processing complete"
        );
        return Ok(());
    }

    let transactions = fetch_whole_range(&client, &args.address, range)
        .await
        .context("Error fetching transactions")?;

    let path = whole_range_path(&args.output, &args.address);
    CsvExporter::new()
        .write(&transactions, &path)
        .context("Error exporting to CSV")?;

    info!(
        transactions = transactions.len(),
        path = %path.display(),
        "Exported transaction history"
    );
    Ok(())
}

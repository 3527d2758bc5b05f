//! The "Load Tester" app's entry point.

use blockdb_common::cli::constants::{DEFAULT_LOAD_URLS, DEFAULT_ROUNDS};
use blockdb_common::cli::helpers::{get_base_urls, init_logging};
use blockdb_common::operations::sample_operations;
use blockdb_load_tester::{build_client, run_load};
use clap::Parser;
use std::error::Error;
use std::time::Duration;

/// Fires the sample write operations at every server concurrently
/// and reports how many succeeded.
#[derive(Parser, Debug)]
#[command(name = "blockdb_load_tester")]
#[command(version)]
struct Args {
    /// Server base URL; repeat for several servers (default: ports 8080-8082 on localhost)
    #[arg(short, long = "url")]
    urls: Vec<String>,

    /// How many times the list of servers is repeated
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
    rounds: usize,

    /// Per-request timeout in seconds; requests that exceed it count as not returned
    #[arg(short, long)]
    timeout_secs: Option<u64>,
}

/// The "Load Tester" app's entry point.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args = Args::parse();

    let base_urls = get_base_urls(&args.urls, &DEFAULT_LOAD_URLS).map_err(|err| {
        log::error!("{}", err);
        err
    })?;

    let client = build_client(args.timeout_secs.map(Duration::from_secs))?;
    let operations = sample_operations();

    let report = run_load(&client, &base_urls, args.rounds, &operations).await?;
    println!("{}", report);

    Ok(())
}

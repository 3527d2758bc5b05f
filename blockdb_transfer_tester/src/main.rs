//! The "Transfer Tester" app's entry point.

use blockdb_common::accounts::Accounts;
use blockdb_common::cli::constants::*;
use blockdb_common::cli::helpers::{get_base_url, init_logging};
use blockdb_transfer_tester::{TesterConfig, TransferTester};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

/// Sends random balance transfers through the transaction executor
/// and checks every resulting balance on the server.
#[derive(Parser, Debug)]
#[command(name = "blockdb_transfer_tester")]
#[command(version)]
struct Args {
    /// Accounts to use, as `private_key=initial_balance`
    #[arg(required = true, num_args = 2..)]
    accounts: Vec<String>,

    /// Base URL of the database service
    #[arg(short, long, env = "BLOCKDB_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Path of the transaction executor
    #[arg(short, long, env = "BLOCKDB_TOOL")]
    tool: PathBuf,

    /// Program that runs the executor; pass "" to run it directly
    #[arg(long, default_value = DEFAULT_INTERPRETER)]
    interpreter: String,

    /// Amount moved by every transfer
    #[arg(short, long, default_value_t = DEFAULT_TRANSFER_AMOUNT)]
    amount: u64,

    /// Where each transaction is written before the executor runs
    #[arg(long, default_value = DEFAULT_TRANSACTION_FILE)]
    transaction_file: PathBuf,

    /// Pause before every executor run, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PRE_EXEC_DELAY_MS)]
    pre_exec_delay_ms: u64,

    /// Pause between a transfer and its balance checks, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY_MS)]
    settle_delay_ms: u64,

    /// Balance fetches per check before giving up
    #[arg(long, default_value_t = DEFAULT_BALANCE_ATTEMPTS)]
    attempts: u32,

    /// Pause between failed balance fetches, in milliseconds
    #[arg(long, default_value_t = 0)]
    retry_delay_ms: u64,

    /// Stop after this many transfers instead of running forever
    #[arg(short, long)]
    iterations: Option<u64>,
}

/// The "Transfer Tester" app's entry point.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args = Args::parse();

    let accounts = Accounts::from_args(&args.accounts)?;
    let server = get_base_url(Some(&args.server), DEFAULT_SERVER)?;

    let config = TesterConfig {
        interpreter: Some(args.interpreter),
        amount: args.amount,
        transaction_file: args.transaction_file,
        pre_exec_delay: Duration::from_millis(args.pre_exec_delay_ms),
        settle_delay: Duration::from_millis(args.settle_delay_ms),
        attempts: args.attempts,
        retry_delay: Duration::from_millis(args.retry_delay_ms),
        iterations: args.iterations,
        ..TesterConfig::new(server, args.tool)
    };

    let mut tester = TransferTester::new(config, accounts, Client::new(), StdRng::from_entropy());

    if let Err(err) = tester.run().await {
        log::error!("{}", err);
        return Err(err.into());
    }

    Ok(())
}

use blockdb_common::cli::constants::*;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// **Everything the transfer tester needs to know up front**
#[derive(Clone, Debug)]
pub struct TesterConfig {
    /// Base URL of the database service
    pub server: Url,
    /// Path of the transaction executor
    pub tool: PathBuf,
    /// Program that runs [`TesterConfig::tool`]; `None` runs the tool directly
    pub interpreter: Option<String>,
    /// Amount moved by every transfer
    pub amount: u64,
    /// Where each transaction is written before the executor runs
    pub transaction_file: PathBuf,
    /// Pause before every executor run
    pub pre_exec_delay: Duration,
    /// Pause between a transfer and the balance checks
    pub settle_delay: Duration,
    /// Balance fetches per check before giving up
    pub attempts: u32,
    /// Pause between failed balance fetches
    pub retry_delay: Duration,
    /// Number of transfers; `None` keeps going until a check fails
    pub iterations: Option<u64>,
}

impl TesterConfig {
    /// A config with the stock delays and amount.
    pub fn new(server: Url, tool: PathBuf) -> Self {
        Self {
            server,
            tool,
            interpreter: Some(DEFAULT_INTERPRETER.to_string()),
            amount: DEFAULT_TRANSFER_AMOUNT,
            transaction_file: PathBuf::from(DEFAULT_TRANSACTION_FILE),
            pre_exec_delay: Duration::from_millis(DEFAULT_PRE_EXEC_DELAY_MS),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            attempts: DEFAULT_BALANCE_ATTEMPTS,
            retry_delay: Duration::ZERO,
            iterations: None,
        }
    }
}

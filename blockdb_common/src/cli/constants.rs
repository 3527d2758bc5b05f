/// Default servers hit by the load tester

pub const DEFAULT_LOAD_URLS: [&str; 3] = [
    "http://127.0.0.1:8080",
    "http://127.0.0.1:8081",
    "http://127.0.0.1:8082",
];
pub const DEFAULT_ROUNDS: usize = 300;

/// Transfer tester defaults

pub const DEFAULT_SERVER: &str = "http://localhost:8080/";
pub const DEFAULT_INTERPRETER: &str = "node";
pub const DEFAULT_TRANSFER_AMOUNT: u64 = 5;
pub const DEFAULT_TRANSACTION_FILE: &str = "transaction.txt";
pub const DEFAULT_PRE_EXEC_DELAY_MS: u64 = 1000;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 2000;
pub const DEFAULT_BALANCE_ATTEMPTS: u32 = 3;

/// Dummy server defaults

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Logging

pub const DEFAULT_LOG_FILTER: &str = "blockdb=info";

//! Simulates balance transfers between test accounts through the external
//! transaction executor, and checks that the server ends up with the
//! balances we expect.

pub mod config;
pub mod executor;
pub mod keys;
pub mod logic;
pub mod server;

pub use config::TesterConfig;
pub use logic::{select_accounts, TransferTester};

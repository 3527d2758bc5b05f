pub mod accounts;
pub mod cli;
pub mod errors;
pub mod nonce;
pub mod operations;
pub mod requests;
pub mod tx;
pub mod validation;

pub use requests::*;

//! Error types shared by the test tools

/// **An error raised by the local account ledger**
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AccountingError {
    #[error("account \"{0}\" doesn't exist")]
    AccountNotFound(String),
    #[error("account \"{0}\" can't afford to withdraw {1}")]
    AccountUnderFunded(String, u64),
    #[error("account \"{0}\" would overflow when receiving {1}")]
    AccountOverFunded(String, u64),
}

/// **A malformed `key=balance` command-line argument**
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum AccountArgError {
    #[error("expected `key=balance`, got \"{0}\"")]
    MissingSeparator(String),
    #[error("invalid private key in \"{0}\": {1}")]
    InvalidKey(String, &'static str),
    #[error("only non-negative integer balances are allowed; got \"{0}\"")]
    BadBalance(String),
    #[error("the private key \"{0}\" was given more than once")]
    DuplicateKey(String),
}

/// **A problem found while setting up a load run, before anything is sent**
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("base URL \"{0}\" could not be parsed: {1}")]
    BadBaseUrl(String, url::ParseError),
    #[error("base URL \"{0}\" can't have a path joined onto it")]
    NotABase(String),
    #[error("{0} servers repeated {1} times is more requests than can be counted")]
    TooManyRequests(usize, usize),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// **Everything that can stop the transfer tester**
#[derive(Debug, thiserror::Error)]
pub enum TesterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Accounting(#[from] AccountingError),
    #[error(transparent)]
    AccountArg(#[from] AccountArgError),
    #[error("at least two accounts are needed for transfers; got {0}")]
    NotEnoughAccounts(usize),
    #[error("no account can afford to send {0}")]
    NoEligibleSender(u64),
    #[error("no unclaimed public key on the server for private key \"{0}\"")]
    PublicKeyNotFound(String),
    #[error("private key \"{0}\" has no known public key")]
    UnknownPublicKey(String),
    #[error("the server returned no usable result for \"{0}\"")]
    MissingResult(String),
    #[error("balance of {address} is {actual}, expected {expected} (after {attempts} attempts)")]
    BalanceMismatch {
        address: String,
        expected: u64,
        actual: u64,
        attempts: u32,
    },
}

use crate::errors::{AccountArgError, AccountingError};
use crate::validation::is_valid_key;
use std::collections::BTreeMap;

/// **A type for tracking the expected balance of each test account**
///
/// Maps a private-key identifier to its `u64` balance.
///
/// It mirrors the transfers that were submitted to the server,
/// so it can be compared against what the server reports.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Accounts {
    accounts: BTreeMap<String, u64>,
}

impl Accounts {
    /// Returns an empty instance of the [`Accounts`] type
    pub fn new() -> Self {
        Accounts {
            accounts: BTreeMap::new(),
        }
    }

    /// **Builds the ledger from `key=balance` arguments**
    ///
    /// # Errors
    /// - See [`parse_account_arg`]; plus
    /// - The same key given twice, `AccountArgError::DuplicateKey`.
    pub fn from_args<I, S>(args: I) -> Result<Self, AccountArgError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accounts = Accounts::new();
        for arg in args {
            let (key, balance) = parse_account_arg(arg.as_ref())?;
            if accounts.accounts.insert(key.clone(), balance).is_some() {
                return Err(AccountArgError::DuplicateKey(key));
            }
        }
        Ok(accounts)
    }

    /// Number of accounts.
    pub fn count(&self) -> usize {
        self.accounts.len()
    }

    /// Iterates over `(key, balance)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.accounts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Account keys in key order.
    pub fn keys(&self) -> Vec<&str> {
        self.accounts.keys().map(String::as_str).collect()
    }

    /// Retrieves the balance of an account
    ///
    /// # Errors
    /// - Account doesn't exist, `AccountingError::AccountNotFound`
    pub fn balance_of(&self, signer: &str) -> Result<u64, AccountingError> {
        self.accounts
            .get(signer)
            .copied()
            .ok_or(AccountingError::AccountNotFound(signer.to_string()))
    }

    /// Deposits the `amount` provided into the new `signer` account if it doesn't exist,
    /// or adds the `amount` to the existing account.
    ///
    /// # Errors
    /// - Attempted overflow (account over-funded), `AccountingError::AccountOverFunded`
    pub fn deposit(&mut self, signer: &str, amount: u64) -> Result<u64, AccountingError> {
        if let Some(balance) = self.accounts.get_mut(signer) {
            balance
                .checked_add(amount)
                .map(|r| {
                    *balance = r;
                    r
                })
                .ok_or(AccountingError::AccountOverFunded(
                    signer.to_string(),
                    amount,
                ))
        } else {
            self.accounts.insert(signer.to_string(), amount);
            Ok(amount)
        }
    }

    /// Withdraws the `amount` from the `signer` account, if it exists.
    ///
    /// # Errors
    /// - Account doesn't exist, `AccountingError::AccountNotFound`;
    /// - Attempted overflow (account under-funded), `AccountingError::AccountUnderFunded`.
    pub fn withdraw(&mut self, signer: &str, amount: u64) -> Result<u64, AccountingError> {
        if let Some(balance) = self.accounts.get_mut(signer) {
            balance
                .checked_sub(amount)
                .map(|r| {
                    *balance = r;
                    r
                })
                .ok_or(AccountingError::AccountUnderFunded(
                    signer.to_string(),
                    amount,
                ))
        } else {
            Err(AccountingError::AccountNotFound(signer.to_string()))
        }
    }

    /// Moves the amount from the sender's account to the
    /// recipient's account if it wouldn't overflow.
    ///
    /// Returns the new balances of the sender and the recipient.
    /// Nothing changes on error.
    ///
    /// # Errors
    /// - Any of the two accounts doesn't exist, `AccountingError::AccountNotFound`;
    /// - Attempted overflow (sender's account under-funded),
    ///   `AccountingError::AccountUnderFunded`;
    /// - Attempted overflow (recipient's account over-funded),
    ///   `AccountingError::AccountOverFunded`.
    pub fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: u64,
    ) -> Result<(u64, u64), AccountingError> {
        // The recipient is checked up front so that a failed deposit
        // never leaves the sender already debited.
        let recipient_balance = self.balance_of(recipient)?;
        if recipient_balance.checked_add(amount).is_none() {
            return Err(AccountingError::AccountOverFunded(
                recipient.to_string(),
                amount,
            ));
        }

        let sender_balance = self.withdraw(sender, amount)?;
        let recipient_balance = self.deposit(recipient, amount)?;

        Ok((sender_balance, recipient_balance))
    }

    /// Keys whose balance covers `amount`, in key order.
    pub fn eligible_senders(&self, amount: u64) -> Vec<&str> {
        self.accounts
            .iter()
            .filter(|(_, balance)| **balance >= amount)
            .map(|(key, _)| key.as_str())
            .collect()
    }
}

/// **Parses a single `key=balance` argument**
///
/// The balance must be a non-negative integer.
/// Only the first `=` separates; whitespace around both halves is ignored.
///
/// # Errors
/// - No `=`, `AccountArgError::MissingSeparator`;
/// - Empty key or one with whitespace, `AccountArgError::InvalidKey`;
/// - Balance isn't a `u64`, `AccountArgError::BadBalance`.
pub fn parse_account_arg(arg: &str) -> Result<(String, u64), AccountArgError> {
    let (key, balance) = arg
        .split_once('=')
        .ok_or_else(|| AccountArgError::MissingSeparator(arg.to_string()))?;

    let key = key.trim();
    if let Some(msg) = is_valid_key(key) {
        return Err(AccountArgError::InvalidKey(arg.to_string(), msg));
    }

    let balance = balance
        .trim()
        .parse::<u64>()
        .map_err(|_| AccountArgError::BadBalance(balance.trim().to_string()))?;

    Ok((key.to_string(), balance))
}

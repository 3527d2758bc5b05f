use crate::config::TesterConfig;
use crate::executor::ToolCommand;
use crate::keys::KeyBook;
use crate::server::ServerClient;
use blockdb_common::accounts::Accounts;
use blockdb_common::errors::TesterError;
use blockdb_common::nonce::NonceTracker;
use blockdb_common::tx::{write_transaction_file, Tx};
use rand::seq::SliceRandom;
use rand::Rng;
use reqwest::Client;
use tokio::time::sleep;

/// **Picks a random sender that can afford `amount` and a random, different receiver**
///
/// # Errors
/// - Fewer than two accounts, `TesterError::NotEnoughAccounts`;
/// - Nobody can afford `amount`, `TesterError::NoEligibleSender`.
pub fn select_accounts<R: Rng + ?Sized>(
    accounts: &Accounts,
    amount: u64,
    rng: &mut R,
) -> Result<(String, String), TesterError> {
    if accounts.count() < 2 {
        return Err(TesterError::NotEnoughAccounts(accounts.count()));
    }

    let sender = accounts
        .eligible_senders(amount)
        .choose(rng)
        .map(|sender| sender.to_string())
        .ok_or(TesterError::NoEligibleSender(amount))?;

    let receivers: Vec<&str> = accounts
        .keys()
        .into_iter()
        .filter(|key| *key != sender)
        .collect();
    let receiver = receivers
        .choose(rng)
        .map(|receiver| receiver.to_string())
        .ok_or(TesterError::NotEnoughAccounts(accounts.count()))?;

    Ok((sender, receiver))
}

/// **Drives transfers through the executor and checks the server agrees**
///
/// Holds the expected state: balances, nonces, and the public key
/// of every test account.
pub struct TransferTester<R> {
    config: TesterConfig,
    tool: ToolCommand,
    server: ServerClient,
    accounts: Accounts,
    nonces: NonceTracker,
    keys: KeyBook,
    rng: R,
}

impl<R: Rng> TransferTester<R> {
    pub fn new(config: TesterConfig, accounts: Accounts, client: Client, rng: R) -> Self {
        let tool = ToolCommand::new(
            config.interpreter.clone(),
            config.tool.clone(),
            &config.server,
        );
        let server = ServerClient::new(client, config.server.clone());

        Self {
            config,
            tool,
            server,
            accounts,
            nonces: NonceTracker::new(),
            keys: KeyBook::new(),
            rng,
        }
    }

    /// The balances the tester currently expects.
    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    pub fn keys(&self) -> &KeyBook {
        &self.keys
    }

    /// **Writes the transaction, waits, then runs the executor**
    ///
    /// Failures reported by the executor are only logged.
    pub async fn execute_transaction(&self, private_key: &str, tx: &Tx) -> Result<(), TesterError> {
        let file = &self.config.transaction_file;
        write_transaction_file(tx, file)?;

        log::info!("Executing {}", self.tool.display(private_key, file));
        sleep(self.config.pre_exec_delay).await;

        let output = self.tool.execute(private_key, file).await?;
        log::debug!("Executor exited with {}", output.status);

        if output.had_error() {
            log::error!(
                "Command had error with output {:?}; stderr {:?}",
                output.stdout.trim(),
                output.stderr.trim()
            );
        } else {
            log::info!("Command successful");
        }

        Ok(())
    }

    /// **Sets every account's starting balance and learns its public key**
    ///
    /// Accounts are processed in key order.
    pub async fn set_initial_balances(&mut self) -> Result<(), TesterError> {
        let initial: Vec<(String, u64)> = self
            .accounts
            .iter()
            .map(|(key, balance)| (key.to_string(), balance))
            .collect();

        for (private_key, balance) in initial {
            let tx = Tx::balance_set(balance, self.nonces.next(&private_key));
            self.execute_transaction(&private_key, &tx).await?;
            self.discover_public_key(&private_key).await?;
        }

        Ok(())
    }

    async fn discover_public_key(&mut self, private_key: &str) -> Result<(), TesterError> {
        let addresses = self.server.account_addresses().await?;
        log::debug!("Accounts on the server: {:?}", addresses);

        let public_key = self
            .keys
            .claim(private_key, addresses.iter().map(String::as_str))?;
        log::info!("Public key for {} is {}", private_key, public_key);

        Ok(())
    }

    /// **Performs a single random transfer and verifies both balances**
    ///
    /// Returns the sender and the receiver.
    pub async fn transfer_once(&mut self) -> Result<(String, String), TesterError> {
        let amount = self.config.amount;
        let (sender, receiver) = select_accounts(&self.accounts, amount, &mut self.rng)?;

        let receiver_address = self.keys.public_key(&receiver)?.to_string();
        let tx = Tx::balance_transfer(&receiver_address, amount, self.nonces.next(&sender));
        self.execute_transaction(&sender, &tx).await?;

        self.accounts.transfer(&sender, &receiver, amount)?;

        sleep(self.config.settle_delay).await;
        self.check_balance(&sender).await?;
        self.check_balance(&receiver).await?;

        Ok((sender, receiver))
    }

    /// **Polls the server until it reports the expected balance**
    ///
    /// # Errors
    /// - Still wrong after `attempts` fetches, `TesterError::BalanceMismatch`;
    /// - The fetch itself failed (not retried).
    pub async fn check_balance(&self, private_key: &str) -> Result<(), TesterError> {
        let address = self.keys.public_key(private_key)?;
        let expected = self.accounts.balance_of(private_key)?;
        let attempts = self.config.attempts.max(1);

        let mut actual = 0;
        for attempt in 1..=attempts {
            actual = self.server.balance(address).await?;
            if actual == expected {
                return Ok(());
            }

            log::warn!(
                "Failed assertion for user {} (attempt {}/{})\nExpected Balance: {}\nActual Balance: {}",
                address,
                attempt,
                attempts,
                expected,
                actual
            );
            if attempt < attempts {
                sleep(self.config.retry_delay).await;
            }
        }

        Err(TesterError::BalanceMismatch {
            address: address.to_string(),
            expected,
            actual,
            attempts,
        })
    }

    /// **Seeds the accounts, then transfers until told to stop or a check fails**
    pub async fn run(&mut self) -> Result<(), TesterError> {
        if self.accounts.count() < 2 {
            return Err(TesterError::NotEnoughAccounts(self.accounts.count()));
        }

        self.set_initial_balances().await?;

        let mut done = 0;
        while self.config.iterations.map_or(true, |limit| done < limit) {
            let (sender, receiver) = self.transfer_once().await?;
            done += 1;
            log::info!(
                "Transfer #{} of {} from {} to {} verified",
                done,
                self.config.amount,
                sender,
                receiver
            );
        }

        Ok(())
    }
}

//! Reads against the database service

use blockdb_common::errors::TesterError;
use blockdb_common::{
    balance_from_value, balance_ref, GetValueRequest, ValueResponse, ALL_ACCOUNTS_REF,
};
use reqwest::{Client, Url};
use serde_json::Value;

/// **A thin client for `GET /get_value`**
#[derive(Clone, Debug)]
pub struct ServerClient {
    client: Client,
    base_url: Url,
}

impl ServerClient {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// **Fetches the `result` stored at `reference`**
    ///
    /// # Errors
    /// Any transport failure or a status of 400 or above.
    pub async fn get_value(&self, reference: &str) -> Result<Value, TesterError> {
        let url = self.base_url.join("get_value")?;
        let response = self
            .client
            .get(url)
            .query(&GetValueRequest::new(reference))
            .send()
            .await?
            .error_for_status()?;

        let envelope: ValueResponse = response.json().await?;
        log::debug!("get_value {} -> {:?}", reference, envelope);

        Ok(envelope.result)
    }

    /// Public keys of every account the server knows; none if nothing is there yet.
    pub async fn account_addresses(&self) -> Result<Vec<String>, TesterError> {
        match self.get_value(ALL_ACCOUNTS_REF).await? {
            Value::Object(accounts) => Ok(accounts.keys().cloned().collect()),
            Value::Null => Ok(vec![]),
            _ => Err(TesterError::MissingResult(ALL_ACCOUNTS_REF.to_string())),
        }
    }

    /// The balance the server reports for `address`.
    pub async fn balance(&self, address: &str) -> Result<u64, TesterError> {
        let reference = balance_ref(address);
        let value = self.get_value(&reference).await?;
        let balance = balance_from_value(&value).ok_or(TesterError::MissingResult(reference))?;

        log::info!("User with address {} has balance {}", address, balance);
        Ok(balance)
    }
}

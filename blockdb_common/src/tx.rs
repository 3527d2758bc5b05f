//! Signed-transaction payloads handed to the external transaction executor
//!
//! The executor reads a file holding one JSON transaction per line and
//! substitutes [`ADDRESS_PLACEHOLDER`] with the signer's own address.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Replaced by the executor with the signer's address.
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

/// The only operation type these tools emit
pub const SET_VALUE: &str = "SET_VALUE";

/// **The operation part of a transaction**
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TxOperation {
    #[serde(rename = "type")]
    pub op_type: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub value: Value,
}

/// **A transaction type**
///
/// Nonces are per signer and come from a
/// [`NonceTracker`](crate::nonce::NonceTracker).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Tx {
    pub operation: TxOperation,
    pub nonce: u64,
}

impl Tx {
    fn set_value(reference: String, value: Value, nonce: u64) -> Self {
        Self {
            operation: TxOperation {
                op_type: SET_VALUE.to_string(),
                reference,
                value,
            },
            nonce,
        }
    }

    /// Sets the signer's own balance at `/account/{address}/balance`.
    pub fn balance_set(balance: u64, nonce: u64) -> Self {
        Self::set_value(
            format!("/account/{ADDRESS_PLACEHOLDER}/balance"),
            Value::from(balance),
            nonce,
        )
    }

    /// Transfers `amount` from the signer to `receiver_address`.
    ///
    /// The nonce is part of the ref, so every transfer lands on a fresh path.
    pub fn balance_transfer(receiver_address: &str, amount: u64, nonce: u64) -> Self {
        Self::set_value(
            format!("/transfer/{ADDRESS_PLACEHOLDER}/{receiver_address}/{nonce}/value"),
            Value::from(amount),
            nonce,
        )
    }
}

/// **Writes the transaction to `path` as a single JSON line**
///
/// Overwrites any previous contents.
pub fn write_transaction_file(tx: &Tx, path: &Path) -> io::Result<()> {
    log::info!("Creating transaction {} in file {}", serde_json::to_string(tx)?, path.display());

    let mut file = fs::File::create(path)?;
    serde_json::to_writer(&mut file, tx)?;
    file.write_all(b"\n")?;
    file.flush()
}

/// **Reads back every transaction in a transaction file**
///
/// Blank lines are skipped, as the executor does.
pub fn read_transaction_file(path: &Path) -> io::Result<Vec<Tx>> {
    fs::read_to_string(path)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(io::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balance_set_shape() {
        let tx = Tx::balance_set(100, 0);
        assert_eq!(
            json!({
                "operation": {"type": "SET_VALUE", "ref": "/account/{address}/balance", "value": 100},
                "nonce": 0
            }),
            serde_json::to_value(&tx).unwrap()
        );
    }

    #[test]
    fn test_balance_transfer_shape() {
        let tx = Tx::balance_transfer("0xB0b", 5, 3);
        assert_eq!("/transfer/{address}/0xB0b/3/value", tx.operation.reference);
        assert_eq!(json!(5), tx.operation.value);
        assert_eq!(3, tx.nonce);
        assert_eq!(SET_VALUE, tx.operation.op_type);
    }

    #[test]
    fn test_transaction_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transaction.txt");
        let tx = Tx::balance_transfer("0x00ADEc28B6a845a085e03591bE7550dd68673C1C", 5, 42);

        write_transaction_file(&tx, &path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(1, contents.lines().count());
        assert!(contents.ends_with('\n'));
        assert_eq!(vec![tx], read_transaction_file(&path).unwrap());
    }

    #[test]
    fn test_transaction_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transaction.txt");

        write_transaction_file(&Tx::balance_set(10, 0), &path).unwrap();
        write_transaction_file(&Tx::balance_set(20, 1), &path).unwrap();

        assert_eq!(vec![Tx::balance_set(20, 1)], read_transaction_file(&path).unwrap());
    }
}

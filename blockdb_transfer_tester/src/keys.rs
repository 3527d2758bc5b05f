use blockdb_common::errors::TesterError;
use std::collections::BTreeMap;

/// **Maps each private key to the public key the server knows it by**
///
/// Public keys are discovered by elimination: after an account's first
/// transaction lands, the one account on the server that nobody has
/// claimed yet must be it. Accounts created by anyone else in the
/// meantime will confuse this.
#[derive(Debug, Default)]
pub struct KeyBook {
    public_keys: BTreeMap<String, String>,
}

impl KeyBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_claimed(&self, public_key: &str) -> bool {
        self.public_keys.values().any(|claimed| claimed == public_key)
    }

    /// **Claims the first unclaimed public key for `private_key`**
    ///
    /// Candidates are tried in sorted order. A key that already has a
    /// public key keeps it. When several candidates are unclaimed, the
    /// lowest one wins; a scan that keeps overwriting would pick the last
    /// one the server happened to list instead. Either way the guess is
    /// only right if nobody else added accounts in the meantime.
    ///
    /// # Errors
    /// - Every candidate is taken, `TesterError::PublicKeyNotFound`.
    pub fn claim<'a, I>(&mut self, private_key: &str, known: I) -> Result<&str, TesterError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if !self.public_keys.contains_key(private_key) {
            let mut candidates: Vec<&str> = known
                .into_iter()
                .filter(|public_key| !self.is_claimed(public_key))
                .collect();
            candidates.sort_unstable();

            let public_key = candidates
                .first()
                .ok_or_else(|| TesterError::PublicKeyNotFound(private_key.to_string()))?;
            self.public_keys
                .insert(private_key.to_string(), public_key.to_string());
        }

        self.public_key(private_key)
    }

    /// # Errors
    /// - Nothing claimed yet for this key, `TesterError::UnknownPublicKey`.
    pub fn public_key(&self, private_key: &str) -> Result<&str, TesterError> {
        self.public_keys
            .get(private_key)
            .map(String::as_str)
            .ok_or_else(|| TesterError::UnknownPublicKey(private_key.to_string()))
    }
}

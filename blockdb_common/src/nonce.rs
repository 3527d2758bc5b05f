use std::collections::HashMap;

/// **Hands out per-signer nonces**
///
/// The first nonce of every key is 0; each call to [`NonceTracker::next`]
/// returns the current value and advances it.
#[derive(Debug, Default)]
pub struct NonceTracker {
    nonces: HashMap<String, u64>,
}

impl NonceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, key: &str) -> u64 {
        let counter = self.nonces.entry(key.to_string()).or_insert(0);
        let nonce = *counter;
        *counter += 1;
        nonce
    }

    /// The nonce the next call to [`NonceTracker::next`] would return, without advancing.
    #[cfg(test)]
    pub fn peek(&self, key: &str) -> u64 {
        self.nonces.get(key).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::NonceTracker;

    #[test]
    fn test_first_nonce_is_zero() {
        let mut nonces = NonceTracker::new();
        assert_eq!(0, nonces.peek("alice"));
        assert_eq!(0, nonces.next("alice"));
    }

    #[test]
    fn test_nonces_increase_per_key() {
        let mut nonces = NonceTracker::new();

        let alice: Vec<u64> = (0..5).map(|_| nonces.next("alice")).collect();
        assert_eq!(vec![0, 1, 2, 3, 4], alice);

        assert_eq!(0, nonces.next("bob"));
        assert_eq!(5, nonces.next("alice"));
        assert_eq!(1, nonces.next("bob"));

        assert_eq!(6, nonces.peek("alice"));
        assert_eq!(2, nonces.peek("bob"));
    }
}

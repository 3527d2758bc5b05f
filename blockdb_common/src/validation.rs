/// **Basic input validation for a private-key identifier**
///
/// Returns a message describing the problem, or `None` if the key is fine.
///
/// Checks for:
/// - An empty string;
/// - Embedded whitespace, which would split the executor's command line.
pub fn is_valid_key(key: &str) -> Option<&'static str> {
    if key.trim().is_empty() {
        Some("Key cannot be empty.")
    } else if key.chars().any(char::is_whitespace) {
        Some("Key cannot contain whitespace.")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_key;

    #[test]
    fn test_valid_key_passes() {
        assert_eq!(None, is_valid_key("b22c95ffc4a5c096f7d7d0487ba963ce"));
    }

    #[test]
    fn test_empty_key_fails() {
        assert!(is_valid_key("").is_some());
        assert!(is_valid_key("   ").is_some());
    }

    #[test]
    fn test_key_with_space_fails() {
        assert!(is_valid_key("ab cd").is_some());
    }
}

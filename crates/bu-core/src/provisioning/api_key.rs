use std::fmt;

/// Required length of a BlinkUp API key.
pub const API_KEY_LEN: usize = 32;

/// Returns `true` when `key` is exactly 32 ASCII alphanumeric characters.
pub fn api_key_format_valid(key: &str) -> bool {
    key.len() == API_KEY_LEN && key.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A BlinkUp API key whose format has been checked.
///
/// The key is a credential: `Debug` never prints it in full.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` when the key is not 32 alphanumeric characters.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        api_key_format_valid(&raw).then_some(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({}…)", &self.0[..4])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_32_alphanumeric_characters() {
        assert!(api_key_format_valid("abcdefghijklmnopqrstuvwxyz123456"));
        assert!(api_key_format_valid(&"A".repeat(32)));
        assert!(api_key_format_valid("0123456789ABCDEFabcdef0123456789"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!api_key_format_valid(""));
        assert!(!api_key_format_valid(&"a".repeat(31)));
        assert!(!api_key_format_valid(&"a".repeat(33)));
    }

    #[test]
    fn rejects_non_alphanumeric_characters() {
        assert!(!api_key_format_valid(&format!("{}-", "a".repeat(31))));
        assert!(!api_key_format_valid(&format!("{} ", "a".repeat(31))));
        assert!(!api_key_format_valid(&format!(" {}", "a".repeat(31))));
        // 31 ASCII chars plus one two-byte char is 33 bytes but 32 chars.
        assert!(!api_key_format_valid(&format!("{}é", "a".repeat(31))));
    }

    #[test]
    fn debug_output_masks_the_key() {
        let key = ApiKey::parse("abcdefghijklmnopqrstuvwxyz123456").unwrap();
        let debug = format!("{:?}", key);
        assert!(debug.starts_with("ApiKey(abcd"));
        assert!(!debug.contains("123456"));
    }

    #[test]
    fn parse_returns_none_for_invalid_key() {
        assert!(ApiKey::parse("short").is_none());
    }
}

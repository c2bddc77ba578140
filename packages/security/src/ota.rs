// ABOUTME: One-time-access (OTA) token generation and validation
// ABOUTME: Random alphanumeric tokens, length configurable via jmpsl.security.ota.length

use jmpsl_core::env::{EnvError, Property, PropertySource};
use rand::{distributions::Alphanumeric, Rng};

/// Length of generated OTA tokens. Defaults to 10.
pub const OTA_LENGTH: Property = Property::with_default("jmpsl.security.ota.length", "10");

/// Generator for one-time-access tokens, mostly used in account and email
/// verification flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtaTokenGenerator {
    length: usize,
}

impl OtaTokenGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Build a generator with the token length taken from the
    /// `jmpsl.security.ota.length` property.
    pub fn from_source(source: &dyn PropertySource) -> Result<Self, EnvError> {
        let length: i8 = OTA_LENGTH.resolve(source)?;
        if length < 1 {
            return Err(EnvError::InvalidValue {
                key: OTA_LENGTH.key().to_string(),
                value: length.to_string(),
                expected: "positive token length",
            });
        }
        Ok(Self::new(length as usize))
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate a token of the configured length.
    pub fn generate(&self) -> String {
        Self::generate_with_length(self.length)
    }

    /// Generate a random alphanumeric token of an explicit length.
    pub fn generate_with_length(length: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(length)
            .map(char::from)
            .collect()
    }

    /// Check a token against the configured length.
    pub fn is_valid(&self, token: &str) -> bool {
        Self::is_valid_with_length(token, self.length)
    }

    /// A token is valid when it is non-blank, exactly `length` characters and
    /// contains only ASCII alphanumerics.
    pub fn is_valid_with_length(token: &str, length: usize) -> bool {
        if token.trim().is_empty() {
            return false;
        }
        token.len() == length && token.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_generated_token_shape() {
        let generator = OtaTokenGenerator::new(10);
        let token = generator.generate();

        assert_eq!(token.len(), 10);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(generator.is_valid(&token));
    }

    #[test]
    fn test_tokens_are_not_repeated() {
        let generator = OtaTokenGenerator::new(16);
        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_length_defaults_to_ten() {
        let generator = OtaTokenGenerator::from_source(&HashMap::<String, String>::new()).unwrap();
        assert_eq!(generator.length(), 10);
    }

    #[test]
    fn test_length_from_property_source() {
        let mut source = HashMap::new();
        source.insert("jmpsl.security.ota.length".to_string(), "16".to_string());

        let generator = OtaTokenGenerator::from_source(&source).unwrap();
        assert_eq!(generator.length(), 16);
        assert_eq!(generator.generate().len(), 16);
    }

    #[test]
    fn test_non_positive_length_is_rejected() {
        let mut source = HashMap::new();
        source.insert("jmpsl.security.ota.length".to_string(), "0".to_string());

        assert!(OtaTokenGenerator::from_source(&source).is_err());
    }

    #[test]
    fn test_invalid_tokens_are_rejected() {
        assert!(!OtaTokenGenerator::is_valid_with_length("", 10));
        assert!(!OtaTokenGenerator::is_valid_with_length("   ", 3));
        assert!(!OtaTokenGenerator::is_valid_with_length("abc123", 10));
        assert!(!OtaTokenGenerator::is_valid_with_length("abc-123-de", 10));
        assert!(OtaTokenGenerator::is_valid_with_length("a1B2c3D4e5", 10));
    }
}

// ABOUTME: Hash-code generation for externally stored files
// ABOUTME: Random alphanumeric blocks joined by a separator, ex. aB4dE-9fGh1-KlM2n-PqR5s

use jmpsl_core::env::{Property, PropertySource};
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;

use crate::error::FileError;

/// Separator between hash-code blocks. Defaults to `-`.
pub const HASH_SEPARATOR: Property = Property::with_default("jmpsl.file.hash-code.separator", "-");

/// Number of blocks in a generated hash code. Defaults to 4.
pub const HASH_BLOCK_COUNT: Property =
    Property::with_default("jmpsl.file.hash-code.count-of-sequences", "4");

/// Number of characters in a single block. Defaults to 5.
pub const HASH_BLOCK_LENGTH: Property =
    Property::with_default("jmpsl.file.hash-code.sequence-length", "5");

/// Shape of generated hash codes: separator, block count and block length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCodeSettings {
    separator: char,
    block_count: u8,
    block_length: u8,
}

impl Default for HashCodeSettings {
    fn default() -> Self {
        Self {
            separator: '-',
            block_count: 4,
            block_length: 5,
        }
    }
}

impl HashCodeSettings {
    pub fn new(separator: char, block_count: u8, block_length: u8) -> Result<Self, FileError> {
        if block_count < 1 || block_length < 1 {
            return Err(FileError::InvalidConfig(
                "hash-code block count and length cannot be less than 1".to_string(),
            ));
        }
        Ok(Self {
            separator,
            block_count,
            block_length,
        })
    }

    /// Read the hash-code shape from the `jmpsl.file.hash-code.*` properties.
    pub fn from_source(source: &dyn PropertySource) -> Result<Self, FileError> {
        let separator: char = HASH_SEPARATOR.resolve(source)?;
        let block_count: i8 = HASH_BLOCK_COUNT.resolve(source)?;
        let block_length: i8 = HASH_BLOCK_LENGTH.resolve(source)?;
        if block_count < 1 || block_length < 1 {
            return Err(FileError::InvalidConfig(
                "hash-code block count and length cannot be less than 1".to_string(),
            ));
        }
        Self::new(separator, block_count as u8, block_length as u8)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn block_count(&self) -> u8 {
        self.block_count
    }

    pub fn block_length(&self) -> u8 {
        self.block_length
    }
}

/// Generate a hash code with the given settings.
pub fn generate(settings: &HashCodeSettings) -> String {
    generate_with(settings.separator, settings.block_count, settings.block_length)
}

/// Generate a hash code from explicit shape parameters.
pub fn generate_with(separator: char, block_count: u8, block_length: u8) -> String {
    let mut rng = rand::thread_rng();
    let blocks: Vec<String> = (0..block_count)
        .map(|_| {
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(block_length as usize)
                .map(char::from)
                .collect()
        })
        .collect();
    blocks.join(&separator.to_string())
}

/// Check that a hash code matches the shape defined by the settings.
pub fn is_valid(hash_code: &str, settings: &HashCodeSettings) -> bool {
    is_valid_with(
        hash_code,
        settings.separator,
        settings.block_count,
        settings.block_length,
    )
}

/// Check a hash code against explicit shape parameters.
pub fn is_valid_with(hash_code: &str, separator: char, block_count: u8, block_length: u8) -> bool {
    if block_count < 1 {
        return false;
    }
    let block = format!("[A-Za-z0-9]{{{block_length}}}");
    let joined = format!(
        "^(?:{block}{}){{{}}}{block}$",
        regex::escape(&separator.to_string()),
        block_count - 1
    );
    match Regex::new(&joined) {
        Ok(pattern) => pattern.is_match(hash_code),
        Err(_) => false,
    }
}

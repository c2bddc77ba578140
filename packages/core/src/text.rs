// ABOUTME: String utilities for display values
// ABOUTME: Initials, trailing-dot normalization and masked rendering of delimited values

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("Initials require at least two parts")]
    NotEnoughParts,

    #[error("Part {0} is blank or contains whitespace")]
    InvalidPart(usize),

    #[error("Value contains no '{0}' delimiter")]
    MissingDelimiter(char),

    #[error("Value is too short to mask")]
    ValueTooShort,
}

/// Uppercase initials from name parts, ex. `["john", "doe"]` -> `JD`.
pub fn initials(parts: &[&str]) -> Result<String, TextError> {
    if parts.len() < 2 {
        return Err(TextError::NotEnoughParts);
    }
    let mut out = String::with_capacity(parts.len());
    for (index, part) in parts.iter().enumerate() {
        if part.is_empty() || part.chars().any(char::is_whitespace) {
            return Err(TextError::InvalidPart(index));
        }
        if let Some(first) = part.chars().next() {
            // char::to_uppercase handles non-ASCII letters, ex. 'ł' -> 'Ł'
            out.extend(first.to_uppercase());
        }
    }
    Ok(out)
}

/// Append a trailing dot unless the value already ends with one.
pub fn add_dot(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if value.ends_with('.') {
        return value.to_string();
    }
    format!("{value}.")
}

/// Mask the part of `value` before `delimiter`, keeping `visible` leading
/// characters, ex. `example@gmail.com` -> `exa***@gmail.com`. Short prefixes
/// keep a single visible character.
pub fn mask_value(value: &str, mask: char, delimiter: char, visible: usize) -> Result<String, TextError> {
    let index = value.find(delimiter).ok_or(TextError::MissingDelimiter(delimiter))?;
    let (prefix, rest) = value.split_at(index);
    let prefix: Vec<char> = prefix.chars().collect();
    let visible = if prefix.len() < 5 { 1 } else { visible };
    if prefix.len() <= visible {
        return Err(TextError::ValueTooShort);
    }
    let shown: String = prefix[..visible].iter().collect();
    let masked = mask.to_string().repeat(prefix.len() - visible - 1);
    Ok(format!("{shown}{masked}{}", rest))
}

/// Mask an email address with the library defaults (`*`, `@`, 3 visible).
pub fn mask_email(value: &str) -> Result<String, TextError> {
    mask_value(value, '*', '@', 3)
}

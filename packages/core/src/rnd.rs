// ABOUTME: Random numeric sequence generation
// ABOUTME: Used where generated values must not repeat, ex. nickname or email suffixes

use rand::Rng;

/// Generate a random sequence of decimal digits.
pub fn numeric_sequence(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}

/// Prefix followed by a random digit sequence, ex. `user` -> `user4821`.
pub fn with_trailing_sequence(prefix: &str, length: usize) -> String {
    format!("{prefix}{}", numeric_sequence(length))
}

/// Random digit sequence followed by a suffix, ex. `-img` -> `4821-img`.
pub fn with_leading_sequence(suffix: &str, length: usize) -> String {
    format!("{}{suffix}", numeric_sequence(length))
}

// ABOUTME: Error types for OAuth2 supplier handling
// ABOUTME: Unsupported or unknown suppliers are fatal to the calling flow

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OAuth2Error {
    #[error("OAuth2 supplier {0} is not supported")]
    UnsupportedSupplier(String),
}

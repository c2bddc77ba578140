// ABOUTME: Error types for file hash-code and SFTP operations
// ABOUTME: Wraps property-resolution, SSH transport and SFTP protocol failures

use std::path::PathBuf;

use jmpsl_core::env::EnvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("SSH transport error: {0}")]
    Ssh(#[from] russh::Error),

    #[error("Unable to load private key {path}: {reason}")]
    PrivateKey { path: PathBuf, reason: String },

    #[error("Known-hosts check failed for {host}: {reason}")]
    KnownHosts { host: String, reason: String },

    #[error("Server key for {host} is not present in the known-hosts file")]
    UnknownHostKey { host: String },

    #[error("SSH authentication failed for user {user}")]
    AuthenticationFailed { user: String },

    #[error("SFTP protocol error: {0}")]
    Sftp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// ABOUTME: File utilities: hash-code generation and SFTP transfer wrapper
// ABOUTME: Hash codes name externally stored resources; the SFTP connector ships them to the static-resource server

pub mod error;
pub mod hashcode;
pub mod sftp;

pub use error::FileError;
pub use hashcode::HashCodeSettings;
pub use sftp::{SftpConfig, SftpConnector};

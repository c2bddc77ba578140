// ABOUTME: SFTP connector for the external static-resource server
// ABOUTME: Property-driven configuration, known-hosts checked public-key auth, scoped session execution

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use jmpsl_core::env::{Property, PropertySource};
use russh::client;
use russh_keys::key::PublicKey;
use russh_sftp::client::SftpSession;

use crate::error::FileError;

/// SSH socket host name, ex. `192.168.10.1`. Defaults to localhost.
pub const SSH_HOST: Property = Property::with_default("jmpsl.file.ssh.socket-host", "127.0.0.1");

/// SSH socket port. Defaults to 22.
pub const SSH_PORT: Property = Property::with_default("jmpsl.file.ssh.socket-port", "22");

/// SSH login or username. Required.
pub const SSH_LOGIN: Property = Property::required("jmpsl.file.ssh.socket-login");

/// Known-hosts file checked against the server key.
pub const SSH_KNOWN_HOSTS: Property =
    Property::with_default("jmpsl.file.ssh.known-hosts-file-name", "known_hosts.dat");

/// Private key file used for public-key authentication.
pub const SSH_PRIVATE_KEY: Property =
    Property::with_default("jmpsl.file.ssh.user-private-key-file-name", "id_rsa");

/// Server path from root to the domain directory. Required.
pub const BASE_SERVER_PATH: Property = Property::required("jmpsl.file.basic-external-server-path");

/// Directory name for this application's resources, created under the base
/// path on startup. Empty means the base path is used directly.
pub const APP_SERVER_PATH: Property = Property::with_default("jmpsl.file.app-external-server-path", "");

/// SFTP connection settings resolved from the `jmpsl.file.*` properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SftpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub known_hosts_file: PathBuf,
    pub private_key_file: PathBuf,
    pub base_server_path: String,
    pub app_directory: String,
}

impl SftpConfig {
    pub fn from_source(source: &dyn PropertySource) -> Result<Self, FileError> {
        let port: i32 = SSH_PORT.resolve(source)?;
        let port = u16::try_from(port)
            .map_err(|_| FileError::InvalidConfig(format!("invalid SSH port: {port}")))?;
        Ok(Self {
            host: SSH_HOST.resolve(source)?,
            port,
            username: SSH_LOGIN.resolve(source)?,
            known_hosts_file: PathBuf::from(SSH_KNOWN_HOSTS.resolve::<String>(source)?),
            private_key_file: PathBuf::from(SSH_PRIVATE_KEY.resolve::<String>(source)?),
            base_server_path: BASE_SERVER_PATH.resolve(source)?,
            app_directory: APP_SERVER_PATH.resolve(source)?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Server-key verification against the configured known-hosts file.
struct HostKeyVerifier {
    host: String,
    port: u16,
    known_hosts_file: PathBuf,
}

#[async_trait]
impl client::Handler for HostKeyVerifier {
    type Error = FileError;

    async fn check_server_key(&mut self, server_public_key: &PublicKey) -> Result<bool, Self::Error> {
        let known = russh_keys::check_known_hosts_path(
            &self.host,
            self.port,
            server_public_key,
            &self.known_hosts_file,
        )
        .map_err(|err| FileError::KnownHosts {
            host: self.host.clone(),
            reason: err.to_string(),
        })?;
        if !known {
            tracing::error!(host = %self.host, "server key not found in known-hosts file");
            return Err(FileError::UnknownHostKey {
                host: self.host.clone(),
            });
        }
        Ok(true)
    }
}

/// Connector performing scoped actions against the configured SFTP server.
///
/// Each [`SftpConnector::with_session`] call opens a fresh connection,
/// authenticates with the configured private key, runs the given operation on
/// the SFTP session and disconnects afterwards.
#[derive(Debug, Clone)]
pub struct SftpConnector {
    config: SftpConfig,
    server_path: String,
}

impl SftpConnector {
    pub fn new(config: SftpConfig) -> Self {
        let server_path = if config.app_directory.is_empty() {
            config.base_server_path.clone()
        } else {
            join_remote_path(&config.base_server_path, &config.app_directory)
        };
        Self { config, server_path }
    }

    /// Build the connector from the `jmpsl.file.*` properties and, when an
    /// application directory is configured, create it under the base path if
    /// it does not exist yet.
    pub async fn from_source(source: &dyn PropertySource) -> Result<Self, FileError> {
        let connector = Self::new(SftpConfig::from_source(source)?);
        if !connector.config.app_directory.is_empty() {
            let base = connector.config.base_server_path.clone();
            let directory = connector.config.app_directory.clone();
            connector
                .with_session(|session| async move {
                    create_dir_if_absent(&session, &base, &directory).await
                })
                .await?;
            tracing::info!(path = %connector.server_path, "application directory present on SFTP server");
        }
        Ok(connector)
    }

    pub fn config(&self) -> &SftpConfig {
        &self.config
    }

    /// Base server path joined with the application directory.
    pub fn server_path(&self) -> &str {
        &self.server_path
    }

    /// Connect, run `op` on the SFTP session and disconnect.
    pub async fn with_session<T, F, Fut>(&self, op: F) -> Result<T, FileError>
    where
        F: FnOnce(SftpSession) -> Fut,
        Fut: Future<Output = Result<T, FileError>>,
    {
        let (handle, session) = self.open().await?;
        let outcome = op(session).await;
        let _ = handle
            .disconnect(russh::Disconnect::ByApplication, "", "English")
            .await;
        outcome
    }

    async fn open(&self) -> Result<(client::Handle<HostKeyVerifier>, SftpSession), FileError> {
        // Load the key first; a missing or unreadable key file should not
        // cost a connection attempt.
        let key_pair = russh_keys::load_secret_key(&self.config.private_key_file, None).map_err(|err| {
            FileError::PrivateKey {
                path: self.config.private_key_file.clone(),
                reason: err.to_string(),
            }
        })?;

        let verifier = HostKeyVerifier {
            host: self.config.host.clone(),
            port: self.config.port,
            known_hosts_file: self.config.known_hosts_file.clone(),
        };
        let ssh_config = Arc::new(client::Config::default());
        let mut handle =
            client::connect(ssh_config, (self.config.host.as_str(), self.config.port), verifier).await?;

        let authenticated = handle
            .authenticate_publickey(self.config.username.as_str(), Arc::new(key_pair))
            .await?;
        if !authenticated {
            return Err(FileError::AuthenticationFailed {
                user: self.config.username.clone(),
            });
        }

        let channel = handle.channel_open_session().await?;
        channel.request_subsystem(true, "sftp").await?;
        let session = SftpSession::new(channel.into_stream())
            .await
            .map_err(|err| FileError::Sftp(err.to_string()))?;

        tracing::info!(addr = %self.config.addr(), user = %self.config.username, "SFTP session ready");
        Ok((handle, session))
    }
}

/// Create `dir_name` under `parent` unless an entry with that name already
/// exists.
pub async fn create_dir_if_absent(
    session: &SftpSession,
    parent: &str,
    dir_name: &str,
) -> Result<(), FileError> {
    let entries = session
        .read_dir(parent)
        .await
        .map_err(|err| FileError::Sftp(err.to_string()))?;
    if entries.into_iter().any(|entry| entry.file_name() == dir_name) {
        return Ok(());
    }
    session
        .create_dir(join_remote_path(parent, dir_name))
        .await
        .map_err(|err| FileError::Sftp(err.to_string()))
}

pub(crate) fn join_remote_path(parent: &str, name: &str) -> String {
    format!("{}/{}", parent.trim_end_matches('/'), name)
}

use std::io::Cursor;

use crate::{sftp::{sftp_auth_method::SftpAuthMethod, sftp_configuration_error::SftpConfigurationError, sftp_private_key::SftpPrivateKey}, utils::guard::Guard};

pub const DEFAULT_SFTP_PORT: u16 = 22;

/// Remote file to create once a session is established.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCreationOptions {
    pub create_file: bool,
    pub remote_path: String,
}

/// Immutable connection settings for an SFTP endpoint, produced by `SftpConfigurationBuilder`.
///
/// Always carries at least one authentication method.
#[derive(Debug, Clone)]
pub struct SftpConfiguration {
    host: String,
    port: u16,
    username: String,
    authentication_methods: Vec<SftpAuthMethod>,
    file_creation: FileCreationOptions,
}

impl SftpConfiguration {
    pub fn builder(host: impl AsRef<str>, port: u16, username: impl AsRef<str>) -> Result<SftpConfigurationBuilder, SftpConfigurationError> {
        SftpConfigurationBuilder::new(host, port, username)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Authentication methods in the order they were registered.
    pub fn authentication_methods(&self) -> &[SftpAuthMethod] {
        &self.authentication_methods
    }

    pub fn file_creation(&self) -> &FileCreationOptions {
        &self.file_creation
    }
}

pub struct SftpConfigurationBuilder {
    host: String,
    port: u16,
    username: String,
    authentication_methods: Vec<SftpAuthMethod>,
    file_creation: FileCreationOptions,
}

impl SftpConfigurationBuilder {
    /// Host and username must not be empty. A port of `0` selects the default SFTP port `22`.
    pub fn new(host: impl AsRef<str>, port: u16, username: impl AsRef<str>) -> Result<Self, SftpConfigurationError> {
        let host = Guard::not_blank(host.as_ref(), "host")?;
        let username = Guard::not_blank(username.as_ref(), "username")?;

        Ok(SftpConfigurationBuilder {
            host: host.to_owned(),
            port: if port == 0 { DEFAULT_SFTP_PORT } else { port },
            username: username.to_owned(),
            authentication_methods: Vec::new(),
            file_creation: FileCreationOptions::default(),
        })
    }

    /// Adds password authentication for the configured username.
    pub fn add_password_authentication(mut self, password: impl AsRef<str>) -> Self {
        self.authentication_methods.push(SftpAuthMethod::Password {
            username: self.username.clone(),
            password: password.as_ref().to_owned(),
        });
        self
    }

    /// Parses `private_key` (OpenSSH or PEM text) and adds key authentication for the configured username.
    ///
    /// Both the key and the passphrase are required. Nothing is added when validation or parsing fails.
    pub fn add_private_key_authentication(self, private_key: impl AsRef<str>, passphrase: impl AsRef<str>) -> Result<Self, SftpConfigurationError> {
        let private_key = Guard::not_empty(private_key.as_ref(), "private_key")?;
        let passphrase = Guard::not_empty(passphrase.as_ref(), "passphrase")?;

        let buffer = Cursor::new(private_key.as_bytes());
        let private_key = SftpPrivateKey::from_reader(buffer, Some(passphrase))?;

        Ok(self.add_private_key(private_key))
    }

    /// Adds key authentication using an already parsed key.
    pub fn add_private_key(mut self, private_key: SftpPrivateKey) -> Self {
        self.authentication_methods.push(SftpAuthMethod::PrivateKey {
            username: self.username.clone(),
            private_key,
        });
        self
    }

    /// Creates the file `remote_path` on the server after connecting.
    pub fn create_file_on_connect(mut self, remote_path: impl AsRef<str>) -> Self {
        self.file_creation = FileCreationOptions {
            create_file: true,
            remote_path: remote_path.as_ref().to_owned(),
        };
        self
    }

    pub fn build(self) -> Result<SftpConfiguration, SftpConfigurationError> {
        if self.authentication_methods.is_empty() {
            return Err(SftpConfigurationError::NoAuthenticationMethods);
        }

        Ok(SftpConfiguration {
            host: self.host,
            port: self.port,
            username: self.username,
            authentication_methods: self.authentication_methods,
            file_creation: self.file_creation,
        })
    }
}

use std::{fmt, io::Read, sync::Arc};

use russh::keys::PrivateKey;

use crate::sftp::sftp_configuration_error::SftpConfigurationError;

/// A parsed private key together with the passphrase it was decrypted with.
#[derive(Clone)]
pub struct SftpPrivateKey {
    key: Arc<PrivateKey>,
    passphrase: Option<String>,
}

impl SftpPrivateKey {
    /// Parses an OpenSSH or PEM encoded private key, decrypting it with `passphrase` when it is encrypted.
    pub fn from_bytes(bytes: &[u8], passphrase: Option<&str>) -> Result<Self, SftpConfigurationError> {
        let text = std::str::from_utf8(bytes).map_err(|err| SftpConfigurationError::PrivateKey(err.to_string()))?;
        let key = russh::keys::decode_secret_key(text, passphrase).map_err(|err| SftpConfigurationError::PrivateKey(err.to_string()))?;

        Ok(SftpPrivateKey {
            key: Arc::new(key),
            passphrase: passphrase.map(str::to_owned),
        })
    }

    pub fn from_reader<R: Read>(mut reader: R, passphrase: Option<&str>) -> Result<Self, SftpConfigurationError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|err| SftpConfigurationError::PrivateKey(err.to_string()))?;
        Self::from_bytes(&bytes, passphrase)
    }

    pub fn key(&self) -> Arc<PrivateKey> {
        self.key.clone()
    }

    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_deref()
    }
}

impl From<PrivateKey> for SftpPrivateKey {
    fn from(key: PrivateKey) -> Self {
        SftpPrivateKey {
            key: Arc::new(key),
            passphrase: None,
        }
    }
}

impl fmt::Debug for SftpPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SftpPrivateKey")
            .field("algorithm", &self.key.algorithm())
            .field("passphrase", &self.passphrase.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

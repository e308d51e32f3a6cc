use std::fmt;

use crate::sftp::sftp_private_key::SftpPrivateKey;

#[derive(Clone)]
pub enum SftpAuthMethod {
    Password {
        username: String,
        password: String,
    },
    PrivateKey {
        username: String,
        private_key: SftpPrivateKey,
    },
}

impl SftpAuthMethod {
    pub fn username(&self) -> &str {
        match self {
            SftpAuthMethod::Password { username, .. } => username,
            SftpAuthMethod::PrivateKey { username, .. } => username,
        }
    }
}

impl fmt::Debug for SftpAuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SftpAuthMethod::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
            SftpAuthMethod::PrivateKey { username, private_key } => f
                .debug_struct("PrivateKey")
                .field("username", username)
                .field("private_key", private_key)
                .finish(),
        }
    }
}

use crate::utils::guard::ArgumentError;

#[derive(Debug, thiserror::Error)]
pub enum SftpConfigurationError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error("Failed to load private key: {0}")]
    PrivateKey(String),
    #[error("No authentication methods have been configured for Sftp Configuration.")]
    NoAuthenticationMethods,
}

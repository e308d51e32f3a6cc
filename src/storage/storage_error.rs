use crate::utils::guard::ArgumentError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error("Storage provider '{0}' is not supported.")]
    UnsupportedProvider(String),
    #[error("{0}")]
    Configuration(String),
    #[error("Stored value could not be read: {0}")]
    Decode(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

use crate::{storage::{health_checks_db::HealthChecksDb, storage_error::StorageError, storage_options::StorageOptions, storage_provider::StorageProvider}, utils::guard::Guard};

type ConfigureCallback = Box<dyn FnOnce(&mut StorageOptions) + Send>;

/// Selects a storage backend and produces the `HealthChecksDb` bound to it.
pub struct StorageRegistration {
    provider: StorageProvider,
    connection_string: String,
    configure: Option<ConfigureCallback>,
}

impl StorageRegistration {
    pub fn new(provider: StorageProvider, connection_string: impl Into<String>) -> Self {
        StorageRegistration {
            provider,
            connection_string: connection_string.into(),
            configure: None,
        }
    }

    /// **Optional**
    ///
    /// Customizes the pool options. The callback runs exactly once, during `register`.
    pub fn configure(mut self, configure: impl FnOnce(&mut StorageOptions) + Send + 'static) -> Self {
        self.configure = Some(Box::new(configure));
        self
    }

    /// Validates the connection string against the provider and creates a lazily connecting pool.
    ///
    /// No connection is opened here, so this succeeds without a reachable database.
    /// Must be called from within a tokio runtime.
    pub fn register(self) -> Result<HealthChecksDb, StorageError> {
        let connection_string = Guard::not_blank(&self.connection_string, "connection_string")?;
        let scheme = match connection_string.split_once(':') {
            Some((scheme, _)) => scheme.to_ascii_lowercase(),
            None => return Err(StorageError::Configuration(format!("Connection string for storage provider '{}' must be a URL.", self.provider))),
        };
        if !self.provider.schemes().contains(&scheme.as_str()) {
            return Err(StorageError::Configuration(format!("Connection string scheme '{}' does not match storage provider '{}'.", scheme, self.provider)));
        }

        let in_memory = Self::is_in_memory(self.provider, connection_string);
        let mut options = if in_memory {
            StorageOptions::in_memory()
        } else {
            StorageOptions::default()
        };
        if let Some(configure) = self.configure {
            configure(&mut options);
        }
        if in_memory {
            // every extra connection would open its own empty database
            options.max_connections = 1;
        }

        sqlx::any::install_default_drivers();
        let pool = options.pool_options().connect_lazy(connection_string)?;

        tracing::debug!("registered {} storage", self.provider);
        Ok(HealthChecksDb::new(self.provider, pool))
    }

    fn is_in_memory(provider: StorageProvider, connection_string: &str) -> bool {
        provider == StorageProvider::Sqlite && (connection_string.contains(":memory:") || connection_string.contains("mode=memory"))
    }
}

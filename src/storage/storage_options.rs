use std::time::Duration;

use sqlx::any::AnyPoolOptions;

/// Connection pool settings, adjustable through `StorageRegistration::configure`.
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl StorageOptions {
    /// An in-memory SQLite database lives only as long as its single connection.
    pub(crate) fn in_memory() -> Self {
        StorageOptions {
            max_connections: 1,
            min_connections: 0,
            idle_timeout: None,
            max_lifetime: None,
            ..StorageOptions::default()
        }
    }

    pub(crate) fn pool_options(&self) -> AnyPoolOptions {
        AnyPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
    }
}

impl Default for StorageOptions {
    fn default() -> Self {
        StorageOptions {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

use std::collections::HashMap;

use sqlx::{AnyPool, Row, any::AnyRow, migrate::Migration};
use time::OffsetDateTime;

use crate::{health::{health_report::HealthReport, health_status::HealthStatus}, storage::{storage_entities::{HealthCheckConfiguration, HealthCheckExecution, HealthCheckExecutionEntry, HealthCheckExecutionHistory}, storage_error::StorageError, storage_provider::StorageProvider, storage_registration::StorageRegistration}};

/// Persistence context for health check configurations and executions.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct HealthChecksDb {
    provider: StorageProvider,
    pool: AnyPool,
}

impl HealthChecksDb {
    pub(crate) fn new(provider: StorageProvider, pool: AnyPool) -> Self {
        HealthChecksDb { provider, pool }
    }

    /// Shorthand for `StorageRegistration::new(provider, connection_string).register()`.
    pub fn register(provider: StorageProvider, connection_string: impl Into<String>) -> Result<Self, StorageError> {
        StorageRegistration::new(provider, connection_string).register()
    }

    pub fn provider(&self) -> StorageProvider {
        self.provider
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    pub fn migrations(&self) -> impl Iterator<Item = &'static Migration> {
        self.provider.migrator().iter()
    }

    /// Applies all pending migrations.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        self.provider.migrator().run(&self.pool).await?;
        tracing::debug!("{} storage migrated", self.provider);
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn configurations(&self) -> Result<Vec<HealthCheckConfiguration>, StorageError> {
        let rows = sqlx::query("SELECT id, name, uri, discovery_service FROM health_check_configurations ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| -> Result<HealthCheckConfiguration, StorageError> {
                Ok(HealthCheckConfiguration {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    uri: row.try_get("uri")?,
                    discovery_service: row.try_get("discovery_service")?,
                })
            })
            .collect()
    }

    pub async fn add_configuration(&self, name: impl AsRef<str>, uri: impl AsRef<str>) -> Result<(), StorageError> {
        sqlx::query(&self.provider.sql("INSERT INTO health_check_configurations (name, uri) VALUES (?, ?)"))
            .bind(name.as_ref())
            .bind(uri.as_ref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All executions ordered by id, each with its entries and status history.
    pub async fn executions(&self) -> Result<Vec<HealthCheckExecution>, StorageError> {
        let mut entries: HashMap<i64, Vec<HealthCheckExecutionEntry>> = HashMap::new();
        let rows = sqlx::query("SELECT execution_id, name, status, description, duration_ms FROM health_check_execution_entries ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        for row in &rows {
            let duration_ms: i64 = row.try_get("duration_ms")?;
            entries.entry(row.try_get("execution_id")?).or_default().push(HealthCheckExecutionEntry {
                name: row.try_get("name")?,
                status: Self::status(row)?,
                description: row.try_get("description")?,
                duration_ms: duration_ms.max(0) as u64,
            });
        }

        let mut history: HashMap<i64, Vec<HealthCheckExecutionHistory>> = HashMap::new();
        let rows = sqlx::query("SELECT execution_id, name, status, description, on_state_from FROM health_check_execution_history ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        for row in &rows {
            history.entry(row.try_get("execution_id")?).or_default().push(HealthCheckExecutionHistory {
                name: row.try_get("name")?,
                status: Self::status(row)?,
                description: row.try_get("description")?,
                on: Self::timestamp(row, "on_state_from")?,
            });
        }

        let rows = sqlx::query("SELECT id, name, uri, status, on_state_from, last_executed, discovery_service FROM health_check_executions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| -> Result<HealthCheckExecution, StorageError> {
                let id: i64 = row.try_get("id")?;
                Ok(HealthCheckExecution {
                    id,
                    name: row.try_get("name")?,
                    uri: row.try_get("uri")?,
                    status: Self::status(row)?,
                    on_state_from: Self::timestamp(row, "on_state_from")?,
                    last_executed: Self::timestamp(row, "last_executed")?,
                    discovery_service: row.try_get("discovery_service")?,
                    entries: entries.remove(&id).unwrap_or_default(),
                    history: history.remove(&id).unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Stores the outcome of polling the endpoint `name`.
    ///
    /// Creates the execution on first sight. When the status differs from the stored one, `on_state_from`
    /// moves to now and a history row is appended. Entries are replaced by the report's entries.
    pub async fn save_execution(&self, name: &str, uri: &str, report: &HealthReport) -> Result<(), StorageError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let status = report.status.as_str();
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query(&self.provider.sql("SELECT id, status FROM health_check_executions WHERE name = ?"))
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?;

        let (execution_id, status_changed) = match existing {
            Some(row) => {
                let id: i64 = row.try_get("id")?;
                let previous: String = row.try_get("status")?;
                if previous != status {
                    sqlx::query(&self.provider.sql("UPDATE health_check_executions SET uri = ?, status = ?, on_state_from = ?, last_executed = ? WHERE id = ?"))
                        .bind(uri)
                        .bind(status)
                        .bind(now)
                        .bind(now)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                } else {
                    sqlx::query(&self.provider.sql("UPDATE health_check_executions SET uri = ?, last_executed = ? WHERE id = ?"))
                        .bind(uri)
                        .bind(now)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?;
                }
                (id, previous != status)
            }
            None => {
                sqlx::query(&self.provider.sql("INSERT INTO health_check_executions (name, uri, status, on_state_from, last_executed) VALUES (?, ?, ?, ?, ?)"))
                    .bind(name)
                    .bind(uri)
                    .bind(status)
                    .bind(now)
                    .bind(now)
                    .execute(&mut *tx)
                    .await?;
                let row = sqlx::query(&self.provider.sql("SELECT id FROM health_check_executions WHERE name = ?"))
                    .bind(name)
                    .fetch_one(&mut *tx)
                    .await?;
                let id: i64 = row.try_get("id")?;
                (id, false)
            }
        };

        if status_changed {
            tracing::info!("health check '{}' changed status to {}", name, status);
            sqlx::query(&self.provider.sql("INSERT INTO health_check_execution_history (execution_id, name, status, description, on_state_from) VALUES (?, ?, ?, ?, ?)"))
                .bind(execution_id)
                .bind(name)
                .bind(status)
                .bind(report.description().map(str::to_owned))
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(&self.provider.sql("DELETE FROM health_check_execution_entries WHERE execution_id = ?"))
            .bind(execution_id)
            .execute(&mut *tx)
            .await?;
        for (entry_name, entry) in &report.entries {
            sqlx::query(&self.provider.sql("INSERT INTO health_check_execution_entries (execution_id, name, status, description, duration_ms) VALUES (?, ?, ?, ?, ?)"))
                .bind(execution_id)
                .bind(entry_name.as_str())
                .bind(entry.status.as_str())
                .bind(entry.description.clone())
                .bind(i64::try_from(entry.duration_ms).unwrap_or(i64::MAX))
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    fn status(row: &AnyRow) -> Result<HealthStatus, StorageError> {
        let status: String = row.try_get("status")?;
        status.parse().map_err(|err: anyhow::Error| StorageError::Decode(err.to_string()))
    }

    fn timestamp(row: &AnyRow, column: &str) -> Result<OffsetDateTime, StorageError> {
        let seconds: i64 = row.try_get(column)?;
        OffsetDateTime::from_unix_timestamp(seconds).map_err(|err| StorageError::Decode(err.to_string()))
    }
}

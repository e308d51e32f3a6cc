use std::{sync::Arc, time::Duration};

use tokio::sync::Notify;

use crate::{health::health_report::HealthReport, http::http_client::HttpClient, storage::{health_checks_db::HealthChecksDb, storage_error::StorageError}};

/// Polls every configured endpoint and stores the reports it returns.
pub struct HealthCheckCollector {
    db: HealthChecksDb,
    client: HttpClient,
    interval: Duration,
}

impl HealthCheckCollector {
    pub fn new(db: HealthChecksDb, interval: Duration) -> Self {
        HealthCheckCollector {
            db,
            client: HttpClient::new(),
            interval,
        }
    }

    pub fn client(mut self, client: HttpClient) -> Self {
        self.client = client;
        self
    }

    /// Runs one collection pass and returns the number of executions saved.
    ///
    /// An endpoint that cannot be reached or returns something other than a health report is stored as unhealthy.
    pub async fn collect_once(&self) -> Result<usize, StorageError> {
        let configurations = self.db.configurations().await?;
        for configuration in &configurations {
            let report = self.fetch(&configuration.uri).await;
            tracing::debug!("collected {} from {}: {}", configuration.name, configuration.uri, report.status);
            self.db.save_execution(&configuration.name, &configuration.uri, &report).await?;
        }
        Ok(configurations.len())
    }

    async fn fetch(&self, uri: &str) -> HealthReport {
        let result = match self.client.get(uri).await {
            Ok(response) => response.body_json::<HealthReport>(),
            Err(err) => Err(err),
        };

        match result {
            Ok(report) => report,
            Err(err) => {
                tracing::warn!("failed to collect health report from {}: {:?}", uri, err);
                HealthReport::from_error("endpoint", err)
            }
        }
    }

    /// Collects every interval until `shutdown` is notified. The first pass runs immediately.
    pub async fn run(self, shutdown: Arc<Notify>) {
        let mut interval = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = shutdown.notified() => break,
                _ = interval.tick() => {
                    if let Err(err) = self.collect_once().await {
                        tracing::error!("health check collection failed: {:?}", err);
                    }
                }
            }
        }
        tracing::trace!("collector stopped");
    }
}

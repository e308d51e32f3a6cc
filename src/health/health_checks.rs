use std::{collections::BTreeMap, panic::AssertUnwindSafe, sync::Arc, time::{Duration, Instant}};

use futures::{FutureExt, future::join_all};

use crate::health::{health_check::{HealthCheck, HealthCheckResult}, health_report::{HealthReport, HealthReportEntry}, health_status::HealthStatus};

/// Registry of named checks that are run together into a `HealthReport`.
#[derive(Clone)]
pub struct HealthChecks {
    checks: Vec<(String, Arc<dyn HealthCheck>)>,
    timeout: Duration,
}

impl HealthChecks {
    pub fn new() -> Self {
        HealthChecks {
            checks: Vec::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Registers a check under `name`. A later check with the same name replaces the report entry of the earlier one.
    pub fn add(mut self, name: impl Into<String>, check: impl HealthCheck + 'static) -> Self {
        self.checks.push((name.into(), Arc::new(check)));
        self
    }

    /// **Optional**
    ///
    /// Maximum time a single check may take before it is reported as unhealthy.
    ///
    /// Default: `30s`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs every check concurrently and aggregates the results.
    pub async fn run(&self) -> HealthReport {
        let started = Instant::now();
        let results = join_all(self.checks.iter().map(|(name, check)| async move {
            let started = Instant::now();
            let result = Self::run_check(check.as_ref(), self.timeout).await;
            if result.status != HealthStatus::Healthy {
                tracing::warn!("health check '{}' reported {}: {:?}", name, result.status, result.description);
            }
            (name.clone(), HealthReportEntry::new(result, started.elapsed()))
        }))
        .await;

        HealthReport::new(results.into_iter().collect::<BTreeMap<_, _>>(), started.elapsed())
    }

    async fn run_check(check: &dyn HealthCheck, timeout: Duration) -> HealthCheckResult {
        let check_fut = AssertUnwindSafe(check.check()).catch_unwind();
        match tokio::time::timeout(timeout, check_fut).await {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                tracing::error!("health check panicked: {:?}", err);
                HealthCheckResult::unhealthy("Health check panicked.")
            }
            Err(_) => HealthCheckResult::unhealthy(format!("Health check timed out after {:?}.", timeout)),
        }
    }
}

impl Default for HealthChecks {
    fn default() -> Self {
        HealthChecks::new()
    }
}

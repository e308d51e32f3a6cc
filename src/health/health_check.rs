use futures::future::BoxFuture;

use crate::health::health_status::HealthStatus;

/// Outcome of a single check run.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthCheckResult {
    pub status: HealthStatus,
    pub description: Option<String>,
}

impl HealthCheckResult {
    pub fn healthy() -> Self {
        HealthCheckResult {
            status: HealthStatus::Healthy,
            description: None,
        }
    }

    pub fn degraded(description: impl Into<String>) -> Self {
        HealthCheckResult {
            status: HealthStatus::Degraded,
            description: Some(description.into()),
        }
    }

    pub fn unhealthy(description: impl Into<String>) -> Self {
        HealthCheckResult {
            status: HealthStatus::Unhealthy,
            description: Some(description.into()),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A liveness check for one dependency.
///
/// Closures returning a future of `HealthCheckResult` implement this trait, so simple checks
/// can be registered without a dedicated type.
pub trait HealthCheck: Send + Sync {
    fn check(&self) -> BoxFuture<'_, HealthCheckResult>;
}

impl<T, Fut> HealthCheck for T
where
    T: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = HealthCheckResult> + Send + 'static,
{
    fn check(&self) -> BoxFuture<'_, HealthCheckResult> {
        Box::pin(self())
    }
}

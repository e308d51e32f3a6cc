use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Ordered from worst to best, so the minimum of a set of statuses is the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Unhealthy,
    Degraded,
    Healthy,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Unhealthy => "Unhealthy",
            HealthStatus::Degraded => "Degraded",
            HealthStatus::Healthy => "Healthy",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = anyhow::Error;

    fn from_str(status: &str) -> Result<Self, Self::Err> {
        match status {
            "Unhealthy" => Ok(HealthStatus::Unhealthy),
            "Degraded" => Ok(HealthStatus::Degraded),
            "Healthy" => Ok(HealthStatus::Healthy),
            _ => Err(anyhow::anyhow!("Invalid health status: {}", status)),
        }
    }
}

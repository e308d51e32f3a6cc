use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::health::{health_check::HealthCheckResult, health_status::HealthStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReportEntry {
    pub status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration_ms: u64,
}

impl HealthReportEntry {
    pub fn new(result: HealthCheckResult, duration: Duration) -> Self {
        HealthReportEntry {
            status: result.status,
            description: result.description,
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Aggregated result of every registered check, as served by health endpoints
/// and consumed by the UI collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub total_duration_ms: u64,
    pub entries: BTreeMap<String, HealthReportEntry>,
}

impl HealthReport {
    /// The report status is the worst entry status, or `Healthy` when there are no entries.
    pub fn new(entries: BTreeMap<String, HealthReportEntry>, total_duration: Duration) -> Self {
        let status = entries
            .values()
            .map(|entry| entry.status)
            .min()
            .unwrap_or(HealthStatus::Healthy);

        HealthReport {
            status,
            total_duration_ms: total_duration.as_millis() as u64,
            entries,
        }
    }

    /// Builds an unhealthy report with a single entry, used when a report could not be obtained.
    pub fn from_error(name: impl Into<String>, error: impl ToString) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            name.into(),
            HealthReportEntry {
                status: HealthStatus::Unhealthy,
                description: Some(error.to_string()),
                duration_ms: 0,
            },
        );
        HealthReport::new(entries, Duration::ZERO)
    }

    /// First description among the entries that share the report status.
    pub fn description(&self) -> Option<&str> {
        self.entries
            .values()
            .filter(|entry| entry.status == self.status)
            .find_map(|entry| entry.description.as_deref())
    }
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::health::health_status::HealthStatus;

/// An endpoint the UI collector polls for health reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckConfiguration {
    pub id: i64,
    pub name: String,
    pub uri: String,
    pub discovery_service: Option<String>,
}

/// Latest known state of one configured endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckExecution {
    pub id: i64,
    pub name: String,
    pub uri: String,
    pub status: HealthStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub on_state_from: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_executed: OffsetDateTime,
    pub discovery_service: Option<String>,
    pub entries: Vec<HealthCheckExecutionEntry>,
    pub history: Vec<HealthCheckExecutionHistory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckExecutionEntry {
    pub name: String,
    pub status: HealthStatus,
    pub description: Option<String>,
    pub duration_ms: u64,
}

/// A status change of an execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckExecutionHistory {
    pub name: String,
    pub status: HealthStatus,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub on: OffsetDateTime,
}

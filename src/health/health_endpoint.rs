use std::sync::Arc;

use crate::{health::{health_checks::HealthChecks, health_status::HealthStatus}, http::{http_response::HttpResponse, http_server::HttpServer}};

impl HealthChecks {
    /// Serves the health report as JSON on `path`.
    ///
    /// Responds `200` when the report is healthy or degraded and `503` when unhealthy.
    pub fn endpoint(self, server: HttpServer, path: impl AsRef<str>) -> anyhow::Result<HttpServer> {
        let checks = Arc::new(self);
        server.route(path, move |_request| {
            let checks = checks.clone();
            async move {
                let report = checks.run().await;
                let status = match report.status {
                    HealthStatus::Unhealthy => 503,
                    _ => 200,
                };
                HttpResponse::json(&report).status(status)
            }
        })
    }
}

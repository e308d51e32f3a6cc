use crate::{http::{http_response::HttpResponse, http_server::HttpServer}, storage::health_checks_db::HealthChecksDb};

/// Serves the stored executions as a JSON list on `path`.
pub fn executions_route(server: HttpServer, path: impl AsRef<str>, db: HealthChecksDb) -> anyhow::Result<HttpServer> {
    server.route(path, move |_request| {
        let db = db.clone();
        async move {
            match db.executions().await {
                Ok(executions) => HttpResponse::json(&executions),
                Err(err) => {
                    tracing::error!("failed to load executions: {:?}", err);
                    HttpResponse::internal_server_error()
                }
            }
        }
    })
}

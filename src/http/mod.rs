pub mod http_client;
pub mod http_request;
pub mod http_response;
pub mod http_server;
pub mod http_server_config;

#[cfg(test)]
mod test {
    use std::net::SocketAddr;

    use tokio::{net::TcpListener, task::JoinHandle};

    use crate::http::{http_client::HttpClient, http_response::HttpResponse, http_server::{HttpServer, HttpServerHandle}, http_server_config::HttpServerConfig};

    async fn serve(server: HttpServer) -> (SocketAddr, HttpServerHandle, JoinHandle<anyhow::Result<()>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = server.handle();
        let task = tokio::spawn(server.receive_on(listener));
        (addr, handle, task)
    }

    #[tokio::test]
    async fn http_server_routes_request() {
        let server = HttpServer::new(HttpServerConfig::new("127.0.0.1", 0))
            .route("/", |_request| async { HttpResponse::ok().body("Text") })
            .unwrap();
        let (addr, handle, task) = serve(server).await;

        let response = HttpClient::new().get(format!("http://{}/", addr)).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body_to_string(), "Text");

        handle.shutdown();
        tokio_test::assert_ok!(task.await.unwrap());
    }

    #[tokio::test]
    async fn http_server_unknown_route_is_not_found() {
        let server = HttpServer::new(HttpServerConfig::new("127.0.0.1", 0))
            .route("/known", |_request| async { HttpResponse::ok() })
            .unwrap();
        let (addr, handle, task) = serve(server).await;

        let response = HttpClient::new().get(format!("http://{}/unknown", addr)).await.unwrap();
        assert_eq!(response.status, 404);

        handle.shutdown();
        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn http_server_panicking_handler_is_internal_server_error() {
        let server = HttpServer::new(HttpServerConfig::new("127.0.0.1", 0))
            .route("/panic", |request| async move {
                if request.path == "/panic" {
                    panic!("handler failure");
                }
                HttpResponse::ok()
            })
            .unwrap();
        let (addr, handle, task) = serve(server).await;

        let response = HttpClient::new().get(format!("http://{}/panic", addr)).await.unwrap();
        assert_eq!(response.status, 500);

        handle.shutdown();
        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn http_server_passes_query_to_handler() {
        let server = HttpServer::new(HttpServerConfig::new("127.0.0.1", 0))
            .route("/echo", |request| async move { HttpResponse::ok().body(request.query.unwrap_or_default()) })
            .unwrap();
        let (addr, handle, task) = serve(server).await;

        let response = HttpClient::new().get(format!("http://{}/echo?name=sftp", addr)).await.unwrap();
        assert_eq!(response.body_to_string(), "name=sftp");

        handle.shutdown();
        assert!(task.await.unwrap().is_ok());
    }

    #[test]
    fn http_server_rejects_conflicting_route() {
        let result = HttpServer::new(HttpServerConfig::new("127.0.0.1", 0))
            .route("/health", |_request| async { HttpResponse::ok() })
            .unwrap()
            .route("/health", |_request| async { HttpResponse::ok() });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn http_client_connects_to_ipv6_literal() {
        let listener = match TcpListener::bind("[::1]:0").await {
            Ok(listener) => listener,
            Err(err) => {
                tracing::warn!("ipv6 loopback unavailable: {}", err);
                return;
            }
        };
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(HttpServerConfig::new("::1", 0))
            .route("/health", |_request| async { HttpResponse::ok().body("up") })
            .unwrap();
        let handle = server.handle();
        let task = tokio::spawn(server.receive_on(listener));

        let response = HttpClient::new().get(format!("http://{}/health", addr)).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body_to_string(), "up");

        handle.shutdown();
        tokio_test::assert_ok!(task.await.unwrap());
    }

    #[tokio::test]
    async fn http_client_rejects_https() {
        let result = HttpClient::new().get("https://127.0.0.1/health").await;
        assert!(result.unwrap_err().to_string().contains("Unsupported scheme"));
    }

    #[test]
    fn http_response_json_sets_content_type() {
        let response = HttpResponse::json(&vec!["a", "b"]);
        assert_eq!(response.status, 200);
        assert_eq!(response.headers.get("Content-Type").map(String::as_str), Some("application/json"));
        assert_eq!(response.body_json::<Vec<String>>().unwrap(), vec!["a", "b"]);
    }
}

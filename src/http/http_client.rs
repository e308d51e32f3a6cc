use std::time::Duration;

use bytes::Bytes;
use http_body_util::Empty;
use hyper::{Method, Request, Uri, header::HOST};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::http::http_response::HttpResponse;

/// Plain HTTP/1.1 client used to poll health endpoints.
#[derive(Debug, Clone)]
pub struct HttpClient {
    timeout: Duration,
}

impl HttpClient {
    pub fn new() -> Self {
        HttpClient {
            timeout: Duration::from_secs(30),
        }
    }

    /// **Optional**
    ///
    /// Default: `30s`
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sends a GET request. Only the `http` scheme is supported.
    pub async fn get(&self, uri: impl AsRef<str>) -> anyhow::Result<HttpResponse> {
        match tokio::time::timeout(self.timeout, Self::send_get(uri.as_ref())).await {
            Ok(result) => result,
            Err(_) => Err(anyhow::anyhow!("Request to '{}' timed out after {:?}.", uri.as_ref(), self.timeout)),
        }
    }

    async fn send_get(uri: &str) -> anyhow::Result<HttpResponse> {
        let uri = uri.parse::<Uri>()?;
        match uri.scheme_str() {
            Some("http") => {}
            Some(scheme) => return Err(anyhow::anyhow!("Unsupported scheme: {}", scheme)),
            None => return Err(anyhow::anyhow!("URL is missing a scheme.")),
        }

        // IPv6 literals keep their brackets in the URI.
        let host = match uri.host() {
            Some(host) => host.trim_start_matches('[').trim_end_matches(']'),
            None => return Err(anyhow::anyhow!("Invalid URL.")),
        };
        let port = uri.port_u16().unwrap_or(80);
        let authority = match uri.authority() {
            Some(authority) => authority.as_str().to_owned(),
            None => return Err(anyhow::anyhow!("Invalid URL.")),
        };
        let path = uri.path_and_query().map(|path| path.as_str()).unwrap_or("/");

        let stream = TcpStream::connect((host, port)).await?;
        let io = TokioIo::new(stream);
        let (mut sender, connection) = hyper::client::conn::http1::handshake(io).await?;

        tokio::spawn(async move {
            if let Err(err) = connection.await {
                tracing::debug!("connection closed with error: {:?}", err);
            }
        });

        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(HOST, authority)
            .body(Empty::<Bytes>::new())?;

        let response = sender.send_request(request).await?;
        HttpResponse::from_incoming(response).await
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        HttpClient::new()
    }
}

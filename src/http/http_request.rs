use std::collections::HashMap;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::{Request, body::Incoming};

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpRequest {
    /// Reads the full body of an incoming hyper request.
    pub async fn from_incoming(request: Request<Incoming>) -> anyhow::Result<Self> {
        let (parts, body) = request.into_parts();
        let body = body.collect().await?.to_bytes();
        let headers = parts
            .headers
            .iter()
            .filter_map(|(key, value)| value.to_str().ok().map(|value| (key.as_str().to_owned(), value.to_owned())))
            .collect();

        Ok(HttpRequest {
            method: parts.method.as_str().to_owned(),
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            headers,
            body,
        })
    }

    pub fn body_to_string(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

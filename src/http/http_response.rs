use std::collections::HashMap;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Response, StatusCode, body::Incoming};
use serde::{Serialize, de::DeserializeOwned};

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16) -> Self {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn ok() -> Self {
        HttpResponse::new(200)
    }

    pub fn not_found() -> Self {
        HttpResponse::new(404)
    }

    pub fn internal_server_error() -> Self {
        HttpResponse::new(500)
    }

    pub fn service_unavailable() -> Self {
        HttpResponse::new(503)
    }

    /// Serializes `value` as a `200 OK` JSON response, or a `500` if serialization fails.
    pub fn json<T: Serialize>(value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => HttpResponse::ok().header("Content-Type", "application/json").body(body),
            Err(err) => {
                tracing::error!("failed to serialize response: {:?}", err);
                HttpResponse::internal_server_error()
            }
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn body_to_string(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn body_json<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub(crate) async fn from_incoming(response: Response<Incoming>) -> anyhow::Result<Self> {
        let (parts, body) = response.into_parts();
        let body = body.collect().await?.to_bytes();
        let headers = parts
            .headers
            .iter()
            .filter_map(|(key, value)| value.to_str().ok().map(|value| (key.as_str().to_owned(), value.to_owned())))
            .collect();

        Ok(HttpResponse {
            status: parts.status.as_u16(),
            headers,
            body,
        })
    }
}

impl From<HttpResponse> for Response<Full<Bytes>> {
    fn from(response: HttpResponse) -> Self {
        let mut res = Response::new(Full::new(response.body));
        *res.status_mut() = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        for (key, value) in response.headers {
            match (key.parse::<hyper::header::HeaderName>(), value.parse::<hyper::header::HeaderValue>()) {
                (Ok(key), Ok(value)) => {
                    res.headers_mut().insert(key, value);
                }
                _ => tracing::warn!("skipping invalid response header '{}'", key),
            }
        }
        res
    }
}

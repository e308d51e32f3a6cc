use std::{convert::Infallible, net::SocketAddr, panic::AssertUnwindSafe, pin::Pin, sync::Arc};

use bytes::Bytes;
use futures::FutureExt;
use http_body_util::Full;
use hyper::{Request, Response, body::Incoming, service::service_fn};
use hyper_util::rt::TokioIo;
use matchit::Router;
use tokio::{net::{TcpListener, TcpStream}, signal::unix::{signal, SignalKind}, sync::Notify, task::JoinSet};

use crate::http::{http_request::HttpRequest, http_response::HttpResponse, http_server_config::HttpServerConfig};

type RouteCallback = Arc<dyn Fn(HttpRequest) -> Pin<Box<dyn Future<Output = HttpResponse> + Send>> + Send + Sync>;

/// Stops a running `HttpServer` from another task.
#[derive(Clone)]
pub struct HttpServerHandle {
    shutdown: Arc<Notify>,
}

impl HttpServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

pub struct HttpServer {
    config: HttpServerConfig,
    router: Router<RouteCallback>,
    shutdown: Arc<Notify>,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig) -> Self {
        HttpServer {
            config,
            router: Router::new(),
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Registers a route with a path, associating it with a handler callback.
    pub fn route<T, Fut>(mut self, path: impl AsRef<str>, callback: T) -> anyhow::Result<Self>
    where
        T: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HttpResponse> + Send + 'static,
    {
        let path = path.as_ref();
        self.router
            .insert(path, Arc::new(move |request| Box::pin(callback(request))))
            .map_err(|err| anyhow::anyhow!("Invalid route path '{}': {}", path, err))?;
        Ok(self)
    }

    pub fn handle(&self) -> HttpServerHandle {
        HttpServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Binds the configured address and serves until shut down.
    pub async fn receive(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.host()).await?;
        self.receive_on(listener).await
    }

    /// Serves connections accepted from `listener`.
    ///
    /// Stops accepting on SIGINT, SIGTERM or `HttpServerHandle::shutdown`, then waits for open connections to finish.
    pub async fn receive_on(self, listener: TcpListener) -> anyhow::Result<()> {
        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut receiver_join_set = JoinSet::new();
        let router = Arc::new(self.router);
        let local_addr = listener.local_addr()?;

        tracing::trace!("started on {}", local_addr);
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => break,
                _ = sigterm.recv() => break,
                _ = sigint.recv() => break,
                result = listener.accept() => {
                    let (tcp_stream, client_addr) = match result {
                        Ok(pair) => pair,
                        Err(err) => {
                            tracing::error!("{:?}", err);
                            continue;
                        },
                    };

                    receiver_join_set.spawn(Self::tcp_connection(tcp_stream, client_addr, router.clone()));
                }
            }
        }

        drop(listener);
        tracing::trace!("shut down pending...");
        while receiver_join_set.join_next().await.is_some() {}
        tracing::trace!("shut down complete");
        Ok(())
    }

    async fn tcp_connection(tcp_stream: TcpStream, client_addr: SocketAddr, router: Arc<Router<RouteCallback>>) {
        tracing::trace!("connection {:?}", client_addr);
        let service = service_fn(move |request| Self::incoming_request(request, router.clone()));

        let io = TokioIo::new(tcp_stream);
        if let Err(err) = hyper::server::conn::http1::Builder::new().keep_alive(false).serve_connection(io, service).await {
            tracing::error!("{:?}", err);
        }
    }

    async fn incoming_request(request: Request<Incoming>, router: Arc<Router<RouteCallback>>) -> Result<Response<Full<Bytes>>, Infallible> {
        let callback = match router.at(request.uri().path()) {
            Ok(matched) => matched.value.clone(),
            Err(_) => return Ok(Response::from(HttpResponse::not_found())),
        };

        let request = match HttpRequest::from_incoming(request).await {
            Ok(request) => request,
            Err(err) => {
                tracing::error!("failed to read request: {:?}", err);
                return Ok(Response::from(HttpResponse::internal_server_error()));
            }
        };

        let response = match AssertUnwindSafe(callback(request)).catch_unwind().await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("{:?}", err);
                HttpResponse::internal_server_error()
            }
        };

        Ok(Response::from(response))
    }
}

//! HTTP/1.1 server on hyper and tokio.
//!
//! One task per accepted connection. Each request body is buffered, then
//! handed to the [`Dispatcher`] under the configured request timeout.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use marci_core::response::text;
use marci_core::{HttpResponse, RouteTable};

use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::error::{ServerError, ServerResult};
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// The Marci HTTP server.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    dispatcher: Dispatcher,
}

impl Server {
    /// Creates a server for a frozen route table.
    #[must_use]
    pub fn new(config: ServerConfig, table: Arc<RouteTable>) -> Self {
        Self::with_dispatcher(config, Dispatcher::new(table))
    }

    /// Creates a server around an existing dispatcher.
    #[must_use]
    pub fn with_dispatcher(config: ServerConfig, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Runs until SIGINT or SIGTERM.
    pub async fn run(self) -> ServerResult<()> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Binds the configured address and serves until `shutdown` fires.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> ServerResult<()> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }

    /// Binds the configured address.
    pub async fn bind(&self) -> ServerResult<TcpListener> {
        let addr = self.config.socket_addr()?;
        TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })
    }

    /// Serves connections from an already bound listener.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) -> ServerResult<()> {
        let port = listener.local_addr()?.port();
        tracing::info!("Server listened on http://localhost:{port}");

        let server = Arc::new(self);
        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, remote_addr)) => {
                        let server = Arc::clone(&server);
                        let token = tracker.acquire();
                        let shutdown = shutdown.clone();

                        tokio::spawn(async move {
                            if let Err(e) = server.handle_connection(stream, remote_addr, shutdown).await {
                                tracing::error!(%remote_addr, error = %e, "connection error");
                            }
                            drop(token);
                        });
                    }
                    Err(e) => tracing::error!(error = %e, "failed to accept connection"),
                },

                () = shutdown.recv() => {
                    tracing::info!("shutdown signal received, no longer accepting connections");
                    break;
                }
            }
        }

        let shutdown_timeout = server.config.shutdown_timeout();
        tracing::info!(
            active = tracker.active_connections(),
            "waiting up to {shutdown_timeout:?} for connections to close"
        );

        tokio::select! {
            () = tracker.wait_for_shutdown() => tracing::info!("all connections closed"),
            () = tokio::time::sleep(shutdown_timeout) => tracing::warn!(
                active = tracker.active_connections(),
                "shutdown timeout reached with connections still open"
            ),
        }

        tracing::info!("server stopped");
        Ok(())
    }

    async fn handle_connection(
        self: Arc<Self>,
        stream: TcpStream,
        remote_addr: SocketAddr,
        shutdown: ShutdownSignal,
    ) -> Result<(), hyper::Error> {
        let io = TokioIo::new(stream);
        let server = Arc::clone(&self);
        let service = service_fn(move |req: Request<Incoming>| {
            let server = Arc::clone(&server);
            async move { Ok::<_, Infallible>(server.handle_request(req).await) }
        });

        let conn = http1::Builder::new().serve_connection(io, service);
        tokio::pin!(conn);

        tokio::select! {
            result = conn.as_mut() => return result,
            () = shutdown.recv() => {
                tracing::debug!(%remote_addr, "draining connection for shutdown");
                conn.as_mut().graceful_shutdown();
            }
        }
        conn.await
    }

    async fn handle_request(&self, req: Request<Incoming>) -> HttpResponse {
        let timeout = self.config.request_timeout();
        match tokio::time::timeout(timeout, self.process(req)).await {
            Ok(response) => response,
            Err(_) => {
                tracing::warn!("request exceeded {timeout:?}");
                text(StatusCode::GATEWAY_TIMEOUT, "Request Timeout")
            }
        }
    }

    async fn process(&self, req: Request<Incoming>) -> HttpResponse {
        let (parts, body) = req.into_parts();
        let body = match collect_body(body).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read request body");
                return text(StatusCode::BAD_REQUEST, "Failed to read request body");
            }
        };
        self.dispatcher.dispatch(Request::from_parts(parts, body)).await
    }
}

async fn collect_body(body: Incoming) -> Result<Bytes, hyper::Error> {
    Ok(body.collect().await?.to_bytes())
}

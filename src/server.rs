//! hyper host adapter and graceful shutdown.
//!
//! The router itself is transport-agnostic: any host that can build a
//! [`Request`] and send a [`Response`] can call [`Router::dispatch`]. This
//! module is the host for callers who just want a listening socket.
//!
//! [`Server::serve`] takes the router by value and moves it behind an
//! `Arc`, so routes are frozen for as long as the server runs.
//!
//! On SIGTERM or Ctrl-C the server stops accepting, lets every in-flight
//! connection finish, then returns.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when
    /// [`serve`](Server::serve) is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr
            .parse()
            .unwrap_or_else(|e| panic!("invalid socket address `{addr}`: {e}"));
        Self { addr }
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves `router` until `signal` resolves, then drains.
    pub async fn serve_with_shutdown(
        self,
        router: Router,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        Self::serve_listener(listener, router, signal).await
    }

    /// Serves `router` on an already bound listener until `signal` resolves.
    pub async fn serve_listener(
        listener: TcpListener,
        router: Router,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let router = Arc::new(router);
        info!(addr = %listener.local_addr()?, "turnstile listening");

        let mut tasks = tokio::task::JoinSet::new();
        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting at once.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { handle(router, req, peer).await }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(%peer, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connections so the set stays bounded.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("turnstile stopped");
        Ok(())
    }
}

// ── Request handling ──────────────────────────────────────────────────────────

/// Buffers one hyper request, dispatches it and converts the response back.
///
/// Every failure becomes a status code, so hyper never sees an error.
async fn handle(
    router: Arc<Router>,
    req: hyper::Request<Incoming>,
    peer: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let req = match Request::from_hyper(req).await {
        Ok(req) => req,
        Err(e) => {
            warn!(%peer, "failed to read request body: {e}");
            return Ok(Response::status(StatusCode::BAD_REQUEST).into_http());
        }
    };

    debug!(%peer, method = req.method(), path = req.path(), "dispatch");
    Ok(router.dispatch(req).await.into_http())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C). Only Ctrl-C on
/// non-Unix platforms.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

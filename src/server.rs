//! HTTP server and graceful shutdown.
//!
//! The server is the host transport for a [`Router`]: it accepts
//! connections, turns each hyper request into a [`Request`], and writes back
//! whatever [`Router::route`] produces.
//!
//! # What the router sees
//!
//! The router works on the *decoded* path. `/caf%C3%A9` reaches controller
//! `café`, and `/users/%34%32` reaches an `{i}` action with segment `42`.
//! Decoding happens before the path is split, so an encoded `%2F` separates
//! segments like a literal `/` does.
//!
//! Header values are handed over even when they are not visible ASCII: the
//! bytes are decoded lossily rather than dropped, so a malformed
//! `content-type` still reaches the allow-list and is rejected there instead
//! of silently counting as absent.
//!
//! # Graceful shutdown
//!
//! On SIGTERM (what Kubernetes and most process supervisors send) or Ctrl-C
//! the server:
//! 1. stops calling `listener.accept()`, so no new connections are made;
//! 2. lets every in-flight connection task run to completion;
//! 3. returns from [`Server::serve`], so `main` can exit cleanly.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Largest request body read by default: 2 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    body_limit: usize,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust,no_run
    /// use dirtyroute::Server;
    /// let server = Server::bind("0.0.0.0:3000")?;
    /// # Ok::<(), dirtyroute::Error>(())
    /// ```
    pub fn bind(addr: &str) -> Result<Self, Error> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|source| Error::Addr { addr: addr.to_owned(), source })?;
        Ok(Self { addr, body_limit: DEFAULT_BODY_LIMIT })
    }

    /// Caps how many body bytes are read per request. Larger bodies are
    /// answered with `413 Payload Too Large` and never reach the router.
    pub fn body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Accepts connections and dispatches them through `router` until a
    /// shutdown signal arrives and every in-flight connection has finished.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        let body_limit = self.body_limit;

        // One routing table, shared by every connection task. The router is
        // read-only once serving starts, so an `Arc` is all it needs.
        let router = Arc::new(router);

        info!(addr = %self.addr, controllers = router.registry().len(), "dirtyroute listening");

        // Every spawned connection lives in the JoinSet so shutdown can wait
        // for all of them.
        let mut tasks = tokio::task::JoinSet::new();

        // `select!` polls the shutdown future repeatedly across loop turns,
        // so it has to stay put in memory: pin it on the stack.
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check arms top to bottom instead of randomly. With shutdown
                // first, a signal stops accepting even while a backlog of
                // connections is still queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    // Adapts tokio's AsyncRead/AsyncWrite to hyper's IO traits.
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on this connection, not once
                        // per connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(&router, req, body_limit).await }
                        });

                        // HTTP/1.1 or HTTP/2, whichever the client speaks.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // for the lifetime of the server.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain.
        while tasks.join_next().await.is_some() {}

        info!("dirtyroute stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Reads one hyper request into a [`Request`] and routes it.
///
/// The error type is [`Infallible`]: routing failures are responses, an
/// oversized body is a `413`, and an unreadable one is a `400`, so hyper
/// never sees an error.
async fn dispatch(
    router: &Router,
    req: hyper::Request<Incoming>,
    body_limit: usize,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();

    let body = match read_body(body, body_limit).await {
        Ok(body) => body,
        Err(status) => {
            warn!(path = parts.uri.path(), %status, "rejecting request body");
            return Ok(Response::status(status).into_inner());
        }
    };

    Ok(router.route(to_request(&parts, body)).await.into_inner())
}

/// Collects at most `limit` bytes of `body`.
async fn read_body<B>(body: B, limit: usize) -> Result<Vec<u8>, StatusCode>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes().to_vec()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(StatusCode::PAYLOAD_TOO_LARGE),
        Err(e) => {
            warn!("failed to read request body: {e}");
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Builds the router's view of a request from hyper's request head.
fn to_request(parts: &http::request::Parts, body: Vec<u8>) -> Request {
    let headers = parts.headers.iter()
        .map(|(name, value)| {
            (name.as_str().to_owned(), String::from_utf8_lossy(value.as_bytes()).into_owned())
        })
        .collect();

    Request {
        method: parts.method.as_str().to_owned(),
        path: percent_decode_str(parts.uri.path()).decode_utf8_lossy().into_owned(),
        headers,
        body,
        controller: String::new(),
        segments: Vec::new(),
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or Ctrl-C. A signal that cannot be
/// installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => { signal.recv().await; }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    // Windows only has Ctrl-C; the SIGTERM arm never resolves there.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

//! Bound listeners for the two supported transports.
//!
//! # Responsibilities
//! - Bind `0.0.0.0:{port}` for plain HTTP or TLS-terminated HTTPS
//! - Drive the accept loop for a finished router
//!
//! # Design Decisions
//! - Binding happens before Ready is ever reported; a bind failure is a
//!   fatal startup error, never swallowed
//! - TLS sessions terminate in-process via rustls; the router behind both
//!   transports is identical

use std::io;
use std::net::{Ipv4Addr, SocketAddr, TcpListener as StdTcpListener};

use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use thiserror::Error;
use tokio::net::TcpListener;

/// Errors from listener binding and serving.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured port could not be bound (in use, permission denied).
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    /// The accept loop failed after the listener was up.
    #[error("listener failed while serving: {0}")]
    Serve(#[from] io::Error),
}

enum TransportKind {
    Http(TcpListener),
    Https(StdTcpListener, RustlsConfig),
}

/// A listener bound on all interfaces, ready to serve a router.
pub struct Transport {
    addr: SocketAddr,
    kind: TransportKind,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            TransportKind::Http(_) => "http",
            TransportKind::Https(..) => "https",
        };
        f.debug_struct("Transport")
            .field("addr", &self.addr)
            .field("kind", &kind)
            .finish()
    }
}

impl Transport {
    /// Bind a plain HTTP listener on `0.0.0.0:{port}`.
    pub async fn bind_http(port: u16) -> Result<Self, ListenerError> {
        let addr = bind_addr(port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ListenerError::Bind { addr, source })?;
        let addr = listener
            .local_addr()
            .map_err(|source| ListenerError::Bind { addr, source })?;

        Ok(Self {
            addr,
            kind: TransportKind::Http(listener),
        })
    }

    /// Bind a TLS-terminating listener on `0.0.0.0:{port}`.
    pub fn bind_https(port: u16, tls: RustlsConfig) -> Result<Self, ListenerError> {
        let addr = bind_addr(port);
        let listener =
            StdTcpListener::bind(addr).map_err(|source| ListenerError::Bind { addr, source })?;
        listener
            .set_nonblocking(true)
            .map_err(|source| ListenerError::Bind { addr, source })?;
        let addr = listener
            .local_addr()
            .map_err(|source| ListenerError::Bind { addr, source })?;

        Ok(Self {
            addr,
            kind: TransportKind::Https(listener, tls),
        })
    }

    /// Address the listener actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve the router until the process is told to stop.
    pub async fn serve(self, router: Router) -> Result<(), ListenerError> {
        match self.kind {
            TransportKind::Http(listener) => {
                axum::serve(listener, router)
                    .with_graceful_shutdown(shutdown_signal())
                    .await?;
            }
            TransportKind::Https(listener, tls) => {
                axum_server::from_tcp_rustls(listener, tls)
                    .serve(router.into_make_service())
                    .await?;
            }
        }
        Ok(())
    }
}

fn bind_addr(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}

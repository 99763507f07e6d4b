//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration before anything else runs
//! - Prepare the embedded application, then bind the listener
//! - Emit the startup line and the one-shot configuration report
//!
//! # Design Decisions
//! - Stages compose strictly in sequence; there is no retry anywhere
//! - Configuration resolves during `Initializing`, so a missing required
//!   key can never bind a listener or run application init
//! - The post-Ready report is log-only; a rendering failure is logged and
//!   swallowed so it can never take down an already-bound listener

use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use thiserror::Error;

use crate::app::{AppInitError, Application};
use crate::config::{
    report, ConfigError, EnvSnapshot, Protocol, RuntimeSecrets, ServerSettings,
};
use crate::http::build_router;
use crate::net::{tls, ListenerError, Transport, TransportError};

/// Fatal startup failure. Every variant aborts before traffic is served.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    App(#[from] AppInitError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// Named stages of the startup sequence, in execution order. Any failure
/// is terminal; there is no stage after Ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Initializing,
    PreparingApp,
    StartingListener,
    Ready,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Initializing => "initializing",
            Self::PreparingApp => "preparing-app",
            Self::StartingListener => "starting-listener",
            Self::Ready => "ready",
        })
    }
}

fn enter(stage: Stage) {
    tracing::debug!(stage = %stage, "startup stage");
}

/// One-shot startup pipeline: configuration, application init, transport,
/// listener.
pub struct Bootstrap<A> {
    snapshot: EnvSnapshot,
    app: A,
    root: PathBuf,
}

impl<A: Application> Bootstrap<A> {
    /// Start from an environment snapshot and the embedded application.
    pub fn new(snapshot: EnvSnapshot, app: A) -> Self {
        Self {
            snapshot,
            app,
            root: PathBuf::from("."),
        }
    }

    /// Relocate the application root (`certs/`, `uploads/`).
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Run every stage through Ready: validate configuration, prepare the
    /// application, bind the listener, emit the startup line and the
    /// config report. Returns the server ready to accept traffic.
    pub async fn start(self) -> Result<ReadyServer, StartupError> {
        enter(Stage::Initializing);
        let settings = ServerSettings::from_snapshot(&self.snapshot, self.root)?;
        let secrets = RuntimeSecrets::from_snapshot(&self.snapshot);
        let groups = report::startup_groups(&self.snapshot, &secrets)?;

        enter(Stage::PreparingApp);
        self.app.prepare().await?;

        enter(Stage::StartingListener);
        let router = build_router(&settings.uploads_dir(), Arc::new(self.app));
        let transport = match settings.protocol {
            Protocol::Https => {
                let tls_config = tls::load_tls_config(&settings.certs_dir()).await?;
                Transport::bind_https(settings.port, tls_config)?
            }
            Protocol::Http => Transport::bind_http(settings.port).await?,
        };

        enter(Stage::Ready);
        let addr = transport.local_addr();
        let scheme = settings.protocol.scheme();
        let host = settings.display_host();
        tracing::info!(
            protocol = scheme,
            host,
            port = addr.port(),
            environment = %settings.env_name,
            dev_mode = settings.dev,
            address = %format!("{scheme}://{host}:{port}", port = addr.port()),
            "Server listening"
        );

        match report::render(&groups) {
            Ok(summary) => tracing::info!("Loaded configuration:\n{summary}"),
            Err(error) => tracing::warn!(%error, "configuration summary was not rendered"),
        }

        Ok(ReadyServer {
            settings,
            transport,
            router,
        })
    }

    /// Full lifecycle: start, then serve until shutdown.
    pub async fn run(self) -> Result<(), StartupError> {
        let server = self.start().await?;
        server.serve().await.map_err(StartupError::from)
    }
}

/// A bound server that has passed every startup stage.
#[derive(Debug)]
pub struct ReadyServer {
    settings: ServerSettings,
    transport: Transport,
    router: Router,
}

impl ReadyServer {
    /// Address the listener bound, with the real port.
    pub fn local_addr(&self) -> SocketAddr {
        self.transport.local_addr()
    }

    /// Settings the server started with.
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Drive the accept loop until the process stops.
    pub async fn serve(self) -> Result<(), ListenerError> {
        self.transport.serve(self.router).await
    }
}

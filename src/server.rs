//! Server lifecycle: Created → Bound → Serving → Draining → Stopped.
//!
//! Each stage is an owned value consumed by the next transition, so there is
//! no shared server handle to mutate. The running stage is owned by whoever
//! waits for shutdown; the grace period bounds how long in-flight calls may
//! hold up exit.

use crate::config::ServerConfig;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::Methods;
use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Lifecycle stage, used in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Created,
    Bound,
    Serving,
    Draining,
    Stopped,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServerState::Created => "created",
            ServerState::Bound => "bound",
            ServerState::Serving => "serving",
            ServerState::Draining => "draining",
            ServerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// How the drain window ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every in-flight call finished inside the grace period
    Completed,
    /// The grace period elapsed first; remaining calls are abandoned
    TimedOut,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// A server that has been configured but not bound
#[derive(Debug)]
pub struct EchoServer {
    config: ServerConfig,
}

impl EchoServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn state(&self) -> ServerState {
        ServerState::Created
    }

    /// Bind the listening socket; failure here aborts startup
    pub async fn bind(self) -> Result<BoundServer, ServerError> {
        let addr = self.config.socket_addr();
        let bind_error = |source: std::io::Error| ServerError::Bind { addr, source };

        let server = Server::builder().build(addr).await.map_err(bind_error)?;
        let local_addr = server.local_addr().map_err(bind_error)?;
        debug!(state = %ServerState::Bound, address = %local_addr, "Listener bound");

        Ok(BoundServer {
            server,
            local_addr,
            grace_period: self.config.grace_period,
        })
    }
}

/// A server holding a bound listener, not yet accepting calls
pub struct BoundServer {
    server: Server,
    local_addr: SocketAddr,
    grace_period: Duration,
}

impl BoundServer {
    pub fn state(&self) -> ServerState {
        ServerState::Bound
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Attach the handlers and start accepting connections
    pub fn start(self, methods: impl Into<Methods>) -> RunningServer {
        let methods: Methods = methods.into();
        let method_names: Vec<&str> = methods.method_names().collect();

        let handle = self.server.start(methods);

        info!(
            state = %ServerState::Serving,
            address = %self.local_addr,
            port = self.local_addr.port(),
            "Echo server started"
        );
        info!("Methods ({}): {}", method_names.len(), method_names.join(", "));

        RunningServer {
            handle,
            local_addr: self.local_addr,
            grace_period: self.grace_period,
        }
    }
}

/// A server accepting calls
pub struct RunningServer {
    handle: ServerHandle,
    local_addr: SocketAddr,
    grace_period: Duration,
}

impl RunningServer {
    pub fn state(&self) -> ServerState {
        if self.handle.is_stopped() {
            ServerState::Stopped
        } else {
            ServerState::Serving
        }
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    /// Serve until `shutdown` resolves or the serving loop ends, then drain
    pub async fn run_until<F>(self, shutdown: F) -> DrainOutcome
    where
        F: Future<Output = ()>,
    {
        let watcher = self.handle.clone();

        tokio::select! {
            _ = shutdown => {
                info!(state = %ServerState::Draining, "Shutdown requested, draining in-flight calls");
            }
            _ = watcher.stopped() => {
                warn!(state = %ServerState::Draining, "Serving loop ended unexpectedly");
            }
        }

        self.drain().await
    }

    /// Stop accepting calls and wait up to the grace period for in-flight ones
    pub async fn drain(self) -> DrainOutcome {
        if let Err(err) = self.handle.stop() {
            warn!(error = %err, "Stop request failed");
        }

        match tokio::time::timeout(self.grace_period, self.handle.stopped()).await {
            Ok(()) => {
                info!(state = %ServerState::Stopped, "Server shut down");
                DrainOutcome::Completed
            }
            Err(_) => {
                warn!(
                    state = %ServerState::Stopped,
                    grace_period_ms = self.grace_period.as_millis() as u64,
                    "Grace period elapsed with calls still in flight"
                );
                DrainOutcome::TimedOut
            }
        }
    }
}

/// Resolve on Ctrl-C, or on SIGTERM where the platform has it
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}

/// Run the whole lifecycle: bind, serve until a termination signal, drain
pub async fn serve(
    config: ServerConfig,
    methods: impl Into<Methods>,
) -> Result<DrainOutcome, ServerError> {
    let running = EchoServer::new(config).bind().await?.start(methods);
    Ok(running.run_until(shutdown_signal()).await)
}

//! Connection guard
//!
//! A single supervisor task owns the live connection. Callers ask it for a
//! handle over a channel; if the current handle is missing or reports itself
//! disconnected, the supervisor releases it and opens a fresh one before
//! answering. Requests are served one at a time, so at most one connection
//! is ever being constructed and no caller can read a handle while it is
//! being replaced.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

/// Requests buffered before callers start waiting on the channel
const REQUEST_BUFFER: usize = 64;

/// Failure to hand out a connection
#[derive(Error, Debug)]
pub enum ConnectError {
    /// The client library refused or failed the connection
    #[error("Redis connection failed: {0}")]
    Redis(#[from] redis::RedisError),

    /// The connect attempt did not finish in time
    #[error("Connection attempt timed out after {0:?}")]
    Timeout(Duration),

    /// The guard has been shut down
    #[error("Connection guard is closed")]
    Closed,

    /// The guard was created outside a tokio runtime
    #[error("No tokio runtime available to run the connection guard")]
    NoRuntime,
}

/// A connection the guard can supervise
pub trait ManagedConnection: Clone + Send + Sync + 'static {
    /// Whether the connection still looks usable
    fn is_connected(&self) -> bool;

    /// Flag this connection as unusable; the guard replaces it on the next request
    fn mark_disconnected(&self);

    /// Mark the connection as released; called once before it is dropped
    fn close(&self) {}
}

/// Opens new connections for the guard
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Connection: ManagedConnection;

    /// Open a new connection
    async fn connect(&self) -> Result<Self::Connection, ConnectError>;
}

/// Counters describing the guard's connect history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardStats {
    /// Connect attempts made
    pub connect_attempts: u64,
    /// Attempts that produced a connection
    pub connects: u64,
    /// Attempts that failed
    pub connect_failures: u64,
    /// Stale connections released
    pub releases: u64,
}

#[derive(Debug, Default)]
struct Counters {
    connect_attempts: AtomicU64,
    connects: AtomicU64,
    connect_failures: AtomicU64,
    releases: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> GuardStats {
        GuardStats {
            connect_attempts: self.connect_attempts.load(Ordering::Relaxed),
            connects: self.connects.load(Ordering::Relaxed),
            connect_failures: self.connect_failures.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
        }
    }
}

enum Request<T> {
    Acquire(oneshot::Sender<Result<T, ConnectError>>),
    Shutdown(oneshot::Sender<()>),
}

/// Lazily connects and transparently reconnects
///
/// Cloning is cheap; all clones share
/// the same supervisor. The supervisor stops when the last clone is dropped
/// or on [`ConnectionGuard::shutdown`].
pub struct ConnectionGuard<C: Connector> {
    requests: mpsc::Sender<Request<C::Connection>>,
    connector: Arc<C>,
    counters: Arc<Counters>,
}

impl<C: Connector> Clone for ConnectionGuard<C> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            connector: self.connector.clone(),
            counters: self.counters.clone(),
        }
    }
}

impl<C: Connector> std::fmt::Debug for ConnectionGuard<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("stats", &self.counters.snapshot())
            .finish()
    }
}

impl<C: Connector> ConnectionGuard<C> {
    /// Create a guard and start its supervisor; no connection is opened yet
    ///
    /// Fails with [`ConnectError::NoRuntime`] outside a tokio runtime.
    pub fn new(connector: C) -> Result<Self, ConnectError> {
        let runtime = Handle::try_current().map_err(|_| ConnectError::NoRuntime)?;
        let connector = Arc::new(connector);
        let counters = Arc::new(Counters::default());
        let (requests, receiver) = mpsc::channel(REQUEST_BUFFER);

        let supervisor = Supervisor {
            connector: connector.clone(),
            counters: counters.clone(),
            current: None,
        };
        runtime.spawn(supervisor.run(receiver));

        Ok(Self {
            requests,
            connector,
            counters,
        })
    }

    /// Return the live connection, connecting first if needed
    pub async fn get_connection(&self) -> Result<C::Connection, ConnectError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Acquire(reply))
            .await
            .map_err(|_| ConnectError::Closed)?;
        response.await.map_err(|_| ConnectError::Closed)?
    }

    /// Report `conn` as broken so the next request replaces it
    ///
    /// Only the given connection is affected. If it has already been
    /// replaced, the current connection is left alone.
    pub fn invalidate(&self, conn: &C::Connection) {
        conn.mark_disconnected();
        debug!("Connection invalidated by caller");
    }

    /// Stop the supervisor and release the connection
    pub async fn shutdown(&self) {
        let (reply, done) = oneshot::channel();
        if self.requests.send(Request::Shutdown(reply)).await.is_ok() {
            let _ = done.await;
        }
    }

    /// The connector used to open connections
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Snapshot of the connect counters
    pub fn stats(&self) -> GuardStats {
        self.counters.snapshot()
    }
}

struct Supervisor<C: Connector> {
    connector: Arc<C>,
    counters: Arc<Counters>,
    current: Option<C::Connection>,
}

impl<C: Connector> Supervisor<C> {
    async fn run(mut self, mut receiver: mpsc::Receiver<Request<C::Connection>>) {
        while let Some(request) = receiver.recv().await {
            match request {
                Request::Acquire(reply) => {
                    let result = self.acquire().await;
                    // The caller may have given up waiting
                    let _ = reply.send(result);
                }
                Request::Shutdown(reply) => {
                    self.release();
                    receiver.close();
                    let _ = reply.send(());
                    info!("Connection guard shut down");
                    return;
                }
            }
        }
        self.release();
        debug!("Connection guard supervisor exiting");
    }

    async fn acquire(&mut self) -> Result<C::Connection, ConnectError> {
        if let Some(conn) = &self.current {
            if conn.is_connected() {
                return Ok(conn.clone());
            }
            warn!("Redis connection reported disconnected, reconnecting");
        }
        self.release();

        self.counters
            .connect_attempts
            .fetch_add(1, Ordering::Relaxed);
        match self.connector.connect().await {
            Ok(conn) => {
                self.counters.connects.fetch_add(1, Ordering::Relaxed);
                info!("Redis connection established");
                self.current = Some(conn.clone());
                Ok(conn)
            }
            Err(e) => {
                self.counters
                    .connect_failures
                    .fetch_add(1, Ordering::Relaxed);
                error!("Failed to connect to Redis: {}", e);
                Err(e)
            }
        }
    }

    fn release(&mut self) {
        if let Some(stale) = self.current.take() {
            stale.close();
            self.counters.releases.fetch_add(1, Ordering::Relaxed);
            debug!("Released Redis connection");
        }
    }
}

//! Redis connector and connection handle
//!
//! `RedisConnector` opens multiplexed tokio connections from static settings.
//! `RedisHandle` wraps one such connection with a shared liveness flag that is
//! cleared as soon as a command fails at the transport level, which is how the
//! guard learns it has to reconnect.

use super::guard::{ConnectError, Connector, ManagedConnection};
use crate::config::RedisSettings;
use async_trait::async_trait;
use redis::aio::{ConnectionLike, MultiplexedConnection};
use redis::{Client, Cmd, Pipeline, RedisFuture, RedisResult, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Opens connections using fixed settings
#[derive(Debug, Clone)]
pub struct RedisConnector {
    client: Client,
    settings: RedisSettings,
}

impl RedisConnector {
    /// Create a connector; nothing is dialed until `connect`
    pub fn new(settings: &RedisSettings) -> Result<Self, ConnectError> {
        let client = Client::open(settings.connection_info())?;
        Ok(Self {
            client,
            settings: settings.clone(),
        })
    }

    /// Underlying client, used for dedicated pub/sub connections
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Settings this connector dials with
    pub fn settings(&self) -> &RedisSettings {
        &self.settings
    }

    /// Dial and announce the client name; the caller bounds this with the connect timeout
    async fn open(&self) -> RedisResult<MultiplexedConnection> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        if let Some(name) = &self.settings.client_name {
            debug!("Setting Redis client name to {}", name);
            let _: () = redis::cmd("CLIENT")
                .arg("SETNAME")
                .arg(name)
                .query_async(&mut conn)
                .await?;
        }

        Ok(conn)
    }
}

#[async_trait]
impl Connector for RedisConnector {
    type Connection = RedisHandle;

    async fn connect(&self) -> Result<RedisHandle, ConnectError> {
        info!("Connecting to Redis at {}", self.settings.sanitized_url());

        let timeout = self.settings.connect_timeout();
        let conn = tokio::time::timeout(timeout, self.open())
            .await
            .map_err(|_| ConnectError::Timeout(timeout))??;

        Ok(RedisHandle::new(conn))
    }
}

/// A multiplexed connection plus its liveness flag
///
/// Clones share both the socket and the flag.
#[derive(Clone)]
pub struct RedisHandle {
    conn: MultiplexedConnection,
    alive: Arc<AtomicBool>,
}

impl std::fmt::Debug for RedisHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisHandle")
            .field("db", &self.conn.get_db())
            .field("alive", &self.is_connected())
            .finish()
    }
}

impl RedisHandle {
    pub(crate) fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    fn track<T>(&self, result: &RedisResult<T>) {
        if let Err(e) = result {
            if is_transport_error(e) {
                self.mark_disconnected();
            }
        }
    }
}

/// Errors after which the connection should not be reused
pub(crate) fn is_transport_error(e: &redis::RedisError) -> bool {
    e.is_io_error() || e.is_connection_dropped() || e.is_timeout()
}

impl ManagedConnection for RedisHandle {
    fn is_connected(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn mark_disconnected(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            warn!("Redis connection marked as disconnected");
        }
    }

    fn close(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

impl ConnectionLike for RedisHandle {
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        Box::pin(async move {
            let result = self.conn.req_packed_command(cmd).await;
            self.track(&result);
            result
        })
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        cmd: &'a Pipeline,
        offset: usize,
        count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        Box::pin(async move {
            let result = self.conn.req_packed_commands(cmd, offset, count).await;
            self.track(&result);
            result
        })
    }

    fn get_db(&self) -> i64 {
        self.conn.get_db()
    }
}

//! Key-value store client module
//!
//! Opens a short-lived connection per operation, runs a single command and
//! explicitly closes the socket on both the success and error paths.
//! Connection failures are distinguishable from an absent key.

mod connection;
mod protocol;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::StoreConfig;
use connection::RespConnection;

pub use protocol::{Reply, encode_command, read_reply};

/// Store client error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection establishment failure (refused, unreachable, timed out)
    #[error("store connection failed: {0}")]
    Connect(String),

    /// IO failure on an established connection
    #[error("store IO error")]
    Io(#[from] std::io::Error),

    /// Malformed or unexpected wire data
    #[error("store protocol error: {0}")]
    Protocol(String),

    /// The store rejected a command
    #[error("store rejected command: {0}")]
    Command(String),
}

/// Minimal key-value surface the request handlers depend on
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the serialized value under `key`, `None` when absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a serialized value under `key` with an optional expiry
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), StoreError>;
}

/// Redis-backed store client, one connection per operation
pub struct RedisStore {
    config: StoreConfig,
}

impl RedisStore {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = RespConnection::connect(&self.config).await?;
        let result = conn.get(key).await;
        conn.close().await;
        result
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), StoreError> {
        let mut conn = RespConnection::connect(&self.config).await?;
        let result = conn.set(key, value, ttl_seconds).await;
        conn.close().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_display() {
        let err = StoreError::Connect("connection to 127.0.0.1:6379 timed out".to_string());
        assert_eq!(
            err.to_string(),
            "store connection failed: connection to 127.0.0.1:6379 timed out"
        );
    }

    #[test]
    fn test_command_error_display() {
        let err = StoreError::Command("ERR invalid password".to_string());
        assert_eq!(err.to_string(), "store rejected command: ERR invalid password");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }
}

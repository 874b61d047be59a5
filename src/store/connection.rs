// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Low-level store connection handling
//!
//! A connection lives for a single command: connect, optionally AUTH, issue
//! the command, shut the socket down. Nothing is pooled or reused.

use std::time::Duration;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::StoreError;
use super::protocol::{Reply, encode_command, read_reply};
use crate::config::StoreConfig;

/// Connection timeout (5 seconds)
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// A single short-lived connection to the key-value store
pub(super) struct RespConnection {
    stream: BufReader<TcpStream>,
}

impl RespConnection {
    pub(super) async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        tracing::trace!("Attempting TCP connection to {}", config.addr);
        let stream = timeout(CONNECTION_TIMEOUT, TcpStream::connect(&config.addr))
            .await
            .map_err(|_| StoreError::Connect(format!("connection to {} timed out", config.addr)))?
            .map_err(|e| StoreError::Connect(format!("connection to {} failed: {e}", config.addr)))?;
        tracing::trace!("TCP connection established to {}", config.addr);

        let mut conn = Self {
            stream: BufReader::new(stream),
        };
        if let Some(password) = &config.password {
            conn.auth(password).await?;
        }
        Ok(conn)
    }

    async fn auth(&mut self, password: &str) -> Result<(), StoreError> {
        tracing::trace!("Authenticating against the store");
        match self.command(&["AUTH", password]).await? {
            Reply::Simple(s) if s == "OK" => Ok(()),
            other => Err(StoreError::Protocol(format!(
                "unexpected reply to AUTH: {other:?}"
            ))),
        }
    }

    pub(super) async fn get(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        match self.command(&["GET", key]).await? {
            Reply::Bulk(value) => Ok(Some(value)),
            Reply::Null => Ok(None),
            other => Err(StoreError::Protocol(format!(
                "unexpected reply to GET: {other:?}"
            ))),
        }
    }

    pub(super) async fn set(
        &mut self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), StoreError> {
        let expiry;
        let mut args = vec!["SET", key, value];
        if let Some(seconds) = ttl_seconds {
            expiry = seconds.to_string();
            args.push("EX");
            args.push(&expiry);
        }

        match self.command(&args).await? {
            Reply::Simple(s) if s == "OK" => Ok(()),
            other => Err(StoreError::Protocol(format!(
                "unexpected reply to SET: {other:?}"
            ))),
        }
    }

    async fn command(&mut self, args: &[&str]) -> Result<Reply, StoreError> {
        self.stream.get_mut().write_all(&encode_command(args)).await?;
        read_reply(&mut self.stream).await
    }

    /// Closes the connection, ignoring shutdown errors
    pub(super) async fn close(mut self) {
        if let Err(e) = self.stream.get_mut().shutdown().await {
            tracing::trace!("Error closing store connection: {}", e);
        }
    }
}

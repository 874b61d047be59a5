// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # Vitals Bridge
//!
//! HTTP bridge between a wearable telemetry source and a Redis-compatible
//! key-value cache.
//!
//! A device or companion app pushes heart rate and location readings; a
//! dashboard polls the latest values. The cache holds one value per metric,
//! overwritten on every push and optionally expiring after a configured TTL.
//!
//! ## Main modules
//! - `api`: HTTP API handlers and request gating
//! - `config`: configuration management
//! - `error`: error types
//! - `store`: key-value store client
//! - `telemetry`: reading types and range validation
//! - `prelude`: commonly used types and traits

mod api;
mod config;
mod error;
mod store;
mod telemetry;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{Config, StoreConfig};

/// Application error and result type
pub use error::{AppError, Result};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// Key-value store client surface
pub use store::{KvStore, RedisStore, StoreError};

/// Telemetry reading types and keys
pub use telemetry::{HEART_RATE_KEY, IngestPayload, LOCATION_KEY, Location, ValidationError};

/// RESP wire protocol helpers (public for tests)
pub use store::{Reply, encode_command, read_reply};

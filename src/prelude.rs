// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for convenient use.
//! Users of the library can import everything they need with:
//!
//! ```rust
//! use vitals_bridge::prelude::*;
//! ```

// Core types
pub use crate::config::{Config, StoreConfig};
pub use crate::error::{AppError, Result};

// HTTP API
pub use crate::api::{AppState, create_router};

// Store client
pub use crate::store::{KvStore, RedisStore, StoreError};

// Telemetry readings
pub use crate::telemetry::{
    HEART_RATE_KEY, IngestPayload, LOCATION_KEY, Location, ValidationError,
};

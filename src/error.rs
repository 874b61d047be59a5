//! Error types for the vitals bridge application

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Key-value store error
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;

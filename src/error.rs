//! Error types for vspark
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using VsparkError
pub type Result<T> = std::result::Result<T, VsparkError>;

/// Unified error type for vspark operations
#[derive(Debug, Error)]
pub enum VsparkError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Could not resolve device address {addr}: {reason}")]
    AddressResolution { addr: String, reason: String },

    #[error("Could not connect to {addr}: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("Read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("Timed out after {timeout_ms} ms waiting for {expected} bytes")]
    Timeout { timeout_ms: u64, expected: usize },

    #[error("Connection is out of sync after an earlier failure; reconnect")]
    Desynced,

    // -------------------------------------------------------------------------
    // Pin Errors
    // -------------------------------------------------------------------------
    #[error("Unknown pin: {0}")]
    UnknownPin(String),

    #[error("{operation} is not available on {pin}")]
    UnavailablePin { operation: String, pin: String },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol decode error: {0}")]
    ProtocolDecode(String),

    #[error("Mode {mode} is not supported by the {profile} protocol profile")]
    UnsupportedMode { mode: String, profile: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl VsparkError {
    /// Shorthand for an `UnavailablePin` error
    pub(crate) fn unavailable(operation: impl Into<String>, pin: impl Into<String>) -> Self {
        Self::UnavailablePin {
            operation: operation.into(),
            pin: pin.into(),
        }
    }
}

//! Error types for the uniauth client
//!
//! Codec failures are split by direction ([`EncodeError`], [`DecodeError`]);
//! [`UniauthError`] unifies them with transport and configuration failures.

use thiserror::Error;

/// Result type alias using UniauthError
pub type Result<T> = std::result::Result<T, UniauthError>;

/// Failure to build a message. No bytes are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field {0} is not a valid integer")]
    InvalidInteger(&'static str),

    /// A string value contains a NUL byte, which would end the field early.
    #[error("field {0} contains an embedded NUL byte")]
    EmbeddedNul(&'static str),

    #[error("unknown field tag: 0x{0:02x}")]
    UnknownTag(u8),

    /// A value whose variant differs from the kind its tag is declared with.
    #[error("field {0} carries a value of the wrong kind")]
    KindMismatch(&'static str),
}

/// Failure to parse a received message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty message")]
    Empty,

    #[error("unknown response kind: 0x{0:02x}")]
    UnknownKind(u8),

    #[error("unknown command selector: 0x{0:02x}")]
    UnknownCommand(u8),

    #[error("unknown field tag: 0x{0:02x}")]
    UnknownTag(u8),

    #[error("message truncated")]
    Truncated,

    #[error("invalid UTF-8 text")]
    InvalidText,
}

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum UniauthError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Network error: {0}")]
    Network(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

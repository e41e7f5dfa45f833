//! # uniauth
//!
//! Wire protocol codec and diagnostic client for the uniauth session service:
//! - Tagged-field binary request encoding
//! - Response decoding (message, error, record)
//! - One shared field table for both directions
//! - Blocking TCP client, one exchange at a time
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  CLI / calling code                         │
//! │           (command name + field mapping)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Client                                 │
//! │              (send one, receive one)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Codec     │          │  Transport  │
//!   │ (pure fns)  │          │   (TCP)     │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │ Field Table │
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DecodeError, EncodeError, Result, UniauthError};
pub use config::Config;
pub use network::Client;
pub use protocol::{decode_response, encode_request, Fields, Response};

// =============================================================================
// Version Info
// =============================================================================

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

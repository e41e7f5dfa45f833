//! Network Module
//!
//! TCP client handling.
//!
//! ## Architecture
//! - [`Transport`] is the send/receive seam; [`TcpTransport`] implements it
//! - [`Client`] pairs a transport with the protocol codec

mod transport;
mod client;

pub use transport::{TcpTransport, Transport};
pub use client::Client;

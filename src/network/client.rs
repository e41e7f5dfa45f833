//! Client
//!
//! Runs request/response exchanges against a uniauth service, strictly one
//! at a time.

use std::io;

use crate::config::Config;
use crate::error::{Result, UniauthError};
use crate::protocol::{decode_response, encode_request, Fields, Response};
use super::transport::{TcpTransport, Transport};

/// A uniauth client over some transport
pub struct Client<T: Transport = TcpTransport> {
    transport: T,

    /// Upper bound on a single response read
    recv_buffer_size: usize,
}

impl Client<TcpTransport> {
    /// Connect to the service named in `config`
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        tracing::debug!("Connecting to {}", config.server_addr);
        let transport = TcpTransport::connect(config)?;
        tracing::debug!("Connected to {}", transport.peer_addr());

        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> Client<T> {
    /// Create a client over an existing transport
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            recv_buffer_size: config.recv_buffer_size,
        }
    }

    /// Encode, send, and decode one command
    ///
    /// If encoding fails nothing is sent. A service-side refusal comes back
    /// as `Ok(Response::Error(..))`; only transport and decode failures are
    /// `Err`.
    pub fn execute(&mut self, command: &str, fields: &Fields) -> Result<Response> {
        for name in fields.unknown_names() {
            tracing::debug!("Ignoring unknown field {:?}", name);
        }

        let request = encode_request(command, fields)?;
        let reply = self.exchange(&request)?;

        match decode_response(&reply) {
            Ok(response) => {
                tracing::trace!("Decoded response from {}: {:?}", self.peer_addr(), response);
                Ok(response)
            }
            Err(e) => {
                tracing::warn!("Malformed response from {}: {}", self.peer_addr(), e);
                Err(e.into())
            }
        }
    }

    /// Send raw request bytes and read one raw response
    pub fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        tracing::debug!("SEND {} bytes to {}", request.len(), self.peer_addr());
        tracing::trace!("SEND {:02x?}", request);

        if let Err(e) = self.transport.send(request) {
            return Err(self.classify_io(e));
        }

        let reply = match self.transport.receive(self.recv_buffer_size) {
            Ok(reply) => reply,
            Err(e) => return Err(self.classify_io(e)),
        };

        if reply.is_empty() {
            return Err(UniauthError::Network(format!(
                "connection closed by {}",
                self.peer_addr()
            )));
        }

        tracing::debug!("RECV {} bytes from {}", reply.len(), self.peer_addr());
        tracing::trace!("RECV {:02x?}", reply);

        Ok(reply)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        self.transport.peer_addr()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Turn connection-level I/O failures into network errors
    fn classify_io(&self, e: io::Error) -> UniauthError {
        match e.kind() {
            // Windows reports read timeouts as TimedOut instead of WouldBlock
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                UniauthError::Network(format!("timed out talking to {}", self.peer_addr()))
            }
            io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => {
                UniauthError::Network(format!("connection to {} lost: {}", self.peer_addr(), e))
            }
            _ => UniauthError::Io(e),
        }
    }
}

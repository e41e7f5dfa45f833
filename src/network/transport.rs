//! Transport
//!
//! Byte-stream duplex used by the client. One send, then one receive.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::Config;
use crate::error::Result;

/// The operations the client needs from a connection
pub trait Transport {
    /// Write the whole buffer
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read whatever is available, at most `max` bytes
    ///
    /// An empty result means the peer closed the connection.
    fn receive(&mut self, max: usize) -> io::Result<Vec<u8>>;

    /// Peer description for logging
    fn peer_addr(&self) -> &str {
        "unknown"
    }
}

/// TCP transport to a uniauth service
pub struct TcpTransport {
    stream: TcpStream,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    /// Connect and configure the stream from `config`
    pub fn connect(config: &Config) -> Result<Self> {
        let stream = TcpStream::connect(&config.server_addr)?;
        Self::from_stream(stream, config)
    }

    /// Wrap an already connected stream
    ///
    /// Disables Nagle's algorithm and applies the configured timeouts.
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(true)?;

        let mut transport = Self { stream, peer_addr };
        transport.set_timeouts(config.read_timeout_ms, config.write_timeout_ms)?;
        Ok(transport)
    }

    /// Configure socket timeouts, 0 leaves a direction blocking
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read = (read_ms > 0).then(|| Duration::from_millis(read_ms));
        let write = (write_ms > 0).then(|| Duration::from_millis(write_ms));

        self.stream.set_read_timeout(read)?;
        self.stream.set_write_timeout(write)?;
        Ok(())
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes)?;
        self.stream.flush()
    }

    fn receive(&mut self, max: usize) -> io::Result<Vec<u8>> {
        let mut buf = vec![0u8; max];
        let n = self.stream.read(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

//! Connection Handle
//!
//! Owns the single TCP stream to a device.

use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};

use crate::config::Config;
use crate::error::{Result, VsparkError};
use super::Transport;

/// A blocking connection to one device
///
/// One stream, used serially. There is no reconnect: once an I/O error is
/// returned the caller decides whether to drop the handle and dial again.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Read deadline, reported in timeout errors
    read_timeout_ms: u64,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Resolve `addr` and dial it
    ///
    /// IPv4 addresses are tried before IPv6 ones. Fails with
    /// `AddressResolution` if nothing resolves and `Connection` if every
    /// candidate refuses.
    pub fn connect(addr: &str, config: &Config) -> Result<Self> {
        let mut candidates: Vec<SocketAddr> = addr
            .to_socket_addrs()
            .map_err(|e| VsparkError::AddressResolution {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?
            .collect();

        if candidates.is_empty() {
            return Err(VsparkError::AddressResolution {
                addr: addr.to_string(),
                reason: "no addresses found".to_string(),
            });
        }
        candidates.sort_by_key(|candidate| !candidate.is_ipv4());

        let mut last_err = None;
        for candidate in candidates {
            tracing::debug!("Dialing {} ({})", addr, candidate);
            let dialed = match config.connect_timeout() {
                Some(timeout) => TcpStream::connect_timeout(&candidate, timeout),
                None => TcpStream::connect(candidate),
            };
            match dialed {
                Ok(stream) => return Self::from_stream(stream, config),
                Err(e) => {
                    tracing::debug!("Dial {} failed: {}", candidate, e);
                    last_err = Some(e);
                }
            }
        }

        Err(VsparkError::Connection {
            addr: addr.to_string(),
            source: last_err.unwrap_or_else(|| ErrorKind::NotConnected.into()),
        })
    }

    /// Wrap an already-connected stream
    ///
    /// Sets up buffered I/O and configures timeouts
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let setup = |e: std::io::Error| VsparkError::Connection {
            addr: peer_addr.clone(),
            source: e,
        };

        stream.set_nodelay(config.nodelay).map_err(setup)?;
        stream.set_read_timeout(config.read_timeout()).map_err(setup)?;
        stream.set_write_timeout(config.write_timeout()).map_err(setup)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone().map_err(setup)?;

        tracing::info!("Connected to device at {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(stream),
            read_timeout_ms: config.read_timeout_ms,
            peer_addr,
        })
    }

    /// Write all bytes and flush
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        tracing::trace!("-> {}: {:02x?}", self.peer_addr, bytes);
        self.writer.write_all(bytes).map_err(VsparkError::Write)?;
        self.writer.flush().map_err(VsparkError::Write)?;
        Ok(())
    }

    /// Block until exactly `n` bytes arrive
    ///
    /// A deadline expiry is reported as `Timeout`; EOF before `n` bytes is a
    /// `Read` error. After a timeout the stream position is unspecified.
    pub fn read_exactly(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        self.reader.read_exact(&mut buf).map_err(|e| match e.kind() {
            // Unix reports WouldBlock on timeout, Windows TimedOut
            ErrorKind::WouldBlock | ErrorKind::TimedOut => VsparkError::Timeout {
                timeout_ms: self.read_timeout_ms,
                expected: n,
            },
            _ => VsparkError::Read(e),
        })?;
        tracing::trace!("<- {}: {:02x?}", self.peer_addr, buf);
        Ok(buf)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Transport for Connection {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        Connection::write(self, bytes)
    }

    fn read_exactly(&mut self, n: usize) -> Result<Vec<u8>> {
        Connection::read_exactly(self, n)
    }
}

//! Byte streams to the relay host.
//!
//! [`RelayStream`] is the seam between the HTTP client and the
//! transport: plain TCP in [`TcpRelayStream`], TLS-wrapped behind the
//! `tls-rustls` feature, or a test double.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use yafe_types::error::{Result, YafeError};

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const IO_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking byte stream. A read of zero bytes means the peer closed.
pub trait RelayStream: Send {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;
    /// Best-effort shutdown. Errors here are not interesting.
    fn close(&mut self);
}

/// Wraps a connected stream in TLS.
pub trait TlsProvider: Send + Sync {
    fn wrap(
        &self,
        stream: Box<dyn RelayStream>,
        server_name: &str,
    ) -> Result<Box<dyn RelayStream>>;
}

/// Plain TCP transport with connect and I/O timeouts.
pub struct TcpRelayStream {
    inner: TcpStream,
}

impl TcpRelayStream {
    /// Resolve `host` and connect to the first address that answers.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let mut last_err = None;
        for addr in (host, port).to_socket_addrs()? {
            match TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT) {
                Ok(stream) => {
                    stream.set_read_timeout(Some(IO_TIMEOUT))?;
                    stream.set_write_timeout(Some(IO_TIMEOUT))?;
                    return Ok(TcpRelayStream { inner: stream });
                },
                Err(err) => last_err = Some(err),
            }
        }
        Err(match last_err {
            Some(err) => YafeError::Io(err),
            None => YafeError::Relay(format!("no addresses for {host}:{port}")),
        })
    }
}

impl RelayStream for TcpRelayStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.inner.read(buf)?)
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        Ok(self.inner.write_all(buf)?)
    }

    fn close(&mut self) {
        let _ = self.inner.shutdown(Shutdown::Both);
    }
}

//! TLS transport via rustls, behind the `tls-rustls` feature.
//!
//! Certificate validation uses the bundled webpki root store, so the
//! relay works without touching the platform trust store.

use std::io::{Read, Write};
use std::sync::Arc;

use rustls::{ClientConfig, ClientConnection, RootCertStore};
use rustls_pki_types::ServerName;

use yafe_types::error::{Result, YafeError};

use crate::stream::{RelayStream, TlsProvider};

pub struct RustlsTlsProvider {
    config: Arc<ClientConfig>,
}

impl RustlsTlsProvider {
    pub fn new() -> Self {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();
        RustlsTlsProvider {
            config: Arc::new(config),
        }
    }
}

impl Default for RustlsTlsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TlsProvider for RustlsTlsProvider {
    fn wrap(
        &self,
        stream: Box<dyn RelayStream>,
        server_name: &str,
    ) -> Result<Box<dyn RelayStream>> {
        let name = ServerName::try_from(server_name.to_string())
            .map_err(|_| YafeError::Relay(format!("invalid server name: {server_name}")))?;
        let conn = ClientConnection::new(Arc::clone(&self.config), name)
            .map_err(|err| YafeError::Relay(format!("tls setup failed: {err}")))?;
        let mut tls = TlsStream {
            conn,
            inner: stream,
        };
        tls.handshake()?;
        Ok(Box::new(tls))
    }
}

struct TlsStream {
    conn: ClientConnection,
    inner: Box<dyn RelayStream>,
}

impl TlsStream {
    /// Drive the handshake to completion so certificate problems
    /// surface before any request bytes are written.
    fn handshake(&mut self) -> Result<()> {
        let mut shim = IoShim {
            inner: &mut *self.inner,
        };
        while self.conn.is_handshaking() {
            self.conn.complete_io(&mut shim)?;
        }
        Ok(())
    }
}

impl RelayStream for TlsStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut shim = IoShim {
            inner: &mut *self.inner,
        };
        let mut tls = rustls::Stream::new(&mut self.conn, &mut shim);
        match tls.read(buf) {
            Ok(n) => Ok(n),
            // Peers that skip close_notify look like a truncated stream.
            // The HTTP layer length-checks the body anyway.
            Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => Ok(0),
            Err(err) => Err(YafeError::Io(err)),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        let mut shim = IoShim {
            inner: &mut *self.inner,
        };
        let mut tls = rustls::Stream::new(&mut self.conn, &mut shim);
        tls.write_all(buf)?;
        tls.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        self.conn.send_close_notify();
        let mut shim = IoShim {
            inner: &mut *self.inner,
        };
        let _ = self.conn.complete_io(&mut shim);
        self.inner.close();
    }
}

/// Adapts a [`RelayStream`] to the `io` traits rustls drives.
struct IoShim<'a> {
    inner: &'a mut dyn RelayStream,
}

impl Read for IoShim<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf).map_err(std::io::Error::other)
    }
}

impl Write for IoShim<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner
            .write_all(buf)
            .map(|()| buf.len())
            .map_err(std::io::Error::other)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DeadStream;

    impl RelayStream for DeadStream {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
            Ok(0)
        }

        fn write_all(&mut self, _buf: &[u8]) -> Result<()> {
            Ok(())
        }

        fn close(&mut self) {}
    }

    #[test]
    fn rejects_invalid_server_names() {
        let provider = RustlsTlsProvider::new();
        let result = provider.wrap(Box::new(DeadStream), "not a hostname!!");
        assert!(matches!(result, Err(YafeError::Relay(_))));
    }

    #[test]
    fn handshake_against_a_dead_peer_fails_cleanly() {
        let provider = RustlsTlsProvider::new();
        // The peer answers nothing; the handshake must error, not hang.
        let result = provider.wrap(Box::new(DeadStream), "api.emailjs.com");
        assert!(result.is_err());
    }
}

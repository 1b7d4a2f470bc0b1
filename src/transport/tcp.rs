use std::fmt;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};

use crate::config::Config;
use crate::Error;

use super::{Buffers, ConnectionDetails, Connector, LazyBuffers, Transport};

#[derive(Default)]
/// Connector for regular TCP sockets.
pub struct TcpConnector(());

impl Connector for TcpConnector {
    fn connect(&self, details: &ConnectionDetails) -> Result<Box<dyn Transport>, Error> {
        let config = details.config;
        let stream = try_connect(details.addrs, config)?;

        let buffers = LazyBuffers::new(config.input_buffer_size, config.output_buffer_size);
        let transport = TcpTransport::new(stream, buffers);

        Ok(Box::new(transport))
    }
}

fn try_connect(addrs: &[SocketAddr], config: &Config) -> Result<TcpStream, Error> {
    let mut last_err = None;

    for addr in addrs {
        match try_connect_single(*addr, config) {
            // First that connects
            Ok(v) => return Ok(v),
            // Intercept ConnectionRefused to try next addrs
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::ConnectionRefused => {
                trace!("{} connection refused", addr);
                last_err = Some(e);
                continue;
            }
            // Other errors bail
            Err(e) => return Err(e),
        }
    }

    debug!("Failed to connect to any resolved address");
    Err(match last_err {
        Some(e) => Error::Io(e),
        None => Error::ConnectionFailed,
    })
}

fn try_connect_single(addr: SocketAddr, config: &Config) -> Result<TcpStream, Error> {
    trace!("Try connect TcpStream to {}", addr);

    let stream = TcpStream::connect(addr)?;

    if config.no_delay {
        stream.set_nodelay(true)?;
    }

    debug!("Connected TcpStream to {}", addr);

    Ok(stream)
}

/// A [`Transport`] over a [`TcpStream`].
///
/// The socket is closed when this is dropped.
pub struct TcpTransport {
    stream: TcpStream,
    buffers: LazyBuffers,
}

impl TcpTransport {
    /// Wrap a connected stream.
    pub fn new(stream: TcpStream, buffers: LazyBuffers) -> TcpTransport {
        TcpTransport { stream, buffers }
    }
}

impl Transport for TcpTransport {
    fn buffers(&mut self) -> &mut dyn Buffers {
        &mut self.buffers
    }

    fn transmit_output(&mut self, amount: usize) -> Result<(), Error> {
        let output = &self.buffers.output()[..amount];
        self.stream.write_all(output)?;

        Ok(())
    }

    fn await_input(&mut self) -> Result<bool, Error> {
        let input = self.buffers.input_append_buf();
        let amount = self.stream.read(input)?;
        self.buffers.input_appended(amount);

        Ok(amount > 0)
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        trace!("Close {:?}", self);
    }
}

impl fmt::Debug for TcpConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcpConnector").finish()
    }
}

impl fmt::Debug for TcpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcpTransport")
            .field("addr", &self.stream.peer_addr().ok())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn refused_is_io_error() {
        // Bind and drop to find a port nobody listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let err = try_connect(&[addr], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Io(e) if e.kind() == io::ErrorKind::ConnectionRefused));
    }

    #[test]
    fn no_addrs_is_connection_failed() {
        let err = try_connect(&[], &Config::default()).unwrap_err();
        assert!(matches!(err, Error::ConnectionFailed));
    }

    #[test]
    fn reads_until_remote_close() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = std::thread::spawn(move || {
            let (mut client, _) = listener.accept().unwrap();
            client.write_all(b"hello").unwrap();
        });

        let stream = try_connect(&[addr], &Config::default()).unwrap();
        let mut transport = TcpTransport::new(stream, LazyBuffers::new(64, 64));
        server.join().unwrap();

        let mut got = Vec::new();
        while transport.await_input().unwrap() {
            let input = transport.buffers().input();
            got.extend_from_slice(input);
            let n = input.len();
            transport.buffers().input_consume(n);
        }
        assert_eq!(got, b"hello");
    }
}

//! HTTP/1.1 data transport.
//!
//! The transport layer is pluggable. [`Fetcher::with_parts()`](crate::Fetcher::with_parts)
//! takes an implementation of the [`Connector`] trait which is used to open the one
//! connection a fetch needs. The default is [`TcpConnector`], a plain TCP socket.
//!
//! A [`Transport`] is the open connection. It is owned by exactly one
//! [`Response`](crate::http::Response) at a time, and closed when that owner drops it.

use std::fmt::Debug;
use std::net::SocketAddr;

use http::Uri;

use crate::config::Config;
use crate::http;
use crate::Error;

mod buf;
pub use buf::{Buffers, LazyBuffers};

mod tcp;
pub use self::tcp::{TcpConnector, TcpTransport};


/// Trait for components opening a connection.
///
/// A connector instance could be used to produce multiple [`Transport`] instances, but
/// the [`Fetcher`](crate::Fetcher) only ever asks for one per fetch.
///
/// # Errors
///
/// When writing a bespoke connector we recommend handling errors like this:
///
/// 1. Map to [`Error::Io`] as far as possible.
/// 2. As a last resort [`Error::ConnectionFailed`] + logging.
pub trait Connector: Debug + Send + Sync + 'static {
    /// Use this connector to make a [`Transport`].
    fn connect(&self, details: &ConnectionDetails) -> Result<Box<dyn Transport>, Error>;
}

/// The parameters needed to create a [`Transport`].
#[derive(Debug)]
pub struct ConnectionDetails<'a> {
    /// Full uri that is being requested.
    pub uri: &'a Uri,

    /// The resolved IP addresses + port for the uri. See [`Resolver`](crate::resolver::Resolver).
    ///
    /// Never empty.
    pub addrs: &'a [SocketAddr],

    /// The configuration.
    pub config: &'a Config,
}

/// Transport of HTTP/1.1 as created by a [`Connector`].
///
/// [`Transport`] and [`Buffers`] go hand in hand. The transport is responsible for
/// providing the buffers required to perform the request. Unless the transport requires
/// special buffer handling, the [`LazyBuffers`] implementation can be used.
///
/// For sending data, the order of calls are:
///
/// 1. [`Transport::buffers()`] to obtain the buffers.
/// 2. [`Buffers::output()`] to write the request head.
/// 3. [`Transport::transmit_output()`] to ask the transport to send the `amount` of
///    buffers used in 2.
///
/// For receiving data, the order of calls are:
///
/// 1. [`Transport::maybe_await_input()`]
/// 2. The transport impl itself uses [`Buffers::input_append_buf()`] to fill a number
///    of bytes from the underlying transport and use [`Buffers::input_appended()`] to
///    tell the buffer how much been filled.
/// 3. [`Transport::buffers()`] to obtain the buffers
/// 4. [`Buffers::input()`] followed by [`Buffers::input_consume()`]. It's important to call
///    [`Buffers::input_consume()`] also with 0 consumed bytes since that's how we keep
///    track of whether the input is making progress.
///
/// The underlying connection is released when the transport is dropped.
pub trait Transport: Debug + Send + Sync + 'static {
    /// Provide buffers for this transport.
    fn buffers(&mut self) -> &mut dyn Buffers;

    /// Transmit `amount` of the output buffer. It is expected that the transport will
    /// transmit the entire requested `amount`.
    fn transmit_output(&mut self, amount: usize) -> Result<(), Error>;

    /// Await input from the transport.
    ///
    /// Early returns if [`Buffers::can_use_input()`], return true.
    fn maybe_await_input(&mut self) -> Result<bool, Error> {
        // If we already have input available, we don't wait.
        // This might be false even when there is input in the buffer
        // because the last use of the buffer made no progress.
        if self.buffers().can_use_input() {
            return Ok(true);
        }

        self.await_input()
    }

    /// Wait for input and fill the buffer.
    ///
    /// 1. Use [`Buffers::input_append_buf()`] to fill the buffer
    /// 2. Followed by [`Buffers::input_appended()`] to report how many bytes were read.
    ///
    /// Returns `true` if it made progress, i.e. if it managed to fill the input buffer
    /// with any bytes. `false` means the remote end closed.
    fn await_input(&mut self) -> Result<bool, Error>;
}

use std::fmt;

use http::Uri;

use crate::http;
use crate::transport::{Buffers, Transport};
use crate::util::DebugUri;
use crate::Error;

/// The one open connection of a fetch.
///
/// Owns the [`Transport`]. Dropping the connection releases the transport, which
/// is the only way it is ever released.
pub(crate) struct Connection {
    transport: Box<dyn Transport>,
    uri: Uri,
}

impl Connection {
    pub fn new(transport: Box<dyn Transport>, uri: Uri) -> Self {
        Connection { transport, uri }
    }

    pub fn buffers(&mut self) -> &mut dyn Buffers {
        self.transport.buffers()
    }

    pub fn transmit_output(&mut self, amount: usize) -> Result<(), Error> {
        self.transport.transmit_output(amount)
    }

    pub fn maybe_await_input(&mut self) -> Result<bool, Error> {
        self.transport.maybe_await_input()
    }

    pub fn consume_input(&mut self, amount: usize) {
        self.transport.buffers().input_consume(amount)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        debug!("Close connection: {:?}", DebugUri(&self.uri));
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("uri", &DebugUri(&self.uri))
            .field("transport", &self.transport)
            .finish()
    }
}

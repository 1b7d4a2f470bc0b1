use std::fmt;
use std::io::{self, Read};

use crate::run::BodyHandler;
use crate::Error;

/// A response body returned as [`http::Response<Body>`](crate::http::Response).
///
/// The body owns the connection the response arrived on. The connection is
/// released once the body is fully read, once a read fails, or when the body
/// is dropped. It is never released twice.
///
/// # Example
///
/// ```no_run
/// use httpget::Fetcher;
///
/// let mut res = Fetcher::new().get("http://localhost:8081/")?;
///
/// let bytes: Vec<u8> = res.body_mut().read_to_vec()?;
/// # Ok::<_, httpget::Error>(())
/// ```
pub struct Body {
    handler: BodyHandler,
}

impl Body {
    pub(crate) fn new(handler: BodyHandler) -> Self {
        Body { handler }
    }

    /// Read the entire body into a vector.
    ///
    /// Fails if the connection ends before the body is complete. What complete
    /// means depends on the response framing: the `content-length`, the final
    /// chunk of a chunked body, or the server closing the connection when
    /// neither is present.
    pub fn read_to_vec(&mut self) -> Result<Vec<u8>, Error> {
        let mut body = Vec::new();
        let mut buf = vec![0; 8 * 1024];

        loop {
            let n = self.handler.do_read(&mut buf)?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&buf[..n]);
        }

        Ok(body)
    }

    /// Whether the underlying connection has been released.
    pub fn is_released(&self) -> bool {
        self.handler.is_released()
    }
}

impl io::Read for Body {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.handler.read(buf)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("released", &self.is_released())
            .finish()
    }
}

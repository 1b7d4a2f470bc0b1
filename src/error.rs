use std::{fmt, io};

use crate::http;

/// Errors from performing a GET request and reading its body.
///
/// This is the detailed cause. Callers that only care about which step
/// went wrong should look at [`Failure`].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Errors arising from the `http` crate, typically when building the request.
    Http(http::Error),

    /// The URL could not be parsed, or it is not a full `scheme://host/path` URL.
    BadUri(String),

    /// The URL scheme is not `http`.
    UnsupportedScheme(String),

    /// The host name did not resolve to any address.
    HostNotFound,

    /// No connection could be made to any resolved address.
    ConnectionFailed,

    /// The remote end hung up before the exchange was complete.
    ///
    /// The argument says where in the exchange it happened.
    Disconnected(&'static str),

    /// Reading the body made no progress even though the connection is open.
    BodyStalled,

    /// The response head was larger than the configured max.
    ///
    /// First number is the size seen, second the configured limit.
    LargeResponseHeader(usize, usize),

    /// The HTTP/1.1 state machine rejected the request or the response.
    Protocol(ureq_proto::Error),

    /// Some unspecified socket error.
    Io(io::Error),
}

impl Error {
    /// Convert the error into an [`io::Error`].
    ///
    /// If the error is [`Error::Io`], this unpacks the inner error. Other errors
    /// are wrapped with [`io::ErrorKind::Other`].
    pub fn into_io(self) -> io::Error {
        match self {
            Error::Io(e) => e,
            Error::Disconnected(_) => io::Error::new(io::ErrorKind::UnexpectedEof, self),
            _ => io::Error::new(io::ErrorKind::Other, self),
        }
    }

    pub(crate) fn disconnected(reason: &'static str) -> Error {
        trace!("Disconnected: {}", reason);
        Error::Disconnected(reason)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Protocol(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(v) => write!(f, "http: {}", v),
            Error::BadUri(v) => write!(f, "bad uri: {}", v),
            Error::UnsupportedScheme(v) => write!(f, "unsupported scheme: {}", v),
            Error::HostNotFound => write!(f, "host not found"),
            Error::ConnectionFailed => write!(f, "connection failed"),
            Error::Disconnected(v) => write!(f, "disconnected: {}", v),
            Error::BodyStalled => write!(f, "body data reading stalled"),
            Error::LargeResponseHeader(x, y) => {
                write!(f, "response header is too big: {} > {}", x, y)
            }
            Error::Protocol(v) => write!(f, "protocol: {}", v),
            Error::Io(v) => write!(f, "io: {}", v),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        // Undo into_io() for errors that passed through an io::Read.
        let is_wrapped_ours = e
            .get_ref()
            .map(|x| x.is::<Error>())
            .unwrap_or_default();

        if is_wrapped_ours {
            let ours = e
                .into_inner()
                .and_then(|inner| inner.downcast::<Error>().ok());
            if let Some(ours) = ours {
                return *ours;
            }
            return Error::Disconnected("unwrap io error");
        }

        Error::Io(e)
    }
}

impl From<ureq_proto::Error> for Error {
    fn from(e: ureq_proto::Error) -> Self {
        Error::Protocol(e)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Error::Http(e)
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(e: http::uri::InvalidUri) -> Self {
        Error::BadUri(e.to_string())
    }
}

/// The ways fetching and printing a body can fail.
///
/// All are fatal for the `httpget` binary: the failure is reported and the
/// process exits with a non-zero code. An HTTP error status (404, 500) is not
/// a failure.
#[derive(Debug)]
pub enum Failure {
    /// The request could not be sent, or no response head was received.
    RequestFailed(Error),

    /// The response head arrived, but draining the body failed partway.
    ReadFailed(Error),

    /// The body was read, but writing it to the sink failed.
    PrintFailed(Error),
}

/// Discriminant of [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// See [`Failure::RequestFailed`].
    RequestFailed,
    /// See [`Failure::ReadFailed`].
    ReadFailed,
    /// See [`Failure::PrintFailed`].
    PrintFailed,
}

impl Failure {
    /// Which step failed.
    pub fn kind(&self) -> FailureKind {
        match self {
            Failure::RequestFailed(_) => FailureKind::RequestFailed,
            Failure::ReadFailed(_) => FailureKind::ReadFailed,
            Failure::PrintFailed(_) => FailureKind::PrintFailed,
        }
    }

    /// The underlying cause.
    pub fn cause(&self) -> &Error {
        match self {
            Failure::RequestFailed(e) | Failure::ReadFailed(e) | Failure::PrintFailed(e) => e,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::RequestFailed(e) => write!(f, "request failed: {}", e),
            Failure::ReadFailed(e) => write!(f, "read failed: {}", e),
            Failure::PrintFailed(e) => write!(f, "print failed: {}", e),
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause())
    }
}

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![deny(missing_docs)]
//! Fetch one URL over HTTP/1.1 and print the body.
//!
//! httpget does a single blocking GET, reads the whole response body into
//! memory, and writes it as a text record to a log sink. It is the library
//! behind the `httpget` binary.
//!
//! ## Usage
//!
//! ```no_run
//! let body: Vec<u8> = httpget::fetch("http://localhost:8081/")?;
//! # Ok::<_, httpget::Failure>(())
//! ```
//!
//! Printing the body to stderr, the way the binary does:
//!
//! ```no_run
//! let mut sink = std::io::stderr().lock();
//! httpget::fetch_and_print("http://localhost:8081/", &mut sink)?;
//! # Ok::<_, httpget::Failure>(())
//! ```
//!
//! ## Failures
//!
//! A fetch fails in one of two ways, see [`Failure`]:
//!
//! * [`Failure::RequestFailed`]: the request could not be sent or the response
//!   head was not received. Connection refused, unresolvable host, bad url.
//! * [`Failure::ReadFailed`]: the head arrived but the body could not be read
//!   to its end, for instance because the server hung up early.
//!
//! Printing adds [`Failure::PrintFailed`], for when the sink rejects the write.
//!
//! HTTP status codes are not failures. A `404 Not Found` with a body is a
//! successful fetch of that body.
//!
//! ## Connections
//!
//! Every fetch opens its own connection. The connection is owned by the
//! [`Body`] of the response and is released exactly once: when the body is
//! fully read, when reading it fails, or when it is dropped. There is no
//! pooling, no retry and no timeout.
//!
//! ## Only http
//!
//! URLs must use the `http` scheme. `https` is refused with
//! [`Error::UnsupportedScheme`]. Redirects are not followed; the body of a
//! `3xx` response is returned like any other.

#[macro_use]
extern crate log;

use std::io::Write;

/// Re-exported http-crate.
pub use ureq_proto::http;

pub use body::Body;
pub use config::{Config, DEFAULT_URL};
pub use error::{Error, Failure, FailureKind};
pub use fetcher::Fetcher;
pub use record::write_record;

mod body;
mod config;
mod conn;
mod error;
mod fetcher;
mod record;
mod run;
mod util;

pub mod resolver;
pub mod transport;

/// Fetch `url` with a default [`Fetcher`] and return the whole body.
///
/// ```no_run
/// let body = httpget::fetch("http://localhost:8081/")?;
/// println!("{}", String::from_utf8_lossy(&body));
/// # Ok::<_, httpget::Failure>(())
/// ```
pub fn fetch(url: &str) -> Result<Vec<u8>, Failure> {
    Fetcher::new().fetch(url)
}

/// Fetch `url` with a default [`Fetcher`] and write the body as a record to `sink`.
///
/// See [`Fetcher::fetch_and_print`].
pub fn fetch_and_print(url: &str, sink: &mut impl Write) -> Result<(), Failure> {
    Fetcher::new().fetch_and_print(url, sink)
}

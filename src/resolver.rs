//! Name resolvers.
//!
//! The resolver's duty is to take a URI and translate it to socket addresses
//! (IP + port). The result is handed to the [`Connector`](crate::transport::Connector).
use std::fmt::{self, Debug};
use std::net::{SocketAddr, ToSocketAddrs};

use http::Uri;

use crate::config::Config;
use crate::http;
use crate::util::UriExt;
use crate::Error;

/// Max number of socket addresses to keep from the resolver.
const MAX_ADDRS: usize = 16;

/// Trait for name resolvers.
pub trait Resolver: Debug + Send + Sync + 'static {
    /// Resolve the URI to socket addresses.
    ///
    /// The resolver must guarantee at least one returned address, or error with
    /// `Error::HostNotFound`.
    fn resolve(&self, uri: &Uri, config: &Config) -> Result<Vec<SocketAddr>, Error>;
}

/// Default resolver implementation.
///
/// Uses std::net [`ToSocketAddrs`] to do a blocking lookup.
#[derive(Default)]
pub struct DefaultResolver {
    _private: (),
}

impl Resolver for DefaultResolver {
    fn resolve(&self, uri: &Uri, _config: &Config) -> Result<Vec<SocketAddr>, Error> {
        let (host, port) = uri.host_and_port()?;

        trace!("Resolve: {}:{}", host, port);
        let result: Vec<SocketAddr> = (host, port).to_socket_addrs()?.take(MAX_ADDRS).collect();

        debug!("Resolved: {:?}", result);

        if result.is_empty() {
            Err(Error::HostNotFound)
        } else {
            Ok(result)
        }
    }
}

impl fmt::Debug for DefaultResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultResolver").finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unknown_scheme() {
        let uri: Uri = "foo://some:42/123".parse().unwrap();
        let config = Config::default();
        let err = DefaultResolver::default()
            .resolve(&uri, &config)
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedScheme(_)));
        assert_eq!(err.to_string(), "unsupported scheme: foo");
    }

    #[test]
    fn ip_literal() {
        let uri: Uri = "http://127.0.0.1:8081/".parse().unwrap();
        let config = Config::default();
        let addrs = DefaultResolver::default().resolve(&uri, &config).unwrap();
        assert_eq!(addrs, vec!["127.0.0.1:8081".parse::<SocketAddr>().unwrap()]);
    }
}

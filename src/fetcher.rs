use std::io::Write;
use std::sync::Arc;

use http::{Response, Uri};

use crate::body::Body;
use crate::config::Config;
use crate::http;
use crate::record::write_record;
use crate::resolver::{DefaultResolver, Resolver};
use crate::transport::{Connector, TcpConnector};
use crate::{Error, Failure};

/// Performs blocking GET requests.
///
/// A fetcher holds no state between requests. Every call opens a fresh
/// connection, and the connection is released before the call's result is
/// gone. Cloning is cheap.
///
/// ```no_run
/// use httpget::Fetcher;
///
/// let fetcher = Fetcher::new();
/// let body: Vec<u8> = fetcher.fetch("http://localhost:8081/")?;
/// # Ok::<_, httpget::Failure>(())
/// ```
#[derive(Debug, Clone)]
pub struct Fetcher {
    config: Arc<Config>,
    pub(crate) connector: Arc<dyn Connector>,
    pub(crate) resolver: Arc<dyn Resolver>,
}

impl Fetcher {
    /// Creates a fetcher with defaults.
    pub fn new() -> Self {
        Self::new_with_config(Config::default())
    }

    /// Creates a fetcher with config.
    pub fn new_with_config(config: Config) -> Self {
        Self::with_parts(config, TcpConnector::default(), DefaultResolver::default())
    }

    /// Creates a fetcher with a bespoke transport and resolver.
    pub fn with_parts(
        config: Config,
        connector: impl Connector,
        resolver: impl Resolver,
    ) -> Self {
        Fetcher {
            config: Arc::new(config),
            connector: Arc::new(connector),
            resolver: Arc::new(resolver),
        }
    }

    /// The config of this fetcher.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Send a GET request and receive the response head.
    ///
    /// Any status code counts as a response. The body is not read; it is left
    /// in the returned [`Body`] which owns the connection.
    pub fn get(&self, url: &str) -> Result<Response<Body>, Error> {
        let uri: Uri = url.parse()?;
        crate::run::run(self, uri)
    }

    /// Send a GET request and read the whole response body.
    ///
    /// Errors before the response head is complete are
    /// [`Failure::RequestFailed`], errors after are [`Failure::ReadFailed`].
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, Failure> {
        let mut response = self.get(url).map_err(Failure::RequestFailed)?;

        debug!("Read body of {} response", response.status());

        // The response, and with it the connection, is dropped on return
        // whether or not the read succeeds.
        response.body_mut().read_to_vec().map_err(Failure::ReadFailed)
    }

    /// Fetch `url` and write the body as a text record to `sink`.
    ///
    /// Nothing is written if the fetch fails. A failing `sink` is
    /// [`Failure::PrintFailed`].
    pub fn fetch_and_print(&self, url: &str, sink: &mut impl Write) -> Result<(), Failure> {
        let body = self.fetch(url)?;

        write_record(sink, &body).map_err(|e| Failure::PrintFailed(Error::Io(e)))
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

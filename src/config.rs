/// Default URL fetched when none is given.
pub const DEFAULT_URL: &str = "http://localhost:8081/";

pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Config for the [`Fetcher`][crate::Fetcher].
///
/// The prefered way to create a config is the `..Default::default()` pattern.
///
/// ```
/// use httpget::{Config, Fetcher};
///
/// let config = Config {
///     max_response_header_size: 16 * 1024,
///     ..Default::default()
/// };
///
/// let fetcher = Fetcher::new_with_config(config);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Value to send in the `user-agent` header.
    ///
    /// Defaults to `httpget/<version>`.
    pub user_agent: String,

    /// Max size of the response head.
    ///
    /// Bigger heads fail the request.
    ///
    /// Defaults to 64kb.
    pub max_response_header_size: usize,

    /// Initial size of the input buffer.
    ///
    /// The input buffer holds the response head while it is parsed, and
    /// then raw body data before decoding.
    ///
    /// Defaults to 128kb.
    pub input_buffer_size: usize,

    /// Size of the output buffer used to write the request head.
    ///
    /// Defaults to 128kb.
    pub output_buffer_size: usize,

    /// Whether to set `TCP_NODELAY` on the socket.
    ///
    /// Defaults to `true`.
    pub no_delay: bool,
}

impl Config {
    /// Same as `Config::default()`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_response_header_size: 64 * 1024,
            input_buffer_size: 128 * 1024,
            output_buffer_size: 128 * 1024,
            no_delay: true,
        }
    }
}

use std::io;

use http::{header, HeaderValue, Request, Response, Uri};
use ureq_proto::client::state::{Prepare, RecvBody, RecvResponse, SendRequest};
use ureq_proto::client::{RecvBodyResult, RecvResponseResult, SendRequestResult};
use ureq_proto::BodyMode;

use crate::config::Config;
use crate::conn::Connection;
use crate::http;
use crate::transport::ConnectionDetails;
use crate::util::{DebugResponse, DebugUri, UriExt};
use crate::{Body, Error, Fetcher};

type Call<T> = ureq_proto::client::Call<T>;

/// Run a GET request up to and including the response head.
///
/// The returned body owns the connection.
pub(crate) fn run(fetcher: &Fetcher, uri: Uri) -> Result<Response<Body>, Error> {
    let config = fetcher.config();

    // Fail on bad or non-http urls before anything touches the network.
    uri.host_and_port()?;

    let request = Request::get(uri.clone()).body(())?;
    let mut call = Call::new(request)?;

    debug!("{} {:?}", call.method(), DebugUri(call.uri()));

    add_headers(&mut call, config)?;

    let mut connection = connect(fetcher, &uri)?;

    let call = match send_request(call.proceed(), &mut connection)? {
        SendRequestResult::RecvResponse(call) => call,
        // A GET has no body, so there is nothing to send or wait 100-continue for.
        SendRequestResult::SendBody(_) | SendRequestResult::Await100(_) => {
            unreachable!("GET request without body")
        }
    };

    let (response, response_result) = recv_response(call, &mut connection, config)?;

    debug!("{:?}", DebugResponse(&response));

    let handler = match response_result {
        RecvResponseResult::RecvBody(call) => BodyHandler {
            call: Some(call),
            connection: Some(connection),
            remote_closed: false,
        },
        // No body follows the head (HEAD-like status codes, or a redirect
        // without body). The connection is released right here.
        RecvResponseResult::Redirect(_) | RecvResponseResult::Cleanup(_) => {
            drop(connection);
            BodyHandler::default()
        }
    };

    let (parts, _) = response.into_parts();

    Ok(Response::from_parts(parts, Body::new(handler)))
}

fn add_headers(call: &mut Call<Prepare>, config: &Config) -> Result<(), Error> {
    let headers = call.headers();
    let has_header_ua = headers.contains_key(header::USER_AGENT);
    let has_header_accept = headers.contains_key(header::ACCEPT);

    if !has_header_ua {
        let value = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::Http(http::Error::from(e)))?;
        call.header(header::USER_AGENT, value)?;
    }

    if !has_header_accept {
        call.header(header::ACCEPT, HeaderValue::from_static("*/*"))?;
    }

    Ok(())
}

fn connect(fetcher: &Fetcher, uri: &Uri) -> Result<Connection, Error> {
    let config = fetcher.config();
    let addrs = fetcher.resolver.resolve(uri, config)?;

    let details = ConnectionDetails {
        uri,
        addrs: &addrs,
        config,
    };

    let transport = fetcher.connector.connect(&details)?;

    Ok(Connection::new(transport, uri.clone()))
}

fn send_request(
    mut call: Call<SendRequest>,
    connection: &mut Connection,
) -> Result<SendRequestResult, Error> {
    loop {
        if call.can_proceed() {
            break;
        }

        let buffers = connection.buffers();
        let amount = call.write(buffers.output())?;
        connection.transmit_output(amount)?;
    }

    // The request might be misconfigured.
    let call = call.proceed()?;

    // We checked can_proceed() above, this unwrap is fine.
    Ok(call.unwrap())
}

fn recv_response(
    mut call: Call<RecvResponse>,
    connection: &mut Connection,
    config: &Config,
) -> Result<(Response<()>, RecvResponseResult), Error> {
    let response = loop {
        let made_progress = connection.maybe_await_input()?;

        let input = connection.buffers().input();

        // Redirects are not followed, so a redirect head is only accepted
        // once it is complete.
        let (amount, maybe_response) = call.try_response(input, false)?;

        let check_size = if maybe_response.is_some() {
            // We got a parsed response, ensure the size is within
            // configured parameters.
            amount
        } else {
            // We did not parse a response, if input is too large,
            // we stop trying to get more data.
            input.len()
        };

        if check_size > config.max_response_header_size {
            return Err(Error::LargeResponseHeader(
                check_size,
                config.max_response_header_size,
            ));
        }

        connection.consume_input(amount);

        if let Some(response) = maybe_response {
            assert!(call.can_proceed());
            break response;
        } else if !made_progress {
            return Err(Error::disconnected("recv_response made no progress"));
        }
    };

    // We checked can_proceed() above, this unwrap is fine.
    Ok((response, call.proceed().unwrap()))
}

/// Drives the body part of the exchange.
///
/// Holds the connection until the body is fully read, a read fails, or the
/// handler is dropped, whichever comes first.
#[derive(Default)]
pub(crate) struct BodyHandler {
    call: Option<Call<RecvBody>>,
    connection: Option<Connection>,
    remote_closed: bool,
}

impl BodyHandler {
    pub(crate) fn do_read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let ret = self.try_read(buf);

        if ret.is_err() {
            // The body is unusable after an error.
            self.call = None;
            self.connection = None;
        }

        ret
    }

    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        let (Some(call), Some(connection)) = (&mut self.call, &mut self.connection) else {
            return Ok(0);
        };

        loop {
            let body_fulfilled = match call.body_mode() {
                BodyMode::NoBody => true,
                BodyMode::LengthDelimited(_) | BodyMode::Chunked => call.can_proceed(),
                // Only a FIN from the server ends it.
                BodyMode::CloseDelimited => false,
            };

            if body_fulfilled {
                self.ended()?;
                return Ok(0);
            }

            let has_buffered_input = connection.buffers().can_use_input();

            if has_buffered_input {
                let input = connection.buffers().input();
                let (input_used, output_used) = call.read(input, buf)?;
                connection.consume_input(input_used);

                if output_used > 0 {
                    return Ok(output_used);
                }

                if input_used > 0 {
                    continue;
                }
            }

            // The socket is done, whatever is left was decoded above.
            if self.remote_closed {
                self.ended()?;
                return Ok(0);
            }

            // A close delimited body has no length to check against, so a reset
            // cannot be told apart from a cut off body. For the other modes
            // ended() decides whether the body was complete.
            let close_delimited = matches!(call.body_mode(), BodyMode::CloseDelimited);

            let made_progress = match connection.maybe_await_input() {
                Ok(v) => v,
                Err(Error::Io(e)) if !close_delimited => match e.kind() {
                    io::ErrorKind::UnexpectedEof
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::ConnectionReset => {
                        self.remote_closed = true;
                        true
                    }
                    _ => return Err(Error::Io(e)),
                },
                Err(e) => return Err(e),
            };

            let input = connection.buffers().input();
            let input_ended = input.is_empty();

            let (input_used, output_used) = call.read(input, buf)?;
            connection.consume_input(input_used);

            if output_used > 0 {
                return Ok(output_used);
            } else if input_ended {
                self.ended()?;
                return Ok(0);
            } else if made_progress {
                // Partial chunk header or similar, read more.
                continue;
            } else {
                return Err(Error::BodyStalled);
            }
        }
    }

    fn ended(&mut self) -> Result<(), Error> {
        let Some(call) = self.call.take() else {
            return Ok(());
        };

        // A chunked body whose last chunk arrived is complete, even if the
        // server hung up before the trailing \r\n.
        let is_ended_chunked = call.is_ended_chunked();

        if !call.can_proceed() {
            if is_ended_chunked {
                debug!("Server ended connection after sending chunked 0\\r\\n");
            } else {
                return Err(Error::disconnected("body ended before it was complete"));
            }
        } else {
            match call.proceed() {
                Some(RecvBodyResult::Redirect(_)) => trace!("Body of redirect read"),
                Some(RecvBodyResult::Cleanup(_)) | None => {}
            }
        }

        self.connection = None;

        Ok(())
    }

    pub(crate) fn is_released(&self) -> bool {
        self.connection.is_none()
    }
}

impl io::Read for BodyHandler {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.do_read(buf).map_err(|e| e.into_io())
    }
}

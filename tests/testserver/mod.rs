#![allow(dead_code)]

use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

/// Serves a canned response to a fixed number of connections on localhost.
pub struct TestServer {
    pub port: u16,
    handle: Option<JoinHandle<Vec<String>>>,
}

impl TestServer {
    /// Answer `connections` requests with `response`, then stop listening.
    pub fn new(response: &'static [u8], connections: usize) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let mut request_lines = Vec::new();
            for _ in 0..connections {
                let (stream, _) = listener.accept().unwrap();
                request_lines.push(handle_one(stream, response).unwrap());
            }
            request_lines
        });

        TestServer {
            port,
            handle: Some(handle),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// Wait for all connections to be served and return the request lines seen.
    pub fn join(mut self) -> Vec<String> {
        self.handle.take().unwrap().join().unwrap()
    }
}

/// A port nobody listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

// Read the request head fully before answering, so that closing the socket
// afterwards is a clean FIN.
fn handle_one(stream: TcpStream, response: &[u8]) -> io::Result<String> {
    let mut reader = BufReader::new(&stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line)?;
        if n == 0 || line == "\r\n" {
            break;
        }
    }

    (&stream).write_all(response)?;
    (&stream).flush()?;

    Ok(request_line.trim_end().to_string())
}

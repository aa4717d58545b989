//! Live stats source speaking the memcached text protocol over TCP.

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::debug;

use super::traits::{StatsCommand, StatsSource, TransportError};

/// Reply lines that end a `stats` exchange with an error.
const ERROR_PREFIXES: [&str; 3] = ["ERROR", "CLIENT_ERROR", "SERVER_ERROR"];

/// Opens one connection per command, like `nc host port`.
#[derive(Debug, Clone)]
pub struct TcpSource {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpSource {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            port,
            timeout,
        }
    }

    fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn connect(&self) -> Result<TcpStream, TransportError> {
        let addr = self.addr();
        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                addr: addr.clone(),
                source,
            })?;

        let mut last_err = None;
        for sock_addr in addrs {
            match TcpStream::connect_timeout(&sock_addr, self.timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    debug!(%sock_addr, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }
        match last_err {
            Some(source) => Err(TransportError::Connect { addr, source }),
            None => Err(TransportError::NoAddress { addr }),
        }
    }
}

impl StatsSource for TcpSource {
    fn fetch(&mut self, command: StatsCommand) -> Result<String, TransportError> {
        let mut stream = self.connect()?;
        let receive = |source| TransportError::Receive { command, source };
        stream.set_read_timeout(Some(self.timeout)).map_err(receive)?;
        stream
            .set_write_timeout(Some(self.timeout))
            .map_err(|source| TransportError::Send { command, source })?;

        stream
            .write_all(format!("{}\r\n", command.as_str()).as_bytes())
            .and_then(|()| stream.flush())
            .map_err(|source| TransportError::Send { command, source })?;

        read_reply(BufReader::new(stream), command)
    }

    fn describe(&self) -> String {
        format!("tcp://{}", self.addr())
    }
}

/// Reads lines until one equal to `END`, returning everything received.
fn read_reply<R: BufRead>(mut reader: R, command: StatsCommand) -> Result<String, TransportError> {
    let mut reply = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader
            .read_line(&mut line)
            .map_err(|source| TransportError::Receive { command, source })?;
        if n == 0 {
            return Err(TransportError::UnexpectedEof { command });
        }
        reply.push_str(&line);

        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed == "END" {
            return Ok(reply);
        }
        if ERROR_PREFIXES
            .iter()
            .any(|p| trimmed.split_whitespace().next() == Some(*p))
        {
            return Err(TransportError::Server {
                command,
                reply: trimmed.to_string(),
            });
        }
    }
}

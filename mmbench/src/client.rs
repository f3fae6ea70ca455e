//! A client for issuing commands to a remote server.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use protocol::{Cmd, Response};
use redis::{ConnectionAddr, ConnectionInfo, RedisError, Value};
use tracing::{debug, trace};

/// One open connection to a server.
pub struct Client {
    /// Address of the remote server.
    addr: SocketAddr,

    connection: redis::Connection,
}

impl Client {
    /// Connects to the server at `addr`, giving up after `timeout`.
    pub fn connect(addr: SocketAddr, timeout: Duration) -> Result<Self> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(addr.ip().to_string(), addr.port()),
            redis: Default::default(),
        };
        debug!(%addr, ?timeout, "Connecting to server");
        let connection = redis::Client::open(info)
            .and_then(|client| client.get_connection_with_timeout(timeout))
            .with_context(|| format!("Connecting to {addr}"))?;
        Ok(Self { addr, connection })
    }

    /// Sends a command and waits for its reply.
    ///
    /// A server that answers with an error reply is not a failure here; the error is returned as
    /// [`Response::Err`]. Only a broken connection is an `Err`.
    pub fn issue(&mut self, cmd: &Cmd) -> Result<Response<'static>> {
        trace!(%cmd, "Issuing command");
        match cmd.to_redis().query::<Value>(&mut self.connection) {
            Ok(value) => Ok(response_from(value)),
            Err(e) if is_fatal(&e) => {
                Err(e).with_context(|| format!("Sending {} to {}", cmd.name(), self.addr))
            }
            Err(e) => Ok(Response::Err(error_reply(&e).into())),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

fn is_fatal(e: &RedisError) -> bool {
    e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
}

/// Rebuilds the error line the server sent, e.g. `ERR unknown command`.
fn error_reply(e: &RedisError) -> String {
    match (e.code(), e.detail()) {
        (Some(code), Some(detail)) => format!("{code} {detail}"),
        (Some(code), None) => code.to_owned(),
        _ => e.to_string(),
    }
}

fn response_from(value: Value) -> Response<'static> {
    match value {
        Value::Okay | Value::Status(_) => Response::Ok,
        Value::Int(n) => Response::Integer(n),
        Value::Nil => Response::Array(Vec::new()),
        Value::Data(bytes) => Response::Array(vec![String::from_utf8_lossy(&bytes)
            .into_owned()
            .into()]),
        Value::Bulk(values) => Response::Array(
            values
                .into_iter()
                .filter_map(|value| match value {
                    Value::Data(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned().into()),
                    Value::Status(s) => Some(s.into()),
                    _ => None,
                })
                .collect(),
        ),
    }
}

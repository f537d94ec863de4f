//! Collector connection
//!
//! One outbound stream socket per collector: TCP for graphite, a local
//! unix stream socket for collectd. The connection knows how to open
//! itself within a timeout, push a line, and read one reply line; failure
//! handling (disconnect, reconnect scheduling) lives in the reporter.

use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::time::Duration;

use socket2::{SockRef, TcpKeepalive};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
#[cfg(unix)]
use tokio::net::UnixStream;
use tokio::time::timeout;
use tracing::debug;

use crate::error::ReportError;

/// Collector address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// TCP host:port
    Tcp {
        /// Collector host
        host: String,
        /// Collector port
        port: u16,
    },
    /// Local stream socket
    Unix {
        /// Filesystem path of the socket
        path: PathBuf,
    },
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp { host, port } => write!(f, "{host}:{port}"),
            Self::Unix { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Options applied when opening a connection
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Connect timeout
    pub timeout: Duration,

    /// TCP keep-alive probe interval; `None` disables keep-alive.
    /// Ignored for unix sockets.
    pub tcp_keepalive: Option<Duration>,
}

trait CollectorStream: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> CollectorStream for T {}

/// A live connection to a collector
pub struct Connection {
    stream: BufReader<Box<dyn CollectorStream>>,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl Connection {
    /// Open the transport to `target` within `opts.timeout`.
    pub async fn connect(target: &Target, opts: &ConnectOptions) -> Result<Self, ReportError> {
        let stream: Box<dyn CollectorStream> = match target {
            Target::Tcp { host, port } => {
                let stream = Self::connect_io(
                    target,
                    opts.timeout,
                    TcpStream::connect((host.as_str(), *port)),
                )
                .await?;

                // Lower latency for single-line writes (non-fatal if it fails)
                if let Err(e) = stream.set_nodelay(true) {
                    debug!(target = %target, error = %e, "failed to set TCP_NODELAY");
                }

                if let Some(interval) = opts.tcp_keepalive {
                    let sock_ref = SockRef::from(&stream);
                    let keepalive = TcpKeepalive::new().with_time(interval);

                    // On Linux, also set the interval between probes
                    #[cfg(target_os = "linux")]
                    let keepalive = keepalive.with_interval(interval);

                    if let Err(e) = sock_ref.set_tcp_keepalive(&keepalive) {
                        debug!(target = %target, error = %e, "failed to set TCP keep-alive");
                    }
                }

                Box::new(stream)
            }
            #[cfg(unix)]
            Target::Unix { path } => {
                let stream =
                    Self::connect_io(target, opts.timeout, UnixStream::connect(path)).await?;
                Box::new(stream)
            }
            #[cfg(not(unix))]
            Target::Unix { .. } => {
                return Err(ReportError::ConnectFailed {
                    target: target.to_string(),
                    source: io::Error::other("unix sockets are not supported on this platform"),
                });
            }
        };

        Ok(Self {
            stream: BufReader::new(stream),
        })
    }

    async fn connect_io<S>(
        target: &Target,
        connect_timeout: Duration,
        fut: impl Future<Output = io::Result<S>>,
    ) -> Result<S, ReportError> {
        match timeout(connect_timeout, fut).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(ReportError::ConnectFailed {
                target: target.to_string(),
                source: e,
            }),
            Err(_) => Err(ReportError::ConnectFailed {
                target: target.to_string(),
                source: io::Error::new(ErrorKind::TimedOut, "connection timed out"),
            }),
        }
    }

    /// Write one protocol line and flush it.
    pub async fn send_line(&mut self, line: &str) -> Result<(), ReportError> {
        let stream = self.stream.get_mut();
        stream
            .write_all(line.as_bytes())
            .await
            .map_err(ReportError::SendFailed)?;
        stream.flush().await.map_err(ReportError::SendFailed)?;
        Ok(())
    }

    /// Read one reply line within `read_timeout`.
    ///
    /// A clean peer close is a `ReceiveFailed`: the collector is expected
    /// to answer every line it accepts.
    pub async fn read_reply(&mut self, read_timeout: Duration) -> Result<String, ReportError> {
        let mut line = String::new();
        match timeout(read_timeout, self.stream.read_line(&mut line)).await {
            Ok(Ok(0)) => Err(ReportError::ReceiveFailed(io::Error::new(
                ErrorKind::UnexpectedEof,
                "collector closed the connection",
            ))),
            Ok(Ok(_)) => Ok(line),
            Ok(Err(e)) => Err(ReportError::ReceiveFailed(e)),
            Err(_) => Err(ReportError::ReceiveTimeout(read_timeout)),
        }
    }
}

#[cfg(test)]
#[path = "connection_test.rs"]
mod connection_test;

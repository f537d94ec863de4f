//! Reporter error taxonomy
//!
//! Transport failures are handled inside the reporter (disconnect plus a
//! scheduled reconnect) and never surface to the subscription layer;
//! these types exist for classification and logging.

use statbridge_protocol::ProtocolError;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors arising while reporting a value to a collector
#[derive(Debug, Error)]
pub enum ReportError {
    /// Could not open the transport within the connect timeout
    #[error("connect failed to {target}: {source}")]
    ConnectFailed {
        /// Collector address
        target: String,
        #[source]
        source: io::Error,
    },

    /// Writing a line to the collector failed
    #[error("send failed: {0}")]
    SendFailed(#[source] io::Error),

    /// No reply arrived within the read timeout
    #[error("no reply within {0:?}")]
    ReceiveTimeout(Duration),

    /// Reading the reply failed (includes peer close)
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] io::Error),

    /// Reply did not match the protocol; connection is unsynchronized
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Collector answered with a negative status
    #[error("collector rejected value: {status} {message}")]
    ReplyRejected {
        /// Negative status code from the reply
        status: i64,
        /// Free-text message from the reply
        message: String,
    },

    /// Collector answered with a status the bridge does not interpret
    #[error("unsupported reply status {status}: {message}")]
    ReplyUnsupported {
        /// Non-zero, non-negative status code
        status: i64,
        /// Free-text message from the reply
        message: String,
    },

    /// Reporter task is gone; the value cannot be queued
    #[error("reporter channel closed")]
    ChannelClosed,
}

impl ReportError {
    /// Whether this error means the connection must be torn down
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectFailed { .. }
                | Self::SendFailed(_)
                | Self::ReceiveTimeout(_)
                | Self::ReceiveFailed(_)
                | Self::Protocol(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(ReportError::SendFailed(io::Error::other("x")).is_transport());
        assert!(ReportError::ReceiveTimeout(Duration::from_secs(5)).is_transport());
        assert!(
            ReportError::Protocol(ProtocolError::malformed_reply("bad")).is_transport()
        );
        assert!(
            !ReportError::ReplyRejected {
                status: -1,
                message: "Failure".into()
            }
            .is_transport()
        );
        assert!(!ReportError::ChannelClosed.is_transport());
    }
}

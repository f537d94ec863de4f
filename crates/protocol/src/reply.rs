//! collectd reply parsing
//!
//! The unixsock protocol answers every `PUTVAL` with one ASCII line:
//! a decimal integer status code, a single space, then a free-text
//! message. Status `0` means the value was accepted; negative statuses
//! are errors; anything else is unsupported and ignored by the caller.
//!
//! A line without a parseable leading integer or without the separating
//! space is a protocol violation: once framing is lost the reply stream
//! cannot be resynchronized, so parsing fails closed.

use crate::{ProtocolError, Result};

/// Parsed collector reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Leading status code
    pub status: i64,
    /// Free-text message after the status
    pub message: String,
}

impl Reply {
    /// Status `0`: value accepted
    pub fn is_ok(&self) -> bool {
        self.status == 0
    }

    /// Negative status: collector rejected the value
    pub fn is_error(&self) -> bool {
        self.status < 0
    }
}

/// Parse one reply line into `(status, message)`.
///
/// Accepts a trailing `\n` or `\r\n`; the terminator is not part of the
/// message.
pub fn parse_reply(line: &str) -> Result<Reply> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    let Some((status, message)) = line.split_once(' ') else {
        return Err(ProtocolError::malformed_reply(line));
    };

    let status: i64 = status
        .parse()
        .map_err(|_| ProtocolError::malformed_reply(line))?;

    Ok(Reply {
        status,
        message: message.to_string(),
    })
}

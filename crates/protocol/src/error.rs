//! Protocol error types

use thiserror::Error;

/// Errors that can occur when parsing collector replies
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Reply line does not match `<int status><space><message>`
    #[error("malformed reply: {0:?}")]
    MalformedReply(String),

    /// Reply line is empty (peer closed mid-frame)
    #[error("empty reply")]
    EmptyReply,
}

impl ProtocolError {
    /// Create a malformed reply error, truncating oversized payloads
    pub fn malformed_reply(line: &str) -> Self {
        const MAX_CAPTURE: usize = 128;
        if line.is_empty() {
            return Self::EmptyReply;
        }
        Self::MalformedReply(line.chars().take(MAX_CAPTURE).collect())
    }
}

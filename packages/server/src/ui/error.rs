//! Error types for the server and its sessions.

use thiserror::Error;

use crate::{domain::SinkError, usecase::ConnectError};

/// Fatal server errors
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listening socket
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to query the listener address
    #[error("failed to read local address: {0}")]
    LocalAddr(#[source] std::io::Error),
}

/// Per-session errors. Every variant routes the session into `Closing`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Read failed (reset, invalid UTF-8, ...)
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    /// Write to this client failed
    #[error("write failed: {0}")]
    Write(#[from] SinkError),

    /// Peer sent a line longer than the framing limit
    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    /// Peer closed the connection before sending a name
    #[error("peer closed before sending a name")]
    ClosedBeforeName,

    /// Registration rejected
    #[error(transparent)]
    Connect(#[from] ConnectError),
}

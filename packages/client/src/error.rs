//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not reach the server
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Connection error after the session started
    #[error("Connection error: {0}")]
    Io(#[from] std::io::Error),

    /// Server closed the connection before asking for a name
    #[error("Server closed the connection before asking for a name")]
    NoPrompt,
}

//! Server configuration.

use std::num::NonZeroUsize;

use crate::domain::DEFAULT_HISTORY_CAPACITY;

/// Default host address
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Default port number
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration of the chat server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to bind to (0 picks an ephemeral port)
    pub port: u16,
    /// Maximum number of concurrent sessions. `None` means unlimited.
    pub max_connections: Option<NonZeroUsize>,
    /// Number of recent messages replayed to newly joined clients
    pub history_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_connections: None,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Address string passed to `TcpListener::bind`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

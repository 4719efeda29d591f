//! TCP chat server implementation.

mod config;
mod error;
mod framing;
mod server;
mod session;
mod signal;

pub use config::ServerConfig;
pub use error::{ServerError, SessionError};
pub use framing::{LineReader, MAX_LINE_BYTES};
pub use server::Server;
pub use session::{EndReason, Session, SessionReport, SessionState, run_session};

//! Console client for the Chatline TCP chat server.

pub mod error;
mod input;
mod session;
mod ui;

pub use error::ClientError;
pub use session::run_client;

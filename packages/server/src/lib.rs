//! Multi-client TCP chat server.
//!
//! Clients connect over plain TCP, pick a display name and exchange
//! line-delimited UTF-8 messages. Every message is broadcast to all other
//! connected clients and the most recent ones are replayed to newcomers.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

#[cfg(test)]
mod test_support;

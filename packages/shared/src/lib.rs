//! Utilities shared by the Chatline server and client binaries.

pub mod logger;
pub mod time;

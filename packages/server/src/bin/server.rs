//! TCP chat server with broadcast and recent-history replay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatline-server
//! cargo run --bin chatline-server -- --host 0.0.0.0 --port 3000 --max-connections 64
//! ```

use std::num::NonZeroUsize;

use chatline_server::ui::{Server, ServerConfig};
use chatline_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "chatline-server")]
#[command(about = "TCP chat server with broadcast support", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Maximum number of concurrent sessions, at least 1 (unlimited when omitted)
    #[arg(short = 'm', long)]
    max_connections: Option<NonZeroUsize>,

    /// Number of recent messages replayed to new clients
    #[arg(long, default_value = "10")]
    history_capacity: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_connections: args.max_connections,
            history_capacity: args.history_capacity,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());

    let server = match Server::bind(config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Server error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

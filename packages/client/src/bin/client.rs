//! Console chat client.
//!
//! Connects to a Chatline server, answers the name prompt and then sends
//! every line typed on stdin. Type `exit` or press Ctrl+C to leave.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chatline-client
//! cargo run --bin chatline-client -- --host 127.0.0.1 --port 3000
//! ```

use clap::Parser;

use chatline_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "chatline-client")]
#[command(about = "TCP chat client with broadcast support", long_about = None)]
struct Args {
    /// Server host address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port number
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = chatline_client::run_client(&args.host, args.port).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

//! tracing subscriber setup shared by the chatline binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive: the binary's own crate and this crate at `level`.
fn default_directive(binary_name: &str, level: &str) -> String {
    format!(
        "{}={level},{}={level}",
        binary_name.replace('-', "_"),
        env!("CARGO_PKG_NAME").replace('-', "_"),
    )
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_log_level` when set.
///
/// ```no_run
/// chatline_shared::logger::setup_logger("chatline-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(binary_name, default_log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

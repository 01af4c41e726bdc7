//! Diagnostics for the binaries, written to stderr so stdout only carries
//! the answers.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber filtered by `RUST_LOG`, `warn` when unset.
///
/// ```bash
/// RUST_LOG=guard_patrol=debug cargo run --bin part2 -- sample.txt
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

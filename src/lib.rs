pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod server;
pub mod signals;
pub mod tariffs;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// Note: This function can only be called once. Filtering is controlled
/// via RUST_LOG; defaults to "info" when unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

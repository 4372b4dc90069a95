//! Structured logging setup.
//!
//! Configures a tracing subscriber with an env filter (`RUST_LOG`, default
//! off) and compact terminal formatting. Guarded by `Once` so tests and
//! embedding binaries can call it unconditionally.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Initialize the tracing subscriber for this process.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("off"))
            .unwrap();

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(true).compact().with_target(true))
            .init();
    });
}

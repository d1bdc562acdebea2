//! Tracing setup shared by the command-line tools.
//!
//! Log output always goes to stderr; stdout carries the JSON documents the
//! pipeline stages exchange.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over
/// `warn` for this crate.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("ecosystem_locate=debug")
        } else {
            EnvFilter::new("ecosystem_locate=warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

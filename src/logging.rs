//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Initialize structured logging on stderr.
///
/// Reads `SALES_LOG` for the filter (e.g. `SALES_LOG=soul_sales=debug`) and
/// falls back to `soul_sales=info`. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("SALES_LOG").unwrap_or_else(|_| EnvFilter::new("soul_sales=info"));

        // try_init: a host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .try_init();
    });
}

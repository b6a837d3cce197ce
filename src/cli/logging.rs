//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize tracing to stderr. Safe to call multiple times.
///
/// stdout carries the command's output, so logs never go there. `RUST_LOG`
/// wins over `verbose` when set.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "docseek=debug" } else { "docseek=warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .compact()
            .try_init();

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e)
        }
    });
}

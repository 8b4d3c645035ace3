//! Logging initialization.
//!
//! The RUST_LOG environment variable takes precedence; otherwise only warnings
//! are shown, or debug events with `--verbose`. Output goes to stderr so it
//! never interleaves with REPL results on stdout.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber.
pub fn init(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("contactdir=debug")
    } else {
        EnvFilter::new("warn")
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time(),
    );

    // A subscriber may already be installed when embedded in tests.
    let _ = subscriber.try_init();
}

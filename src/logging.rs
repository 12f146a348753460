//! Logging setup for the `fuzzygen` binary.
//!
//! Plain `LEVEL message` lines on stderr so they never mix with generated
//! output redirected from stdout.

use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Level used for a given verbosity flag.
pub fn level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(LevelFilter::from_level(level(verbose)));

    let _ = Registry::default().with(layer).try_init();
}

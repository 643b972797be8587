//! Logging setup for the Packwright CLI.
//!
//! Library crates only emit `tracing` events; the subscriber is installed
//! here, once, from `main`.
//!
//! # Example
//!
//! ```rust,no_run
//! use packwright_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("assembling");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "packwright_config=debug,packwright_cli=debug";
const QUIET_FILTER: &str = "packwright_config=error,packwright_cli=error";
const DEFAULT_FILTER: &str = "packwright_config=info,packwright_cli=info";

/// Pick the filter for the given flags.
///
/// The level is determined in this order:
/// 1. `--verbose`: DEBUG for packwright crates
/// 2. `--quiet`: ERROR only
/// 3. `RUST_LOG`
/// 4. INFO for packwright crates
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global subscriber. Logs go to stderr so the JSON handoff on
/// stdout stays clean.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}

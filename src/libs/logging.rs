//! Diagnostic logging.
//!
//! Warnings from the library (a failed suggestion request, an unsaved
//! session) always reach stderr. Debug mode raises the level to `debug`, and
//! `RUST_LOG` replaces the filter entirely.

use crate::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

pub fn init() {
    let default_level = if is_debug_mode() { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("habitual={}", default_level)));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use env_logger::Env;

/// Initialize the logging system with the `info` default filter
///
/// `RUST_LOG` overrides the default when set.
pub fn init() {
    init_with_level("info");
}

/// Initialize the logging system with a default filter such as `"debug"` or `"scene_engine=trace"`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(default_filter: &str) {
    if env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}

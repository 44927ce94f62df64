use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install the `env_logger` backend once per process.
///
/// Defaults to `info`; `RUST_LOG` overrides (e.g. `RUST_LOG=keyed_store=debug`
/// to see table resizes and rebuilds).
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("keyed_store", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env();

        // a test harness or embedding binary may already own the logger
        let _ = builder.try_init();
    });
}

//! Populates `testdata` through the library entry point, truncating first.

use filter_bench::config::BenchConfig;
use filter_bench::logging::initialize_logger;
use filter_bench::populate::populate_with_config;
use std::process;

fn main() {
    let config = BenchConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    initialize_logger(config.log_level, None).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {e}. Exiting.");
        process::exit(1);
    });

    if let Err(e) = populate_with_config(&config, true) {
        log::error!("{e:#}");
        process::exit(1);
    }
}

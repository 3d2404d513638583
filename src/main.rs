//! Truncates `testdata` and fills it with `NUM_RECORDS` synthetic rows.
//!
//! Usage:
//!   cargo run --release
//!   NUM_RECORDS=5000 FILTER_BENCH_DB=/tmp/bench.db cargo run --release

use filter_bench::config::BenchConfig;
use filter_bench::logging::initialize_logger;
use filter_bench::populate::populate;
use filter_bench::record::RecordGenerator;
use filter_bench::store::{RowStore, SqliteStore};
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

    let store = match SqliteStore::open(&config.store) {
        Ok(store) => store,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = store.truncate() {
        log::error!("{e}");
        process::exit(1);
    }

    let mut generator = RecordGenerator::from_seed_option(config.seed);
    match populate(&store, &mut generator, config.num_records) {
        Ok(n) => log::info!("inserted {n} records into {}", config.store.path),
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    }
}

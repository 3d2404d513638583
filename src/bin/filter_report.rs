//! Standalone benchmark runner that prints the formatted report.
//!
//! For every table size: truncate, populate, time each query variant, and
//! check that all filtered variants agree on the result-set size.
//!
//! Usage:
//!   cargo run --release --bin filter-report
//!   FILTER_BENCH_DB=:memory: cargo run --release --bin filter-report

use anyhow::{Context, Result};
use filter_bench::config::BenchConfig;
use filter_bench::harness::{run_plan, BenchPlan};
use filter_bench::logging::initialize_logger;
use filter_bench::record::RecordGenerator;
use filter_bench::report::print_report;
use filter_bench::store::SqliteStore;
use std::process;

fn run(config: &BenchConfig) -> Result<()> {
    let store = SqliteStore::open(&config.store)
        .with_context(|| format!("opening row store {}", config.store.path))?;
    let mut generator = RecordGenerator::from_seed_option(config.seed);

    // NUM_RECORDS caps the largest table size.
    let mut plan = BenchPlan::default();
    plan.record_counts.retain(|&n| n <= config.num_records);
    if plan.record_counts.is_empty() {
        plan.record_counts.push(config.num_records);
    }

    println!("Running row filter benchmark...");
    println!("  Table sizes:  {:?}", plan.record_counts);
    println!("  Candidates:   {}", plan.candidates);
    println!("  Warmup runs:  {}", plan.warmup);
    println!("  Sample runs:  {}", plan.samples);

    let results = run_plan(&store, &mut generator, &plan)?;
    print_report(&results);
    Ok(())
}

fn main() {
    let config = BenchConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    initialize_logger(config.log_level, None).unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {e}. Exiting.");
        process::exit(1);
    });

    if let Err(e) = run(&config) {
        log::error!("{e:#}");
        process::exit(1);
    }
}

//! Row filtering benchmark
//!
//! Populates a SQLite table with synthetic records and compares equivalent
//! ways of selecting rows whose `rstate` and `rtype` both fall in a small
//! candidate set:
//! - **Raw SQL**: hand-built `IN (?, ?, ...)` placeholder lists
//! - **Builder SQL**: the same predicate rendered by sea-query in [`query::builder`]
//! - **Client side**: a full scan followed by [`filter::filter_records`]
//!
//! Populate a table: `cargo run --bin filter-bench`
//! Print a timing report: `cargo run --release --bin filter-report`
//! Run benchmarks: `cargo bench`

pub mod config;
pub mod filter;
pub mod harness;
pub mod logging;
pub mod populate;
pub mod query;
pub mod record;
pub mod report;
pub mod store;

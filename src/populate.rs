//! Table population: inserts generated records one row at a time.

use crate::config::BenchConfig;
use crate::record::RecordGenerator;
use crate::store::{RowStore, SqliteStore, StoreResult};
use anyhow::{Context, Result};

/// Progress is logged every this many rows.
const PROGRESS_EVERY: usize = 10_000;

/// Insert `num_records` generated records. Stops at the first error; rows
/// inserted before it stay in the table.
pub fn populate(
    store: &dyn RowStore,
    generator: &mut RecordGenerator,
    num_records: usize,
) -> StoreResult<usize> {
    let mut inserted = 0;
    for i in 1..=num_records {
        let record = generator.make_record();
        inserted += store.insert(&record)?;
        if i % PROGRESS_EVERY == 0 {
            log::debug!("inserted {i}/{num_records} records");
        }
    }
    Ok(inserted)
}

/// Truncate, then [`populate`].
pub fn reset_and_populate(
    store: &dyn RowStore,
    generator: &mut RecordGenerator,
    num_records: usize,
) -> StoreResult<usize> {
    store.truncate()?;
    populate(store, generator, num_records)
}

/// Open the configured store and fill it with `config.num_records` rows,
/// truncating first when asked. Returns the number of rows inserted.
pub fn populate_with_config(config: &BenchConfig, truncate: bool) -> Result<usize> {
    let store = SqliteStore::open(&config.store)
        .with_context(|| format!("opening row store {}", config.store.path))?;
    let mut generator = RecordGenerator::from_seed_option(config.seed);

    if truncate {
        store.truncate().context("truncating table")?;
        log::info!("truncated {}", config.store.path);
    }

    let inserted =
        populate(&store, &mut generator, config.num_records).context("populating table")?;
    log::info!("inserted {inserted} records into {}", config.store.path);
    Ok(inserted)
}

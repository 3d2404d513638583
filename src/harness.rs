//! Benchmark harness: populate, time each query variant, cross-check result
//! sizes.

use crate::populate::reset_and_populate;
use crate::query::QueryVariant;
use crate::record::{CandidateSet, RecordGenerator};
use crate::report::VariantResult;
use crate::store::RowStore;
use anyhow::{bail, Context, Result};
use std::time::Instant;

/// Table sizes exercised by the full benchmark.
pub const DEFAULT_RECORD_COUNTS: [usize; 7] = [50, 100, 1_000, 5_000, 10_000, 50_000, 100_000];

#[derive(Debug, Clone)]
pub struct BenchPlan {
    pub record_counts: Vec<usize>,
    pub candidates: CandidateSet,
    /// Untimed runs before sampling.
    pub warmup: u32,
    pub samples: u32,
    pub variants: Vec<QueryVariant>,
}

impl Default for BenchPlan {
    fn default() -> Self {
        Self {
            record_counts: DEFAULT_RECORD_COUNTS.to_vec(),
            candidates: CandidateSet::odd(),
            warmup: 2,
            samples: 20,
            variants: QueryVariant::ALL.to_vec(),
        }
    }
}

/// Time `samples` runs of `variant` against whatever the store holds,
/// flushing the store after every run.
pub fn time_variant(
    store: &dyn RowStore,
    variant: QueryVariant,
    candidates: &CandidateSet,
    record_count: usize,
    warmup: u32,
    samples: u32,
) -> Result<VariantResult> {
    for _ in 0..warmup {
        variant
            .run(store, candidates)
            .with_context(|| format!("warmup of {variant}"))?;
        store.flush()?;
    }

    let mut result = VariantResult::new(variant, record_count);
    for _ in 0..samples {
        let start = Instant::now();
        let rows = variant
            .run(store, candidates)
            .with_context(|| format!("sample of {variant}"))?;
        result.add_sample(start.elapsed(), rows.len());
        store.flush()?;
    }
    Ok(result)
}

/// Fail unless every filtered variant in `results` returned the same number
/// of rows.
pub fn cross_check(results: &[VariantResult]) -> Result<()> {
    let mut filtered = results
        .iter()
        .filter(|r| r.variant.is_filtered() && r.sample_count() > 0);
    let Some(first) = filtered.next() else {
        return Ok(());
    };
    for other in filtered {
        if other.rows != first.rows {
            bail!(
                "{} returned {} rows but {} returned {} rows at {} records; counts should match",
                first.variant,
                first.rows,
                other.variant,
                other.rows,
                first.record_count
            );
        }
    }
    Ok(())
}

/// Run the whole plan. Each table size starts from a truncated table.
pub fn run_plan(
    store: &dyn RowStore,
    generator: &mut RecordGenerator,
    plan: &BenchPlan,
) -> Result<Vec<VariantResult>> {
    let mut all = Vec::new();

    for &count in &plan.record_counts {
        log::info!("populating {count} records");
        reset_and_populate(store, generator, count)
            .with_context(|| format!("populating {count} records"))?;

        let mut batch = Vec::with_capacity(plan.variants.len());
        for &variant in &plan.variants {
            let r = time_variant(
                store,
                variant,
                &plan.candidates,
                count,
                plan.warmup,
                plan.samples,
            )?;
            log::info!(
                "{variant}/{count}: {:.0}µs mean, {} rows",
                r.mean_us(),
                r.rows
            );
            batch.push(r);
        }

        cross_check(&batch)?;
        all.extend(batch);
    }

    Ok(all)
}

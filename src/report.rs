//! Report module: timing statistics per query variant and a printed summary.

use crate::query::QueryVariant;
use std::collections::BTreeSet;
use std::time::Duration;

/// Timings for one variant at one table size.
#[derive(Debug, Clone)]
pub struct VariantResult {
    pub variant: QueryVariant,
    pub record_count: usize,
    pub durations: Vec<Duration>,
    /// Result-set size of the last sampled run.
    pub rows: usize,
}

impl VariantResult {
    pub fn new(variant: QueryVariant, record_count: usize) -> Self {
        Self {
            variant,
            record_count,
            durations: Vec::new(),
            rows: 0,
        }
    }

    pub fn add_sample(&mut self, elapsed: Duration, rows: usize) {
        self.durations.push(elapsed);
        self.rows = rows;
    }

    pub fn sample_count(&self) -> usize {
        self.durations.len()
    }

    pub fn mean_us(&self) -> f64 {
        if self.durations.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.durations.iter().map(|d| d.as_secs_f64() * 1e6).sum();
        sum / self.durations.len() as f64
    }

    /// Nearest-rank percentile in microseconds.
    pub fn percentile_us(&self, pct: f64) -> f64 {
        if self.durations.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self
            .durations
            .iter()
            .map(|d| d.as_secs_f64() * 1e6)
            .collect();
        sorted.sort_by(f64::total_cmp);
        let idx = ((pct / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    /// Rows returned per second at the mean latency.
    pub fn rows_per_sec(&self) -> f64 {
        let mean = self.mean_us();
        if mean <= 0.0 {
            return 0.0;
        }
        self.rows as f64 * 1_000_000.0 / mean
    }
}

/// Render the report as text.
pub fn format_report(results: &[VariantResult]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(80);
    out.push_str(&format!("\n{rule}\n  Row Filter Benchmark Report\n{rule}\n"));

    let counts: BTreeSet<usize> = results.iter().map(|r| r.record_count).collect();

    for count in counts {
        out.push_str(&format!("\n  Records: {count}\n"));
        out.push_str(&format!(
            "  {:22} {:>8} {:>12} {:>12} {:>12} {:>12}\n",
            "Variant", "Rows", "Mean (µs)", "p50 (µs)", "p95 (µs)", "p99 (µs)"
        ));
        out.push_str(&format!("  {}\n", "-".repeat(82)));

        for r in results.iter().filter(|r| r.record_count == count) {
            out.push_str(&format!(
                "  {:22} {:>8} {:>12.0} {:>12.0} {:>12.0} {:>12.0}\n",
                r.variant.name(),
                r.rows,
                r.mean_us(),
                r.percentile_us(50.0),
                r.percentile_us(95.0),
                r.percentile_us(99.0),
            ));
        }

        // Fastest filtered variant for this table size.
        if let Some(best) = results
            .iter()
            .filter(|r| r.record_count == count && r.variant.is_filtered() && r.sample_count() > 0)
            .min_by(|a, b| a.mean_us().total_cmp(&b.mean_us()))
        {
            out.push_str(&format!(
                "  Fastest filter: {} ({:.0} rows/s)\n",
                best.variant,
                best.rows_per_sec()
            ));
        }
    }

    out.push_str(&format!("\n{rule}\n"));
    out
}

pub fn print_report(results: &[VariantResult]) {
    println!("{}", format_report(results));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(us: &[u64]) -> VariantResult {
        let mut r = VariantResult::new(QueryVariant::FilterSql, 100);
        for &v in us {
            r.add_sample(Duration::from_micros(v), 10);
        }
        r
    }

    #[test]
    fn empty_result_is_zero() {
        let r = VariantResult::new(QueryVariant::SelectAll, 10);
        assert_eq!(r.mean_us(), 0.0);
        assert_eq!(r.percentile_us(95.0), 0.0);
        assert_eq!(r.rows_per_sec(), 0.0);
    }

    #[test]
    fn mean_and_percentiles() {
        let r = result_with(&[400, 100, 300, 200, 500]);
        assert!((r.mean_us() - 300.0).abs() < 1e-6);
        assert!((r.percentile_us(0.0) - 100.0).abs() < 1e-6);
        assert!((r.percentile_us(50.0) - 300.0).abs() < 1e-6);
        assert!((r.percentile_us(100.0) - 500.0).abs() < 1e-6);
        assert!((r.rows_per_sec() - 10.0 * 1e6 / 300.0).abs() < 1e-6);
    }

    #[test]
    fn report_lists_every_variant() {
        let mut fast = result_with(&[100]);
        fast.variant = QueryVariant::IndexFilterSql;
        let slow = result_with(&[900]);
        let text = format_report(&[fast, slow]);
        assert!(text.contains("Records: 100"));
        assert!(text.contains("index_filter_sql"));
        assert!(text.contains("filter_sql"));
        assert!(text.contains("Fastest filter: index_filter_sql"));
    }

    #[test]
    fn ungrouped_results_print_each_size_once() {
        let mut small = result_with(&[50]);
        small.record_count = 50;
        let mut client = result_with(&[70]);
        client.variant = QueryVariant::FilterClient;
        let text = format_report(&[result_with(&[100]), small, client]);

        assert_eq!(text.matches("Records: 100").count(), 1);
        assert_eq!(text.matches("Records: 50\n").count(), 1);
        assert!(text.find("Records: 50\n").unwrap() < text.find("Records: 100").unwrap());
    }
}

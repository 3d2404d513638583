//! Integration tests: population, every query variant, and the harness
//! against real SQLite databases.

use filter_bench::config::{BenchConfig, StoreConfig};
use filter_bench::filter::filter_records;
use filter_bench::harness::{run_plan, BenchPlan};
use filter_bench::populate::{populate_with_config, reset_and_populate};
use filter_bench::query::QueryVariant;
use filter_bench::record::{CandidateSet, Record, RecordGenerator};
use filter_bench::store::{Order, RowStore, SqliteStore};

fn temp_store_config(dir: &tempfile::TempDir) -> StoreConfig {
    StoreConfig {
        path: dir.path().join("testing.db").to_string_lossy().into_owned(),
    }
}

fn ids(records: &[Record]) -> Vec<String> {
    let mut ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids
}

// ── Cross-check fixture ─────────────────────────────────────────────

#[test]
fn fixture_matches_server_and_client_side() {
    let store = SqliteStore::open_in_memory().unwrap();
    let pairs = [
        (1, 1),
        (3, 3),
        (1, 3),
        (3, 1),
        (2, 3),
        (2, 1),
        (1, 2),
        (3, 2),
    ];
    let records: Vec<Record> = pairs
        .iter()
        .enumerate()
        .map(|(i, &(rstate, rtype))| Record::with_attrs(format!("fixture-{i}"), rstate, rtype))
        .collect();
    for rec in &records {
        store.insert(rec).unwrap();
    }

    let candidates: CandidateSet = [1, 3].into_iter().collect();
    let want = ids(&records[..4]);
    for variant in QueryVariant::FILTERED {
        let got = variant.run(&store, &candidates).unwrap();
        assert_eq!(ids(&got), want, "{variant}");
    }
}

#[test]
fn empty_candidate_set_matches_nothing_in_every_variant() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut generator = RecordGenerator::new(31);
    reset_and_populate(&store, &mut generator, 300).unwrap();

    let candidates = CandidateSet::new();
    for variant in QueryVariant::FILTERED {
        let rows = variant.run(&store, &candidates).unwrap();
        assert!(rows.is_empty(), "{variant} returned {} rows", rows.len());
    }
}

// ── End-to-end ──────────────────────────────────────────────────────

#[test]
fn fresh_table_server_and_client_counts_match() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&temp_store_config(&dir)).unwrap();
    let mut generator = RecordGenerator::new(2024);
    assert_eq!(reset_and_populate(&store, &mut generator, 2_000).unwrap(), 2_000);

    let candidates = CandidateSet::odd();
    let server = store.select_where(&candidates, Order::ByCounter).unwrap();
    let client = filter_records(&store.select_all().unwrap(), &candidates);
    assert_eq!(server.len(), client.len());
    assert_eq!(ids(&server), ids(&client));
    assert!(!server.is_empty());
}

#[test]
fn populate_entry_point_truncates_first() {
    let dir = tempfile::tempdir().unwrap();
    let config = BenchConfig {
        num_records: 120,
        store: temp_store_config(&dir),
        seed: None,
        ..BenchConfig::default()
    };

    assert_eq!(populate_with_config(&config, true).unwrap(), 120);
    assert_eq!(populate_with_config(&config, true).unwrap(), 120);

    let store = SqliteStore::open(&config.store).unwrap();
    assert_eq!(store.count().unwrap(), 120);
}

#[test]
fn rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = temp_store_config(&dir);
    let written: Vec<Record> = RecordGenerator::new(5).take(25).collect();
    {
        let store = SqliteStore::open(&config).unwrap();
        for rec in &written {
            store.insert(rec).unwrap();
        }
    }
    let store = SqliteStore::open(&config).unwrap();
    let read = store.select_all_ordered().unwrap();
    assert_eq!(read, written);
}

#[test]
fn harness_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&temp_store_config(&dir)).unwrap();
    let mut generator = RecordGenerator::new(77);
    let plan = BenchPlan {
        record_counts: vec![100, 500],
        candidates: [0, 7].into_iter().collect(),
        warmup: 0,
        samples: 2,
        variants: QueryVariant::ALL.to_vec(),
    };

    let results = run_plan(&store, &mut generator, &plan).unwrap();
    let filtered: Vec<_> = results
        .iter()
        .filter(|r| r.record_count == 500 && r.variant.is_filtered())
        .collect();
    assert_eq!(filtered.len(), QueryVariant::FILTERED.len());
    assert!(filtered.iter().all(|r| r.rows == filtered[0].rows));
}

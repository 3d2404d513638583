//! Client-side dual-predicate filter.
//!
//! Selects the records whose `rstate` AND `rtype` are both members of a
//! candidate set, the in-process counterpart of
//! `WHERE rstate IN (..) AND rtype IN (..)`.

use crate::record::{CandidateSet, Record};
use std::collections::BTreeSet;

/// Single-pass form of the predicate.
pub fn matches(record: &Record, candidates: &CandidateSet) -> bool {
    candidates.contains(record.rstate) && candidates.contains(record.rtype)
}

/// Return the records matching on both `rstate` and `rtype`.
///
/// Builds the index set matching each column separately, intersects them
/// and gathers the surviving records. Callers must not rely on the order of
/// the result.
pub fn filter_records(records: &[Record], candidates: &CandidateSet) -> Vec<Record> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let matched_rstate: BTreeSet<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| candidates.contains(r.rstate))
        .map(|(i, _)| i)
        .collect();
    let matched_rtype: BTreeSet<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| candidates.contains(r.rtype))
        .map(|(i, _)| i)
        .collect();

    matched_rstate
        .intersection(&matched_rtype)
        .map(|&i| records[i].clone())
        .collect()
}

/// Same result as [`filter_records`] computed with [`matches`] in one pass.
pub fn filter_records_single_pass(records: &[Record], candidates: &CandidateSet) -> Vec<Record> {
    records
        .iter()
        .filter(|r| matches(r, candidates))
        .cloned()
        .collect()
}

//! Synthetic records: the row type stored in `testdata` and the generator
//! that fills it.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use uuid::Builder;

/// Alphabet used for generated names.
pub const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated name.
pub const NAME_LEN: usize = 191;

/// Domain shared by `rtype` and `rstate`.
pub const ID_INTS: [i32; 8] = [0, 1, 2, 3, 4, 5, 6, 7];

/// One row of `testdata`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub rtype: i32,
    pub rstate: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Record with the given attribute pair and placeholder id/name.
    /// Handy for building in-memory fixtures.
    pub fn with_attrs(id: impl Into<String>, rstate: i32, rtype: i32) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: String::new(),
            rtype,
            rstate,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Ordered, de-duplicated set of integers tested against both `rstate` and
/// `rtype`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet(BTreeSet<i32>);

impl CandidateSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// The set used by the benchmarks: `{1, 3, 5, 7}`.
    pub fn odd() -> Self {
        [1, 3, 5, 7].into_iter().collect()
    }

    pub fn contains(&self, value: i32) -> bool {
        self.0.contains(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<i32> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|v| v.to_string()).collect();
        write!(f, "{{{}}}", parts.join(","))
    }
}

/// Produces synthetic records from a single seeded RNG.
///
/// Seed it explicitly for reproducible data; [`RecordGenerator::from_entropy`]
/// seeds once for the lifetime of the generator.
pub struct RecordGenerator {
    rng: StdRng,
}

impl RecordGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded generator when `seed` is set, entropy-seeded otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    /// A value drawn uniformly from [`ID_INTS`].
    pub fn rand_int(&mut self) -> i32 {
        ID_INTS[self.rng.gen_range(0..ID_INTS.len())]
    }

    pub fn rand_name(&mut self) -> String {
        (0..NAME_LEN)
            .map(|_| CHARSET[self.rng.gen_range(0..CHARSET.len())] as char)
            .collect()
    }

    /// Version 4 UUID built from generator bytes, so a seeded generator
    /// yields the same ids on every run.
    pub fn rand_uuid(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        Builder::from_random_bytes(bytes).into_uuid().to_string()
    }

    pub fn make_record(&mut self) -> Record {
        let id = self.rand_uuid();
        let rstate = self.rand_int();
        let rtype = self.rand_int();
        let name = self.rand_name();
        let now = Utc::now();
        Record {
            id,
            name,
            rtype,
            rstate,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Iterator for RecordGenerator {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        Some(self.make_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seeded_generators_agree() {
        let a: Vec<Record> = RecordGenerator::new(42).take(20).collect();
        let b: Vec<Record> = RecordGenerator::new(42).take(20).collect();
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.name, y.name);
            assert_eq!((x.rstate, x.rtype), (y.rstate, y.rtype));
        }
    }

    #[test]
    fn values_stay_in_domain() {
        let mut gen = RecordGenerator::new(7);
        for _ in 0..500 {
            let rec = gen.make_record();
            assert!(ID_INTS.contains(&rec.rtype));
            assert!(ID_INTS.contains(&rec.rstate));
            assert_eq!(rec.name.len(), NAME_LEN);
            assert!(rec.name.bytes().all(|b| CHARSET.contains(&b)));
        }
    }

    #[test]
    fn every_domain_value_shows_up() {
        let mut gen = RecordGenerator::new(99);
        let seen: HashSet<i32> = (0..1000).map(|_| gen.rand_int()).collect();
        assert_eq!(seen.len(), ID_INTS.len());
    }

    #[test]
    fn ids_are_unique_v4_uuids() {
        let mut gen = RecordGenerator::new(1);
        let ids: HashSet<String> = (0..1000).map(|_| gen.rand_uuid()).collect();
        assert_eq!(ids.len(), 1000);
        for id in ids.iter().take(10) {
            let parsed = uuid::Uuid::parse_str(id).unwrap();
            assert_eq!(parsed.get_version_num(), 4);
        }
    }

    #[test]
    fn candidate_set_dedups_and_sorts() {
        let set: CandidateSet = [5, 1, 5, 3].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(set.to_string(), "{1,3,5}");
        assert!(CandidateSet::new().is_empty());
        assert!(CandidateSet::odd().contains(7));
    }
}

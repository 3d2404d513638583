//! The read paths being compared.
//!
//! Every filtered variant answers the same question: which rows have both
//! `rstate` and `rtype` in the candidate set. They differ in where and how
//! the predicate is evaluated.

pub mod builder;

use crate::filter::filter_records;
use crate::record::{CandidateSet, Record};
use crate::store::{Order, RowStore, StoreResult};
use builder::builder_query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryVariant {
    /// Full scan, no ordering.
    SelectAll,
    /// Full scan ordered by counter.
    SelectAllIndex,
    /// Server-side filter from hand-built placeholder SQL.
    FilterSql,
    /// Same as `FilterSql`, ordered by counter.
    IndexFilterSql,
    /// Server-side filter from sea-query generated SQL, ordered by counter.
    IndexFilterBuilder,
    /// Full scan, then [`filter_records`].
    FilterClient,
    /// Ordered full scan, then [`filter_records`].
    IndexFilterClient,
}

impl QueryVariant {
    pub const ALL: [QueryVariant; 7] = [
        QueryVariant::SelectAll,
        QueryVariant::SelectAllIndex,
        QueryVariant::FilterSql,
        QueryVariant::IndexFilterSql,
        QueryVariant::IndexFilterBuilder,
        QueryVariant::FilterClient,
        QueryVariant::IndexFilterClient,
    ];

    /// Variants that apply the candidate-set predicate.
    pub const FILTERED: [QueryVariant; 5] = [
        QueryVariant::FilterSql,
        QueryVariant::IndexFilterSql,
        QueryVariant::IndexFilterBuilder,
        QueryVariant::FilterClient,
        QueryVariant::IndexFilterClient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QueryVariant::SelectAll => "select_all",
            QueryVariant::SelectAllIndex => "select_all_index",
            QueryVariant::FilterSql => "filter_sql",
            QueryVariant::IndexFilterSql => "index_filter_sql",
            QueryVariant::IndexFilterBuilder => "index_filter_builder",
            QueryVariant::FilterClient => "filter_client",
            QueryVariant::IndexFilterClient => "index_filter_client",
        }
    }

    pub fn is_filtered(self) -> bool {
        !matches!(self, QueryVariant::SelectAll | QueryVariant::SelectAllIndex)
    }

    /// Execute this variant. `candidates` is ignored by the unfiltered scans.
    pub fn run(self, store: &dyn RowStore, candidates: &CandidateSet) -> StoreResult<Vec<Record>> {
        match self {
            QueryVariant::SelectAll => store.select_all(),
            QueryVariant::SelectAllIndex => store.select_all_ordered(),
            QueryVariant::FilterSql => store.select_where(candidates, Order::Unordered),
            QueryVariant::IndexFilterSql => store.select_where(candidates, Order::ByCounter),
            QueryVariant::IndexFilterBuilder => store.select_prepared(&builder_query(candidates)),
            QueryVariant::FilterClient => Ok(filter_records(&store.select_all()?, candidates)),
            QueryVariant::IndexFilterClient => {
                Ok(filter_records(&store.select_all_ordered()?, candidates))
            }
        }
    }
}

impl std::fmt::Display for QueryVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

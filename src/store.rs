//! Row store gateway: the `RowStore` trait and its SQLite implementation.

use crate::config::StoreConfig;
use crate::query::builder::{BoundValue, PreparedQuery};
use crate::record::{CandidateSet, Record};
use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, Connection, Row};
use thiserror::Error;

pub const TABLE: &str = "testdata";

/// Column list shared by every read.
pub const COLUMNS: [&str; 6] = ["id", "name", "rtype", "rstate", "created_at", "updated_at"];

/// Column used for ordered reads.
pub const ORDER_COLUMN: &str = "counter";

const SELECT_BASE: &str = "SELECT id, name, rtype, rstate, created_at, updated_at FROM testdata";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS testdata (
        counter    INTEGER PRIMARY KEY AUTOINCREMENT,
        id         TEXT NOT NULL UNIQUE,
        name       TEXT NOT NULL,
        rtype      INTEGER NOT NULL,
        rstate     INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_testdata_rtype ON testdata (rtype);
    CREATE INDEX IF NOT EXISTS idx_testdata_rstate ON testdata (rstate);";

const INSERT: &str = "INSERT INTO testdata (id, name, rtype, rstate, created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open {path}: {source}")]
    Connect {
        path: String,
        source: rusqlite::Error,
    },
    #[error("failed to prepare `{sql}`: {source}")]
    Prepare {
        sql: String,
        source: rusqlite::Error,
    },
    #[error("failed to execute `{sql}`: {source}")]
    Execute {
        sql: String,
        source: rusqlite::Error,
    },
    #[error("failed to read row: {0}")]
    Scan(rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whether a read orders rows by the counter column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Unordered,
    ByCounter,
}

/// Operations the benchmarks need from a relational table store.
pub trait RowStore {
    /// Create the table and its indexes if missing.
    fn create_table(&self) -> StoreResult<()>;

    /// Remove every row.
    fn truncate(&self) -> StoreResult<()>;

    /// Insert one record, returning the number of rows affected.
    fn insert(&self, record: &Record) -> StoreResult<usize>;

    /// Full scan, no ordering.
    fn select_all(&self) -> StoreResult<Vec<Record>>;

    /// Full scan ordered by the counter column.
    fn select_all_ordered(&self) -> StoreResult<Vec<Record>>;

    /// Rows with `rstate IN (candidates) AND rtype IN (candidates)` built from
    /// hand-written placeholder SQL.
    fn select_where(&self, candidates: &CandidateSet, order: Order) -> StoreResult<Vec<Record>>;

    /// Run a query produced by the query builder.
    fn select_prepared(&self, query: &PreparedQuery) -> StoreResult<Vec<Record>>;

    fn count(&self) -> StoreResult<usize>;

    /// Drop cached pages so timed reads start cold-ish.
    fn flush(&self) -> StoreResult<()>;
}

/// Build `SELECT ... WHERE rstate IN (?,..) AND rtype IN (?,..)` and its
/// parameters: the candidates once for `rstate`, then again for `rtype`.
pub fn where_sql(candidates: &CandidateSet, order: Order) -> (String, Vec<i32>) {
    let placeholders = vec!["?"; candidates.len()].join(",");
    let mut sql = format!(
        "{SELECT_BASE} WHERE rstate IN ({placeholders}) AND rtype IN ({placeholders})"
    );
    if order == Order::ByCounter {
        sql.push_str(" ORDER BY counter");
    }
    let params = candidates.iter().chain(candidates.iter()).collect();
    (sql, params)
}

/// SQLite-backed [`RowStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database named by `config` and make sure the
    /// table exists.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.path)
        }
        .map_err(|source| StoreError::Connect {
            path: config.path.clone(),
            source,
        })?;

        let store = Self { conn };
        store.configure(config)?;
        store.create_table()?;
        log::debug!("opened row store at {}", config.path);
        Ok(store)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    fn configure(&self, config: &StoreConfig) -> StoreResult<()> {
        // WAL does not apply to in-memory databases.
        let pragmas = if config.is_in_memory() {
            "PRAGMA synchronous = OFF;
             PRAGMA temp_store = MEMORY;"
        } else {
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA busy_timeout = 5000;"
        };
        self.exec_batch(pragmas)
    }

    fn exec_batch(&self, sql: &str) -> StoreResult<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|source| StoreError::Execute {
                sql: sql.to_string(),
                source,
            })
    }

    /// Prepare `sql`, bind `params`, and read every row as a [`Record`].
    fn query_records<P: ToSql>(&self, sql: &str, params: &[P]) -> StoreResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(sql).map_err(|source| StoreError::Prepare {
            sql: sql.to_string(),
            source,
        })?;
        let mut rows = stmt
            .query(params_from_iter(params.iter()))
            .map_err(|source| StoreError::Execute {
                sql: sql.to_string(),
                source,
            })?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().map_err(StoreError::Scan)? {
            results.push(scan_record(row).map_err(StoreError::Scan)?);
        }
        Ok(results)
    }
}

fn scan_record(row: &Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        name: row.get(1)?,
        rtype: row.get(2)?,
        rstate: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl RowStore for SqliteStore {
    fn create_table(&self) -> StoreResult<()> {
        self.exec_batch(CREATE_TABLE)
    }

    fn truncate(&self) -> StoreResult<()> {
        // No TRUNCATE in SQLite. Resetting sqlite_sequence restarts the
        // counter at 1, if the sequence table exists yet.
        self.exec_batch("DELETE FROM testdata;")?;
        let has_sequence: bool = self
            .conn
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE name = 'sqlite_sequence')",
                [],
                |r| r.get(0),
            )
            .map_err(StoreError::Scan)?;
        if has_sequence {
            self.exec_batch("DELETE FROM sqlite_sequence WHERE name = 'testdata';")?;
        }
        Ok(())
    }

    fn insert(&self, record: &Record) -> StoreResult<usize> {
        self.conn
            .execute(
                INSERT,
                params![
                    record.id,
                    record.name,
                    record.rtype,
                    record.rstate,
                    record.created_at,
                    record.updated_at,
                ],
            )
            .map_err(|source| StoreError::Execute {
                sql: INSERT.to_string(),
                source,
            })
    }

    fn select_all(&self) -> StoreResult<Vec<Record>> {
        self.query_records::<i32>(SELECT_BASE, &[])
    }

    fn select_all_ordered(&self) -> StoreResult<Vec<Record>> {
        self.query_records::<i32>(&format!("{SELECT_BASE} ORDER BY counter"), &[])
    }

    fn select_where(&self, candidates: &CandidateSet, order: Order) -> StoreResult<Vec<Record>> {
        let (sql, params) = where_sql(candidates, order);
        self.query_records(&sql, &params)
    }

    fn select_prepared(&self, query: &PreparedQuery) -> StoreResult<Vec<Record>> {
        self.query_records::<BoundValue>(&query.sql, &query.params)
    }

    fn count(&self) -> StoreResult<usize> {
        let sql = "SELECT COUNT(*) FROM testdata";
        let n: i64 = self
            .conn
            .query_row(sql, [], |r| r.get(0))
            .map_err(|source| StoreError::Execute {
                sql: sql.to_string(),
                source,
            })?;
        Ok(n as usize)
    }

    fn flush(&self) -> StoreResult<()> {
        self.exec_batch("PRAGMA shrink_memory;")
    }
}

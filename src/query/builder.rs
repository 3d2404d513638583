//! Dual-predicate query built with sea-query, and binding of its values to
//! rusqlite statements.

use crate::record::CandidateSet;
use crate::store::{COLUMNS, ORDER_COLUMN, TABLE};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue};
use sea_query::{Alias, Expr, Order, Query, SqliteQueryBuilder, Value};

/// A sea-query value bound as a rusqlite parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundValue(pub Value);

impl ToSql for BoundValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match &self.0 {
            Value::Bool(v) => v.map(|b| SqlValue::Integer(b as i64)),
            Value::TinyInt(v) => v.map(|x| SqlValue::Integer(x.into())),
            Value::SmallInt(v) => v.map(|x| SqlValue::Integer(x.into())),
            Value::Int(v) => v.map(|x| SqlValue::Integer(x.into())),
            Value::BigInt(v) => v.map(SqlValue::Integer),
            Value::TinyUnsigned(v) => v.map(|x| SqlValue::Integer(x.into())),
            Value::SmallUnsigned(v) => v.map(|x| SqlValue::Integer(x.into())),
            Value::Unsigned(v) => v.map(|x| SqlValue::Integer(x.into())),
            Value::BigUnsigned(v) => match v {
                Some(x) => Some(SqlValue::Integer(
                    i64::try_from(*x)
                        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?,
                )),
                None => None,
            },
            Value::Float(v) => v.map(|x| SqlValue::Real(x.into())),
            Value::Double(v) => v.map(SqlValue::Real),
            Value::String(v) => v.as_ref().map(|s| SqlValue::Text(s.to_string())),
            Value::Bytes(v) => v.as_ref().map(|b| SqlValue::Blob(b.to_vec())),
            #[allow(unreachable_patterns)]
            other => {
                return Err(rusqlite::Error::ToSqlConversionFailure(
                    format!("unsupported parameter {other:?}").into(),
                ))
            }
        };
        Ok(ToSqlOutput::Owned(value.unwrap_or(SqlValue::Null)))
    }
}

/// SQL text with `?` placeholders and the values to bind, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub sql: String,
    pub params: Vec<BoundValue>,
}

/// `SELECT .. WHERE rstate IN (..) AND rtype IN (..) ORDER BY counter ASC`
/// rendered by sea-query for SQLite.
pub fn builder_query(candidates: &CandidateSet) -> PreparedQuery {
    let (sql, values) = Query::select()
        .columns(COLUMNS.iter().map(|c| Alias::new(*c)))
        .from(Alias::new(TABLE))
        .and_where(Expr::col(Alias::new("rstate")).is_in(candidates.iter()))
        .and_where(Expr::col(Alias::new("rtype")).is_in(candidates.iter()))
        .order_by(Alias::new(ORDER_COLUMN), Order::Asc)
        .build(SqliteQueryBuilder);

    PreparedQuery {
        sql,
        params: values.0.into_iter().map(BoundValue).collect(),
    }
}

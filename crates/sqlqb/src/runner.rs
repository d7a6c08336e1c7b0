//! Execution capability injected into statement builders.
//!
//! sqlqb never talks to a database itself. A [`Runner`] receives the final SQL
//! (already rewritten to the builder's placeholder format) and the ordered
//! arguments, and hands them to a driver.

use crate::error::QbResult;
use crate::qb::Value;
use std::fmt;

/// Synchronous execution backend.
///
/// # Example
/// ```ignore
/// #[derive(Debug)]
/// struct Recorder(Mutex<Vec<String>>);
///
/// impl Runner for Recorder {
///     fn exec(&self, sql: &str, _args: &[Value]) -> QbResult<u64> {
///         self.0.lock().unwrap().push(sql.to_string());
///         Ok(0)
///     }
///
///     fn query(&self, sql: &str, _args: &[Value]) -> QbResult<Vec<Row>> {
///         self.0.lock().unwrap().push(sql.to_string());
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Runner: fmt::Debug + Send + Sync {
    /// Execute a statement and return the affected row count.
    fn exec(&self, sql: &str, args: &[Value]) -> QbResult<u64>;

    /// Execute a query and return all rows.
    fn query(&self, sql: &str, args: &[Value]) -> QbResult<Vec<Row>>;

    /// Execute a query and return the first row, if any.
    ///
    /// The default implementation calls [`Runner::query`] and keeps the first row.
    fn query_row(&self, sql: &str, args: &[Value]) -> QbResult<Option<Row>> {
        Ok(self.query(sql, args)?.into_iter().next())
    }
}

/// One result row as an ordered list of values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Value at column `idx` (0-based).
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// Maximum SQL length (bytes) included in log events.
#[cfg(feature = "tracing")]
const MAX_LOGGED_SQL: usize = 200;

#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Emit the statement about to be handed to the runner.
pub(crate) fn trace_sql(operation: &'static str, sql: &str, param_count: usize) {
    #[cfg(feature = "tracing")]
    {
        if sql.len() > MAX_LOGGED_SQL {
            let shown = format!("{}...", truncate_sql_bytes(sql, MAX_LOGGED_SQL));
            tracing::debug!(target: "sqlqb.sql", operation, param_count, sql = %shown);
        } else {
            tracing::debug!(target: "sqlqb.sql", operation, param_count, sql = %sql);
        }
    }

    #[cfg(not(feature = "tracing"))]
    let _ = (operation, sql, param_count);
}

/// Report a render failure before it is returned to the caller.
pub(crate) fn trace_render_error(err: &crate::error::QbError) {
    #[cfg(feature = "tracing")]
    tracing::warn!(target: "sqlqb.sql", error = %err, "failed to render statement");

    #[cfg(not(feature = "tracing"))]
    let _ = err;
}


#[cfg(test)]
mod row_tests {
    use super::*;

    #[test]
    fn test_row_accessors() {
        let row = Row::new(vec![Value::Int(1), Value::Text("a".into())]);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(1), Some(&Value::Text("a".into())));
        assert_eq!(row.get(2), None);
        assert!(!row.is_empty());
        assert_eq!(row.values()[0], Value::Int(1));

        let values = row.into_values();
        assert_eq!(values.len(), 2);
        assert!(Row::from(Vec::new()).is_empty());
    }
}

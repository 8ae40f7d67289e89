use rusqlite::types::ValueRef;
use rusqlite::{Batch, Connection};
use serde::Serialize;
use std::error::Error;
use std::fmt;

/// One result row keyed by column name, in projection order.
pub type Row = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub columns: Vec<String>,
    pub row_count: usize,
}

/// Engine-level failure while running an already validated statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionError(pub String);

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for ExecutionError {}

impl From<rusqlite::Error> for ExecutionError {
    fn from(err: rusqlite::Error) -> Self {
        ExecutionError(err.to_string())
    }
}

/// Runs statements that already passed the safety gate.
///
/// Implementations perform no safety checks of their own.
pub trait SqlExecutor: Send + Sync {
    fn execute(&self, sql: &str) -> Result<QueryResult, ExecutionError>;
}

pub const MULTIPLE_STATEMENTS: &str = "You can only execute one statement at a time.";

/// Runs `sql` on `conn` and materializes every row.
///
/// Exactly one statement is accepted. Trailing semicolons, whitespace and
/// comments are fine; anything after them is refused.
pub(crate) fn run_query(conn: &Connection, sql: &str) -> Result<QueryResult, ExecutionError> {
    let mut batch = Batch::new(conn, sql);
    let mut stmt = batch
        .next()?
        .ok_or_else(|| ExecutionError("Query contains no statement".to_string()))?;

    // prepare() alone ignores the tail
    if !matches!(batch.next(), Ok(None)) {
        return Err(ExecutionError(MULTIPLE_STATEMENTS.to_string()));
    }

    // Statements without a result set report no columns
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        let mut record = Row::new();
        for (idx, name) in columns.iter().enumerate() {
            record.insert(name.clone(), to_json(row.get_ref(idx)?));
        }
        rows.push(record);
    }

    Ok(QueryResult {
        row_count: rows.len(),
        rows,
        columns,
    })
}

fn to_json(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(i) => serde_json::Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
        ValueRef::Blob(bytes) => {
            serde_json::Value::Array(bytes.iter().map(|b| serde_json::Value::from(*b)).collect())
        }
    }
}

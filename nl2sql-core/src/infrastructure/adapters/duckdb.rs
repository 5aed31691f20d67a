// nl2sql-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::types::{TimeUnit, Value};
use duckdb::{AccessMode, Config, Connection};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

// Imports Hexagonaux
use crate::domain::{QueryOutput, Row, SqlValue};
use crate::infrastructure::error::{DatabaseError, InfrastructureError};
use crate::ports::executor::QueryExecutor;

pub struct DuckDBExecutor {
    // Root handle. Every execution checks out its own connection from it.
    db: Arc<Mutex<Connection>>,
    active: Arc<AtomicUsize>,
}

impl DuckDBExecutor {
    /// Opens the database. `read_only` is the least-privilege mode the gateway
    /// should run with; it is ignored for `:memory:` (DuckDB refuses it).
    ///
    /// External access is always off: no file, URL or extension reads, whatever
    /// table function a generated statement calls.
    pub fn new(db_path: &str, read_only: bool) -> Result<Self, InfrastructureError> {
        let conn = if db_path == ":memory:" {
            if read_only {
                warn!("In-memory database cannot be opened read-only, continuing read-write");
            }
            Connection::open_in_memory_with_flags(locked_down(Config::default())?)?
        } else {
            let config = if read_only {
                Config::default().access_mode(AccessMode::ReadOnly)?
            } else {
                Config::default()
            };
            Connection::open_with_flags(db_path, locked_down(config)?)?
        };

        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Wraps an already opened connection (in-memory fixtures, embedding).
    /// External access is switched off on it before the first query.
    pub fn from_connection(conn: Connection) -> Result<Self, InfrastructureError> {
        conn.execute_batch(
            "SET autoinstall_known_extensions = false;
             SET autoload_known_extensions = false;
             SET enable_external_access = false;",
        )?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
            active: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Worker threads still running a statement, interrupted ones included.
    pub fn active_queries(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    fn checkout(&self) -> Result<Connection, InfrastructureError> {
        let root = self.db.lock().map_err(|_| DatabaseError::Poisoned)?;
        Ok(root.try_clone()?)
    }
}

fn locked_down(config: Config) -> Result<Config, InfrastructureError> {
    Ok(config
        .enable_external_access(false)?
        .enable_autoload_extension(false)?
        .with("autoinstall_known_extensions", "false")?)
}

/// Counts a blocking worker from spawn until its connection is released.
struct ActiveQuery(Arc<AtomicUsize>);

impl ActiveQuery {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for ActiveQuery {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Interrupts the running query when dropped, unless disarmed first.
/// Covers both the timeout path and a caller dropping the future mid-read.
struct InterruptGuard {
    interrupt: Option<Box<dyn FnOnce() + Send>>,
}

impl InterruptGuard {
    fn new(conn: &Connection) -> Self {
        let handle = conn.interrupt_handle();
        Self {
            interrupt: Some(Box::new(move || handle.interrupt())),
        }
    }

    fn disarm(mut self) {
        self.interrupt = None;
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        if let Some(interrupt) = self.interrupt.take() {
            debug!("🛑 Interrupting in-flight query");
            interrupt();
        }
    }
}

#[async_trait]
impl QueryExecutor for DuckDBExecutor {
    async fn execute(
        &self,
        sql: &str,
        row_cap: usize,
        timeout: Duration,
    ) -> Result<QueryOutput, InfrastructureError> {
        let conn = self.checkout()?;
        let guard = InterruptGuard::new(&conn);

        // The connection moves into the worker and is dropped there on every path.
        let sql = sql.to_string();
        let active = ActiveQuery::enter(&self.active);
        let worker = tokio::task::spawn_blocking(move || {
            let _active = active;
            run_bounded(conn, &sql, row_cap)
        });

        match tokio::time::timeout(timeout, worker).await {
            Ok(Ok(result)) => {
                guard.disarm();
                result
            }
            Ok(Err(join_error)) => {
                guard.disarm();
                Err(DatabaseError::Worker(join_error.to_string()).into())
            }
            Err(_) => {
                warn!(?timeout, "Query timed out, interrupting");
                drop(guard);
                Err(DatabaseError::Timeout(timeout).into())
            }
        }
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}

fn run_bounded(
    conn: Connection,
    sql: &str,
    row_cap: usize,
) -> Result<QueryOutput, InfrastructureError> {
    let mut stmt = conn.prepare(sql)?;
    let mut cursor = stmt.query([])?;

    // Column names come from the result schema, before any row is consumed.
    let columns: Vec<String> = cursor
        .as_ref()
        .map(|s| s.column_names())
        .unwrap_or_default();

    let mut rows = Vec::new();
    while rows.len() < row_cap {
        let Some(row) = cursor.next()? else {
            break;
        };

        let mut record = Row::new();
        for (idx, name) in columns.iter().enumerate() {
            let value: Value = row.get(idx)?;
            record.insert(name.clone(), to_sql_value(value));
        }
        rows.push(record);
    }

    if rows.len() == row_cap {
        debug!(row_cap, "Row cap reached, remaining rows discarded");
    }

    Ok(QueryOutput { columns, rows })
}

fn to_sql_value(value: Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Boolean(b) => SqlValue::Bool(b),
        Value::TinyInt(i) => SqlValue::Integer(i.into()),
        Value::SmallInt(i) => SqlValue::Integer(i.into()),
        Value::Int(i) => SqlValue::Integer(i.into()),
        Value::BigInt(i) => SqlValue::Integer(i),
        Value::UTinyInt(i) => SqlValue::Integer(i.into()),
        Value::USmallInt(i) => SqlValue::Integer(i.into()),
        Value::UInt(i) => SqlValue::Integer(i.into()),
        Value::UBigInt(i) => i64::try_from(i)
            .map(SqlValue::Integer)
            .unwrap_or_else(|_| SqlValue::Text(i.to_string())),
        Value::HugeInt(i) => i64::try_from(i)
            .map(SqlValue::Integer)
            .unwrap_or_else(|_| SqlValue::Text(i.to_string())),
        Value::Float(f) => SqlValue::Float(f.into()),
        Value::Double(f) => SqlValue::Float(f),
        Value::Decimal(d) => {
            let text = d.to_string();
            text.parse::<f64>()
                .map(SqlValue::Float)
                .unwrap_or(SqlValue::Text(text))
        }
        Value::Text(s) => SqlValue::Text(s),
        Value::Timestamp(unit, v) => timestamp_value(unit, v),
        Value::Date32(days) => days
            .checked_add(DAYS_CE_TO_EPOCH)
            .and_then(chrono::NaiveDate::from_num_days_from_ce_opt)
            .map(|d| SqlValue::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(SqlValue::Integer(days.into())),
        Value::Blob(bytes) => SqlValue::Text(bytes.iter().map(|b| format!("{:02x}", b)).collect()),
        other => SqlValue::Text(format!("{:?}", other)),
    }
}

// 0001-01-01 -> 1970-01-01
const DAYS_CE_TO_EPOCH: i32 = 719_163;

fn timestamp_value(unit: TimeUnit, value: i64) -> SqlValue {
    let micros = match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    };
    chrono::DateTime::from_timestamp_micros(micros)
        .map(|dt| {
            SqlValue::Text(
                dt.naive_utc()
                    .format("%Y-%m-%dT%H:%M:%S%.f")
                    .to_string(),
            )
        })
        .unwrap_or(SqlValue::Integer(value))
}

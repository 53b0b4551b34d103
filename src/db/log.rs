use crate::db::initialize::open_log_db;
use crate::errors::AppResult;
use crate::ui::messages::warning_stderr;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// One row of the `log` table.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// One row of the `exports` table.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub id: i64,
    pub created_at: String,
    pub path: String,
    pub start_date: String,
    pub end_date: String,
    pub rows: i64,
    pub matched: i64,
    pub faults: i64,
}

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    // local timestamp, ISO 8601
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Run `write` against the run-log database. Failures only print a
/// warning: the calling command still succeeds.
pub fn log_quietly<F>(db_path: &str, write: F)
where
    F: FnOnce(&Connection) -> AppResult<()>,
{
    if let Err(e) = open_log_db(db_path).and_then(|pool| write(&pool.conn)) {
        warning_stderr(format!("Failed to write internal log: {e}"));
    }
}

/// Remember a written export file.
pub fn record_export(conn: &Connection, rec: &ExportRecord) -> AppResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO exports (created_at, path, start_date, end_date, rows, matched, faults)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;

    stmt.execute(params![
        Local::now().to_rfc3339(),
        rec.path,
        rec.start_date,
        rec.end_date,
        rec.rows,
        rec.matched,
        rec.faults
    ])?;

    Ok(())
}

pub fn load_log(conn: &Connection) -> AppResult<Vec<LogEntry>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, COALESCE(target, ''), message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get(3)?,
            message: row.get(4)?,
        })
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }
    Ok(entries)
}

pub fn load_exports(conn: &Connection) -> AppResult<Vec<ExportRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, created_at, path, start_date, end_date, rows, matched, faults
         FROM exports ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ExportRecord {
            id: row.get(0)?,
            created_at: row.get(1)?,
            path: row.get(2)?,
            start_date: row.get(3)?,
            end_date: row.get(4)?,
            rows: row.get(5)?,
            matched: row.get(6)?,
            faults: row.get(7)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

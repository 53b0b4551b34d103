use rusqlite::{Connection, OptionalExtension, Result, params};

/// Ordered schema steps. Each one is applied once and recorded in `log`.
const MIGRATIONS: [(&str, &str, &str); 2] = [
    (
        "20250301_0001_create_exports",
        r#"
        CREATE TABLE IF NOT EXISTS exports (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL,
            path       TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date   TEXT NOT NULL,
            rows       INTEGER NOT NULL,
            matched    INTEGER NOT NULL,
            faults     INTEGER NOT NULL DEFAULT 0
        );
        "#,
        "Created exports table",
    ),
    (
        "20250301_0002_index_log_operation",
        "CREATE INDEX IF NOT EXISTS idx_log_operation ON log(operation);",
        "Indexed log by operation",
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Returns the versions applied now.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for (version, sql, message) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(sql)?;
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            params![version, message],
        )?;
        applied.push(version);
    }

    Ok(applied)
}

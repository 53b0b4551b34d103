//! Load a table or view of a volume database into a [`VolumeTable`].

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::VolumeTable;
use rusqlite::types::ValueRef;

/// Quote an identifier for SQLite (`data query` → `"data query"`).
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn cell(v: ValueRef<'_>) -> Option<String> {
    match v {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) | ValueRef::Blob(t) => Some(String::from_utf8_lossy(t).into_owned()),
    }
}

/// `SELECT *` from `query`, every value as text.
pub fn load_query(pool: &DbPool, query: &str) -> AppResult<VolumeTable> {
    let mut stmt = pool
        .conn
        .prepare(&format!("SELECT * FROM {}", quote_ident(query)))?;

    let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    let mut q = stmt.query([])?;
    while let Some(row) = q.next()? {
        let mut cells = Vec::with_capacity(width);
        for i in 0..width {
            cells.push(cell(row.get_ref(i)?));
        }
        rows.push(cells);
    }

    Ok(VolumeTable { columns, rows })
}

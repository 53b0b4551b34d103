use crate::errors::{AppError, AppResult};
use crate::models::{MergedSet, VolumeTable};
use csv::Writer;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write the merged rows to `path` (header included).
///
/// Data goes to a temporary file next to `path` which is renamed into place
/// only after a complete flush, so a failed run never leaves a partial
/// `path` behind.
pub fn write_merged(path: &Path, merged: &MergedSet) -> AppResult<()> {
    write_atomic(path, |out| {
        let mut wtr = Writer::from_writer(out);
        wtr.write_record(merged.headers())?;
        for row in &merged.rows {
            wtr.write_record(merged.record(row))?;
        }
        wtr.flush()?;
        Ok(())
    })
}

/// Write a volume table as CSV; SQL NULLs become empty cells.
pub fn write_volume(path: &Path, table: &VolumeTable) -> AppResult<()> {
    write_atomic(path, |out| {
        let mut wtr = Writer::from_writer(out);
        wtr.write_record(&table.columns)?;
        for row in &table.rows {
            wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        wtr.flush()?;
        Ok(())
    })
}

fn write_atomic<F>(path: &Path, fill: F) -> AppResult<()>
where
    F: FnOnce(&mut NamedTempFile) -> AppResult<()>,
{
    let fail = |reason: String| AppError::Write {
        path: path.display().to_string(),
        reason,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // dropping the NamedTempFile on error removes it
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fail(e.to_string()))?;
    fill(&mut tmp).map_err(|e| fail(e.to_string()))?;
    tmp.as_file_mut()
        .sync_all()
        .map_err(|e| fail(e.to_string()))?;
    tmp.persist(path).map_err(|e| fail(e.error.to_string()))?;

    Ok(())
}

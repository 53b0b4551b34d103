// src/export/mod.rs

mod csv;
mod fs_utils;

pub use self::csv::{write_merged, write_volume};
pub use fs_utils::ensure_writable;

use crate::ui::messages::success;
use std::path::Path;

/// Shared completion message for every export.
pub(crate) fn export_summary(label: &str, path: &Path, rows: usize) -> String {
    format!("{label} export completed: {} ({rows} rows)", path.display())
}

pub(crate) fn notify_export_success(label: &str, path: &Path, rows: usize) {
    success(export_summary(label, path, rows));
}

//! Export pipeline: validate → extract → (no data?) → merge → number → write.
//!
//! Everything here takes explicit arguments; the CLI layer only reads flags
//! and config, calls [`run_export`] and reports the [`ExportOutcome`].

use crate::core::extract::extract_rows;
use crate::core::merge::{load_periods, merge_periods};
use crate::core::sequence::{next_sequence, output_path};
use crate::errors::{AppError, AppResult};
use crate::export::write_merged;
use crate::models::FileFault;
use crate::utils::date::parse_sheet_date;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs of one export run.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub folder: &'a Path,
    pub start: &'a str,
    pub end: &'a str,
    pub periods_file: &'a Path,
    pub output_dir: &'a Path,
}

#[derive(Debug)]
pub enum ExportOutcome {
    /// A new numbered file was written.
    Written {
        path: PathBuf,
        rows: usize,
        matched: usize,
        faults: Vec<FileFault>,
    },
    /// No row fell inside the range; nothing was written.
    NoData { faults: Vec<FileFault> },
}

impl ExportOutcome {
    pub fn faults(&self) -> &[FileFault] {
        match self {
            ExportOutcome::Written { faults, .. } | ExportOutcome::NoData { faults } => faults,
        }
    }
}

/// Parse and order-check the requested bounds.
pub fn validate_range(start: &str, end: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let s = parse_sheet_date(start).ok_or_else(|| AppError::InvalidDate(start.to_string()))?;
    let e = parse_sheet_date(end).ok_or_else(|| AppError::InvalidDate(end.to_string()))?;

    if s > e {
        return Err(AppError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok((s, e))
}

/// The output directory must exist as a directory, or be creatable: its
/// nearest existing ancestor has to be a directory. Nothing is created here.
pub fn check_output_dir(dir: &Path) -> AppResult<()> {
    let fail = |at: &Path| AppError::Write {
        path: dir.display().to_string(),
        reason: format!("{} exists and is not a directory", at.display()),
    };

    for ancestor in dir.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        if ancestor.is_dir() {
            return Ok(());
        }
        if ancestor.exists() {
            return Err(fail(ancestor));
        }
    }
    Ok(())
}

pub fn run_export(req: &ExportRequest<'_>) -> AppResult<ExportOutcome> {
    // 1️⃣ preconditions: nothing is written if any of these fail
    if !req.folder.is_dir() {
        return Err(AppError::FolderNotFound(req.folder.display().to_string()));
    }

    let (start, end) = validate_range(req.start, req.end)?;

    check_output_dir(req.output_dir)?;

    let periods = load_periods(req.periods_file)?;

    // 2️⃣ extraction
    let extraction = extract_rows(req.folder, start, end)?;
    if extraction.is_empty() {
        return Ok(ExportOutcome::NoData {
            faults: extraction.faults,
        });
    }

    // 3️⃣ merge + numbering
    let merged = merge_periods(extraction.rows, &periods);
    let n = next_sequence(req.output_dir)?;
    let path = output_path(req.output_dir, n);

    // 4️⃣ write
    fs::create_dir_all(req.output_dir).map_err(|e| AppError::Write {
        path: req.output_dir.display().to_string(),
        reason: e.to_string(),
    })?;
    write_merged(&path, &merged)?;

    Ok(ExportOutcome::Written {
        path,
        rows: merged.len(),
        matched: merged.matched(),
        faults: extraction.faults,
    })
}

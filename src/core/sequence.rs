//! Output numbering: `filtered_merged_data_<N>.csv`.
//!
//! The next number is recovered from the output directory each run; nothing
//! is reserved, so two concurrent runs against the same directory can pick
//! the same number.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const OUTPUT_PREFIX: &str = "filtered_merged_data_";
pub const OUTPUT_EXT: &str = "csv";

fn output_pattern() -> AppResult<Regex> {
    Regex::new(&format!(r"^{OUTPUT_PREFIX}([0-9]+)\.{OUTPUT_EXT}$"))
        .map_err(|e| AppError::Other(e.to_string()))
}

/// Sequence number carried by `name`, if it follows the output pattern.
pub fn sequence_of(re: &Regex, name: &str) -> Option<u64> {
    re.captures(name)?.get(1)?.as_str().parse().ok()
}

/// `max(N) + 1` over the matching files in `dir`, or 1 when there are none.
/// A directory that does not exist yet counts as empty. Fails when the
/// highest number is already `u64::MAX`.
pub fn next_sequence(dir: &Path) -> AppResult<u64> {
    let re = output_pattern()?;

    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(1),
        Err(e) => return Err(e.into()),
    };

    let mut max = 0u64;
    for entry in entries {
        let entry = entry?;
        if let Some(n) = entry.file_name().to_str().and_then(|s| sequence_of(&re, s)) {
            max = max.max(n);
        }
    }

    max.checked_add(1).ok_or_else(|| {
        AppError::SequenceExhausted(output_path(dir, max).display().to_string())
    })
}

pub fn output_path(dir: &Path, n: u64) -> PathBuf {
    dir.join(format!("{OUTPUT_PREFIX}{n}.{OUTPUT_EXT}"))
}

// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info_stderr, warning_stderr};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Check whether a file may be created or overwritten.
///
/// - file does not exist → Ok
/// - file exists and `force` → Ok
/// - file exists and `!force` → ask the user on stdin.
///
/// The prompt goes to stderr, leaving stdout to the command's own output.
pub fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    ensure_writable_with(path, force, &mut io::stdin().lock())
}

pub(crate) fn ensure_writable_with<R: BufRead>(
    path: &Path,
    force: bool,
    input: &mut R,
) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning_stderr(format!("The file '{}' already exists.", path.display()));

    eprint!("Overwrite? [y/N]: ");
    io::stderr().flush().ok();

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info_stderr("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "cancelled: existing file not overwritten".to_string(),
        ))
    }
}

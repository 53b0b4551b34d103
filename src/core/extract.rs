//! Row extraction: read every timesheet file of a folder and keep the rows
//! whose `sheetStart` falls inside an inclusive date range.

use crate::errors::{AppError, AppResult};
use crate::models::row::REQUIRED_COLUMNS;
use crate::models::{FileFault, TimesheetRecord, TimesheetRow};
use crate::utils::date::parse_sheet_date;
use crate::utils::path::{file_label, list_files_with_ext};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Extensions recognised as timesheet files.
pub const TABULAR_EXTS: [&str; 1] = ["csv"];

/// Rows kept across all files, plus the files that had to be skipped.
#[derive(Debug, Default)]
pub struct Extraction {
    pub rows: Vec<TimesheetRow>,
    pub faults: Vec<FileFault>,
    pub files_scanned: usize,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Extract rows with `start <= sheetStart <= end` from `folder`.
///
/// Files are visited in file-name order and rows keep their order inside a
/// file. A file that cannot be read is recorded in `faults` and skipped; only
/// an unreadable folder fails the whole call.
pub fn extract_rows(folder: &Path, start: NaiveDate, end: NaiveDate) -> AppResult<Extraction> {
    let mut out = Extraction::default();

    for path in tabular_files(folder)? {
        out.files_scanned += 1;
        let name = file_label(&path);

        let records = match read_records(&path) {
            Ok(r) => r,
            Err(e) => {
                out.faults.push(FileFault {
                    file: name,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        out.rows.extend(records.into_iter().filter_map(|rec| {
            let date = parse_sheet_date(&rec.sheet_start)?;
            (start..=end)
                .contains(&date)
                .then(|| TimesheetRow::new(rec, date, &name))
        }));
    }

    Ok(out)
}

/// Distinct valid `sheetStart` dates across the folder, ascending.
pub fn available_dates(folder: &Path) -> AppResult<(BTreeSet<NaiveDate>, Vec<FileFault>)> {
    let mut dates = BTreeSet::new();
    let mut faults = Vec::new();

    for path in tabular_files(folder)? {
        match read_records(&path) {
            Ok(records) => {
                dates.extend(records.iter().filter_map(|r| parse_sheet_date(&r.sheet_start)));
            }
            Err(e) => faults.push(FileFault {
                file: file_label(&path),
                reason: e.to_string(),
            }),
        }
    }

    Ok((dates, faults))
}

fn tabular_files(folder: &Path) -> AppResult<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(AppError::FolderNotFound(folder.display().to_string()));
    }
    list_files_with_ext(folder, &TABULAR_EXTS)
        .map_err(|e| AppError::FolderNotFound(format!("{}: {e}", folder.display())))
}

/// Read the required columns of one file. Any parse problem fails the file.
pub fn read_records(path: &Path) -> AppResult<Vec<TimesheetRecord>> {
    let mut rdr = open_checked(path)?;
    let records = rdr.deserialize().collect::<Result<Vec<TimesheetRecord>, _>>()?;
    Ok(records)
}

fn open_checked(path: &Path) -> AppResult<csv::Reader<File>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_path(path)?;
    let headers = rdr.headers()?;

    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(AppError::MissingColumn {
            file: file_label(path),
            column: missing.to_string(),
        });
    }

    Ok(rdr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "sheetStart,shift,section,employeeCode,employeeName,category,subCategory,activityCode,activity,blockStart,periodStart,periodName,workedStart,workedMinutes";

    fn line(date: &str, minutes: &str) -> String {
        format!("{date},A,S1,E1,Ann,Direct,Pick,P01,Picking,06:00,06:00,Morning,06:05,{minutes}")
    }

    fn d(s: &str) -> NaiveDate {
        parse_sheet_date(s).unwrap()
    }

    fn write(dir: &Path, name: &str, lines: &[String]) {
        let mut body = String::from(HEADER);
        for l in lines {
            body.push('\n');
            body.push_str(l);
        }
        body.push('\n');
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn keeps_only_rows_inside_inclusive_range() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.csv",
            &[
                line("2025-03-01", "60"),
                line("2025-03-02 06:00:00", "30"),
                line("2025-03-05", "15"),
                line("2025-03-06", "15"),
                line("bad-date", "15"),
            ],
        );

        let out = extract_rows(dir.path(), d("2025-03-02"), d("2025-03-05")).unwrap();
        let dates: Vec<_> = out.rows.iter().map(|r| r.sheet_date).collect();
        assert_eq!(dates, vec![d("2025-03-02"), d("2025-03-05")]);
        assert!(out.faults.is_empty());
        assert_eq!(out.rows[0].source_file, "a.csv");
        assert_eq!(out.rows[0].worked_hours, Some(0.5));
    }

    #[test]
    fn non_numeric_minutes_give_null_hours() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.csv",
            &[line("2025-03-01", ""), line("2025-03-01", "n/a")],
        );

        let out = extract_rows(dir.path(), d("2025-03-01"), d("2025-03-01")).unwrap();
        assert_eq!(out.rows.len(), 2);
        assert!(out.rows.iter().all(|r| r.worked_hours.is_none()));
    }

    #[test]
    fn broken_file_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.csv", &[line("2025-03-01", "60")]);
        write(
            dir.path(),
            "broken.csv",
            &[line("2025-03-01", "60"), "2025-03-01,only,three".to_string()],
        );
        fs::write(dir.path().join("no_cols.csv"), "foo,bar\n1,2\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let out = extract_rows(dir.path(), d("2025-03-01"), d("2025-03-31")).unwrap();
        assert_eq!(out.files_scanned, 3);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].source_file, "good.csv");

        let bad: Vec<_> = out.faults.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(bad, vec!["broken.csv", "no_cols.csv"]);
        assert!(out.faults[1].reason.contains("sheetStart"));
    }

    #[test]
    fn files_are_visited_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.csv", &[line("2025-03-01", "1")]);
        write(dir.path(), "a.csv", &[line("2025-03-01", "2"), line("2025-03-02", "3")]);

        let out = extract_rows(dir.path(), d("2025-03-01"), d("2025-03-31")).unwrap();
        let order: Vec<_> = out
            .rows
            .iter()
            .map(|r| (r.source_file.as_str(), r.record.worked_minutes))
            .collect();
        assert_eq!(
            order,
            vec![("a.csv", Some(2.0)), ("a.csv", Some(3.0)), ("b.csv", Some(1.0))]
        );
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.csv", &[line("2024-01-01", "60")]);

        let out = extract_rows(dir.path(), d("2025-01-01"), d("2025-12-31")).unwrap();
        assert!(out.is_empty());
        assert!(out.faults.is_empty());
    }

    #[test]
    fn missing_folder_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = extract_rows(&missing, d("2025-01-01"), d("2025-01-02")).unwrap_err();
        assert!(matches!(err, AppError::FolderNotFound(_)));
    }

    #[test]
    fn available_dates_are_distinct_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.csv",
            &[
                line("2025-03-05", "1"),
                line("2025-03-01 08:00", "1"),
                line("2025-03-05", "1"),
                line("junk", "1"),
            ],
        );

        let (dates, faults) = available_dates(dir.path()).unwrap();
        let v: Vec<_> = dates.into_iter().collect();
        assert_eq!(v, vec![d("2025-03-01"), d("2025-03-05")]);
        assert!(faults.is_empty());
    }
}

#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "sheetStart,shift,section,employeeCode,employeeName,category,subCategory,activityCode,activity,blockStart,periodStart,periodName,workedStart,workedMinutes";

pub fn rts() -> Command {
    cargo_bin_cmd!("rtimesheet")
}

/// One timesheet line for `date` with `minutes` worked.
pub fn sheet_line(date: &str, employee: &str, minutes: &str) -> String {
    format!(
        "{date},A,Dispatch,{employee},Name {employee},Direct,Picking,P01,Pick lines,06:00,06:00,Morning,06:02,{minutes}"
    )
}

/// Write a timesheet CSV with the standard header.
pub fn write_sheet(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let mut body = String::from(HEADER);
    for l in lines {
        body.push('\n');
        body.push_str(l);
    }
    body.push('\n');
    let path = dir.join(name);
    fs::write(&path, body).expect("write sheet");
    path
}

/// Financial periods file covering the given dates.
pub fn write_periods(dir: &Path, rows: &[(&str, &str, &str)]) -> PathBuf {
    let mut body = String::from("Date,Period,Financial Week");
    for (date, period, week) in rows {
        body.push_str(&format!("\n{date},{period},{week}"));
    }
    body.push('\n');
    let path = dir.join("periods.csv");
    fs::write(&path, body).expect("write periods");
    path
}

/// The fixture used by most end-to-end tests:
/// - `week10.csv`: 3 rows in 2025-03-03..=2025-03-05, 2 outside
/// - `week20.csv`: nothing in range
/// - periods matching 2025-03-03 and 2025-03-04 only
pub struct Fixture {
    pub root: tempfile::TempDir,
    pub input: PathBuf,
    pub periods: PathBuf,
    pub out: PathBuf,
    pub db: PathBuf,
}

pub fn fixture() -> Fixture {
    let root = tempfile::tempdir().expect("tempdir");
    let input = root.path().join("input");
    fs::create_dir_all(&input).unwrap();

    write_sheet(
        &input,
        "week10.csv",
        &[
            sheet_line("2025-03-02", "E1", "480"),
            sheet_line("2025-03-03 06:00:00", "E1", "450"),
            sheet_line("2025-03-04", "E2", "90"),
            sheet_line("2025-03-05", "E3", ""),
            sheet_line("2025-03-06", "E1", "480"),
        ],
    );
    write_sheet(
        &input,
        "week20.csv",
        &[
            sheet_line("2025-05-12", "E1", "480"),
            sheet_line("2025-05-13", "E2", "480"),
        ],
    );

    let periods = write_periods(
        root.path(),
        &[
            ("2025-03-03", "P03", "W10"),
            ("2025-03-04", "P03", "W10"),
            ("2025-03-10", "P03", "W11"),
        ],
    );

    let out = root.path().join("out");
    let db = root.path().join("log.sqlite");

    Fixture {
        root,
        input,
        periods,
        out,
        db,
    }
}

pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rdr = csv::Reader::from_path(path).expect("open csv");
    let headers = rdr
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = rdr
        .records()
        .map(|r| r.expect("record").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

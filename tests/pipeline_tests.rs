mod common;

use common::{fixture, read_csv, sheet_line, write_sheet};
use rtimesheet::core::pipeline::{ExportOutcome, ExportRequest, run_export};
use rtimesheet::errors::AppError;
use std::fs;

fn request<'a>(f: &'a common::Fixture, start: &'a str, end: &'a str) -> ExportRequest<'a> {
    ExportRequest {
        folder: &f.input,
        start,
        end,
        periods_file: &f.periods,
        output_dir: &f.out,
    }
}

#[test]
fn end_to_end_merge_keeps_every_row_once() {
    let f = fixture();

    let outcome = run_export(&request(&f, "2025-03-03", "2025-03-05")).unwrap();
    let ExportOutcome::Written {
        path,
        rows,
        matched,
        faults,
    } = outcome
    else {
        panic!("expected a written file");
    };

    assert_eq!(path, f.out.join("filtered_merged_data_1.csv"));
    assert_eq!(rows, 3);
    assert_eq!(matched, 2);
    assert!(faults.is_empty());

    let (headers, data) = read_csv(&path);
    assert_eq!(data.len(), 3);
    assert_eq!(&headers[..2], &["sheetStart", "shift"]);
    assert_eq!(
        &headers[14..],
        &["workedHours", "source_file", "Date", "Period", "Financial Week"]
    );

    let dates: Vec<&str> = data.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(dates, vec!["2025-03-03", "2025-03-04", "2025-03-05"]);

    // workedHours = workedMinutes / 60, empty when minutes are missing
    assert_eq!(data[0][14], "7.5");
    assert_eq!(data[1][14], "1.5");
    assert_eq!(data[2][13], "");
    assert_eq!(data[2][14], "");

    assert!(data.iter().all(|r| r[15] == "week10.csv"));

    // period columns populated for 2 rows, empty for the third
    assert_eq!(data[0][17], "P03");
    assert_eq!(data[1][18], "W10");
    assert!(data[2][16..].iter().all(String::is_empty));
}

#[test]
fn successive_runs_get_increasing_numbers() {
    let f = fixture();
    fs::create_dir_all(&f.out).unwrap();
    fs::write(f.out.join("filtered_merged_data_3.csv"), "x").unwrap();
    fs::write(f.out.join("filtered_merged_data_7.csv"), "x").unwrap();
    fs::write(f.out.join("notes.txt"), "x").unwrap();

    let first = run_export(&request(&f, "2025-03-03", "2025-03-05")).unwrap();
    let second = run_export(&request(&f, "2025-03-03", "2025-03-03")).unwrap();

    match (first, second) {
        (ExportOutcome::Written { path: a, .. }, ExportOutcome::Written { path: b, rows, .. }) => {
            assert_eq!(a, f.out.join("filtered_merged_data_8.csv"));
            assert_eq!(b, f.out.join("filtered_merged_data_9.csv"));
            assert_eq!(rows, 1);
        }
        other => panic!("unexpected outcomes: {other:?}"),
    }

    // existing files untouched
    assert_eq!(
        fs::read_to_string(f.out.join("filtered_merged_data_7.csv")).unwrap(),
        "x"
    );
}

#[test]
fn empty_range_writes_nothing() {
    let f = fixture();

    let outcome = run_export(&request(&f, "2024-01-01", "2024-12-31")).unwrap();
    assert!(matches!(outcome, ExportOutcome::NoData { .. }));
    assert!(!f.out.exists());
}

#[test]
fn broken_file_is_skipped_and_reported() {
    let f = fixture();
    fs::write(
        f.input.join("broken.csv"),
        format!("{}\n2025-03-03,too,few,fields\n", common::HEADER),
    )
    .unwrap();

    let outcome = run_export(&request(&f, "2025-03-03", "2025-03-05")).unwrap();
    let faults = outcome.faults();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].file, "broken.csv");

    let ExportOutcome::Written { rows, .. } = outcome else {
        panic!("expected a written file");
    };
    assert_eq!(rows, 3);
}

#[test]
fn only_broken_files_means_no_data_with_faults() {
    let f = fixture();
    let input = f.root.path().join("only_broken");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("bad.csv"), "a,b\n1,2,3\n").unwrap();

    let req = ExportRequest {
        folder: &input,
        ..request(&f, "2025-03-03", "2025-03-05")
    };
    let outcome = run_export(&req).unwrap();
    assert!(matches!(outcome, ExportOutcome::NoData { .. }));
    assert_eq!(outcome.faults().len(), 1);
}

#[test]
fn preconditions_abort_without_output() {
    let f = fixture();

    let err = run_export(&request(&f, "2025-03-05", "2025-03-03")).unwrap_err();
    assert!(matches!(err, AppError::InvalidDateRange { .. }));

    let err = run_export(&request(&f, "03/05/2025", "2025-03-06")).unwrap_err();
    assert!(matches!(err, AppError::InvalidDate(_)));

    let missing = f.root.path().join("missing");
    let req = ExportRequest {
        folder: &missing,
        ..request(&f, "2025-03-03", "2025-03-05")
    };
    assert!(matches!(run_export(&req), Err(AppError::FolderNotFound(_))));

    let no_periods = f.root.path().join("nope.csv");
    let req = ExportRequest {
        periods_file: &no_periods,
        ..request(&f, "2025-03-03", "2025-03-05")
    };
    assert!(matches!(run_export(&req), Err(AppError::ReferenceFile { .. })));

    assert!(!f.out.exists());
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let f = fixture();
    fs::write(&f.out, "not a dir").unwrap();

    let err = run_export(&request(&f, "2025-03-03", "2025-03-05")).unwrap_err();
    assert!(matches!(err, AppError::Write { .. }));
}

#[test]
fn output_dir_under_a_file_fails_before_extraction() {
    let f = fixture();
    let blocker = f.root.path().join("blocker");
    fs::write(&blocker, "not a dir").unwrap();
    let nested = blocker.join("exports").join("march");

    // an empty range would otherwise end as NoData without touching the output
    let req = ExportRequest {
        output_dir: &nested,
        ..request(&f, "2024-01-01", "2024-12-31")
    };
    let err = run_export(&req).unwrap_err();
    assert!(matches!(err, AppError::Write { .. }));
    assert!(err.to_string().contains("blocker"));

    let req = ExportRequest {
        output_dir: &nested,
        ..request(&f, "2025-03-03", "2025-03-05")
    };
    assert!(matches!(run_export(&req), Err(AppError::Write { .. })));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a dir");
}

#[test]
fn missing_nested_output_dir_is_created() {
    let f = fixture();
    let nested = f.out.join("2025").join("march");

    let req = ExportRequest {
        output_dir: &nested,
        ..request(&f, "2025-03-03", "2025-03-05")
    };
    let ExportOutcome::Written { path, .. } = run_export(&req).unwrap() else {
        panic!("expected a written file");
    };
    assert_eq!(path, nested.join("filtered_merged_data_1.csv"));
    assert!(path.is_file());
}

#[test]
fn rows_keep_file_then_row_order() {
    let f = fixture();
    write_sheet(
        &f.input,
        "week09.csv",
        &[
            sheet_line("2025-03-05", "Z9", "60"),
            sheet_line("2025-03-03", "Z8", "60"),
        ],
    );

    let outcome = run_export(&request(&f, "2025-03-03", "2025-03-05")).unwrap();
    let ExportOutcome::Written { path, .. } = outcome else {
        panic!("expected a written file");
    };

    let (_, data) = read_csv(&path);
    let order: Vec<(&str, &str)> = data
        .iter()
        .map(|r| (r[15].as_str(), r[3].as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("week09.csv", "Z9"),
            ("week09.csv", "Z8"),
            ("week10.csv", "E1"),
            ("week10.csv", "E2"),
            ("week10.csv", "E3"),
        ]
    );
}

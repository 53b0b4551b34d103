//! Left join of extracted rows against the financial periods table.

use crate::errors::{AppError, AppResult};
use crate::models::period::DATE_COLUMN;
use crate::models::{MergedRow, MergedSet, PeriodTable, TimesheetRow};
use crate::utils::date::parse_lenient_date;
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::path::Path;

/// Appended to a reference column whose name is already taken.
pub const COLLISION_SUFFIX: &str = "_y";

/// Load the financial periods CSV. It must have a `Date` column.
pub fn load_periods(path: &Path) -> AppResult<PeriodTable> {
    let fail = |reason: String| AppError::ReferenceFile {
        path: path.display().to_string(),
        reason,
    };

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| fail(e.to_string()))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| fail(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let date_idx = headers
        .iter()
        .position(|h| h == DATE_COLUMN)
        .ok_or_else(|| fail(format!("missing '{DATE_COLUMN}' column")))?;

    let mut table = PeriodTable::new(headers);
    for rec in rdr.records() {
        let rec = rec.map_err(|e| fail(e.to_string()))?;
        let date = rec.get(date_idx).and_then(parse_lenient_date);
        table.insert(date, rec.iter().map(str::to_string).collect());
    }

    Ok(table)
}

/// Reference column names as written after the extracted ones.
///
/// A name already used by an extracted column (or by an earlier reference
/// column) gets [`COLLISION_SUFFIX`] until it is unique; the extracted
/// column keeps its name.
pub fn reference_headers(periods: &PeriodTable) -> Vec<String> {
    let mut taken: HashSet<String> = TimesheetRow::headers()
        .into_iter()
        .map(str::to_string)
        .collect();

    periods
        .headers
        .iter()
        .map(|h| {
            let mut name = h.clone();
            while taken.contains(&name) {
                name.push_str(COLLISION_SUFFIX);
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

/// Every row appears exactly once; unmatched rows carry no period cells.
pub fn merge_periods(rows: Vec<TimesheetRow>, periods: &PeriodTable) -> MergedSet {
    let rows = rows
        .into_iter()
        .map(|row| {
            let period = periods.lookup(&row.sheet_date).map(<[String]>::to_vec);
            MergedRow { row, period }
        })
        .collect();

    MergedSet {
        period_headers: reference_headers(periods),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimesheetRecord;
    use chrono::NaiveDate;
    use std::fs;

    fn row(date: NaiveDate) -> TimesheetRow {
        let record = TimesheetRecord {
            sheet_start: date.to_string(),
            shift: "B".into(),
            section: "S2".into(),
            employee_code: "E2".into(),
            employee_name: "Bo".into(),
            category: "Indirect".into(),
            sub_category: "Admin".into(),
            activity_code: "A10".into(),
            activity: "Meeting".into(),
            block_start: "14:00".into(),
            period_start: "14:00".into(),
            period_name: "Afternoon".into(),
            worked_start: "14:00".into(),
            worked_minutes: Some(120.0),
        };
        TimesheetRow::new(record, date, "x.csv")
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn left_join_keeps_every_row_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("periods.csv");
        fs::write(
            &path,
            "Date,Period,FinYear\n2025-01-06,P01,FY25\n06/01/2025,P99,FY25\n2025-01-07 00:00:00,P01,FY25\nnot-a-date,P00,FY25\n",
        )
        .unwrap();

        let periods = load_periods(&path).unwrap();
        assert_eq!(periods.len(), 2);
        assert_eq!(periods.duplicate_dates, 1);
        assert_eq!(periods.unparsed_dates, 1);

        let rows = vec![row(d(2025, 1, 6)), row(d(2025, 1, 6)), row(d(2025, 1, 8))];
        let merged = merge_periods(rows, &periods);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.matched(), 2);
        assert_eq!(merged.rows[0].period.as_ref().unwrap()[1], "P01");
        assert!(merged.rows[2].period.is_none());

        let headers = merged.headers();
        let last = merged.record(&merged.rows[2]);
        assert_eq!(headers.len(), last.len());
        assert_eq!(&headers[16..], &["Date", "Period", "FinYear"]);
        assert!(last[16..].iter().all(String::is_empty));
    }

    #[test]
    fn colliding_reference_columns_get_a_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("periods.csv");
        fs::write(
            &path,
            "Date,periodName,source_file,Period,Period\n2025-01-06,Wk1,ref.csv,P01,P01b\n",
        )
        .unwrap();

        let periods = load_periods(&path).unwrap();
        let merged = merge_periods(vec![row(d(2025, 1, 6))], &periods);
        let headers = merged.headers();

        assert_eq!(
            &headers[16..],
            &["Date", "periodName_y", "source_file_y", "Period", "Period_y"]
        );
        assert_eq!(headers.iter().filter(|h| *h == "periodName").count(), 1);
        assert_eq!(headers.iter().filter(|h| *h == "source_file").count(), 1);

        let unique: HashSet<&String> = headers.iter().collect();
        assert_eq!(unique.len(), headers.len());

        let cells = merged.record(&merged.rows[0]);
        let pos = |name: &str| headers.iter().position(|h| h == name).unwrap();
        assert_eq!(cells[pos("periodName")], "Afternoon");
        assert_eq!(cells[pos("periodName_y")], "Wk1");
        assert_eq!(cells[pos("source_file")], "x.csv");
        assert_eq!(cells[pos("source_file_y")], "ref.csv");
    }

    #[test]
    fn empty_reference_table_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("periods.csv");
        fs::write(&path, "Date,Period\n").unwrap();

        let periods = load_periods(&path).unwrap();
        let merged = merge_periods(vec![row(d(2025, 2, 1))], &periods);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.matched(), 0);
    }

    #[test]
    fn reference_without_date_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("periods.csv");
        fs::write(&path, "Day,Period\n2025-01-06,P01\n").unwrap();

        let err = load_periods(&path).unwrap_err();
        assert!(matches!(err, AppError::ReferenceFile { .. }));
        assert!(err.to_string().contains("Date"));
    }

    #[test]
    fn missing_reference_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_periods(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, AppError::ReferenceFile { .. }));
    }
}

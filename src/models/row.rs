use chrono::NaiveDate;
use serde::Deserialize;

use crate::utils::date::format_date;

/// Header names every timesheet file must carry, in output order.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    "sheetStart",
    "shift",
    "section",
    "employeeCode",
    "employeeName",
    "category",
    "subCategory",
    "activityCode",
    "activity",
    "blockStart",
    "periodStart",
    "periodName",
    "workedStart",
    "workedMinutes",
];

pub const WORKED_HOURS: &str = "workedHours";
pub const SOURCE_FILE: &str = "source_file";

/// One line of a timesheet file, as read (extra columns are ignored).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetRecord {
    pub sheet_start: String,
    pub shift: String,
    pub section: String,
    pub employee_code: String,
    pub employee_name: String,
    pub category: String,
    pub sub_category: String,
    pub activity_code: String,
    pub activity: String,
    pub block_start: String,
    pub period_start: String,
    pub period_name: String,
    pub worked_start: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub worked_minutes: Option<f64>,
}

/// A record that survived the date filter.
#[derive(Debug, Clone)]
pub struct TimesheetRow {
    pub record: TimesheetRecord,
    pub sheet_date: NaiveDate,
    pub worked_hours: Option<f64>,
    pub source_file: String,
}

impl TimesheetRow {
    pub fn new(record: TimesheetRecord, sheet_date: NaiveDate, source_file: &str) -> Self {
        let worked_hours = worked_hours(record.worked_minutes);
        Self {
            record,
            sheet_date,
            worked_hours,
            source_file: source_file.to_string(),
        }
    }

    /// Output header for the extracted part of a merged file.
    pub fn headers() -> Vec<&'static str> {
        let mut h = REQUIRED_COLUMNS.to_vec();
        h.push(WORKED_HOURS);
        h.push(SOURCE_FILE);
        h
    }

    /// Cells in [`TimesheetRow::headers`] order; nulls are empty strings.
    pub fn cells(&self) -> Vec<String> {
        let r = &self.record;
        vec![
            format_date(&self.sheet_date),
            r.shift.clone(),
            r.section.clone(),
            r.employee_code.clone(),
            r.employee_name.clone(),
            r.category.clone(),
            r.sub_category.clone(),
            r.activity_code.clone(),
            r.activity.clone(),
            r.block_start.clone(),
            r.period_start.clone(),
            r.period_name.clone(),
            r.worked_start.clone(),
            opt_num(r.worked_minutes),
            opt_num(self.worked_hours),
            self.source_file.clone(),
        ]
    }
}

/// `minutes / 60`, or null when minutes are missing or not a finite number.
pub fn worked_hours(minutes: Option<f64>) -> Option<f64> {
    minutes.filter(|m| m.is_finite()).map(|m| m / 60.0)
}

fn opt_num(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

/// A tabular file that could not be read; its rows were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFault {
    pub file: String,
    pub reason: String,
}

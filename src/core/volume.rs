//! Volume analysis: filter a query result by a few known columns and
//! aggregate `Value Total` by week, by day and shift, by week and shift.

use crate::errors::{AppError, AppResult};
use crate::models::VolumeTable;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Columns a user may filter on.
pub const FILTER_COLUMNS: [&str; 5] = ["Units", "Function_", "Cost Category", "T_dept_Vol", "T_dept"];

pub const WEEK_COLUMN: &str = "Wk_no_";
pub const VALUE_COLUMN: &str = "Value Total";
pub const DAY_COLUMN: &str = "Day_";
pub const SHIFT_COLUMN: &str = "Shifts";

pub const DAY_ORDER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// `COLUMN=V1,V2,...`: keep rows whose column equals one of the values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeFilter {
    pub column: String,
    pub values: Vec<String>,
}

impl FromStr for VolumeFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (col, vals) = s
            .split_once('=')
            .ok_or_else(|| AppError::InvalidFilter(format!("expected COLUMN=V1,V2 but got '{s}'")))?;

        let column = col.trim();
        if !FILTER_COLUMNS.contains(&column) {
            return Err(AppError::InvalidFilter(format!(
                "'{column}' is not filterable (allowed: {})",
                FILTER_COLUMNS.join(", ")
            )));
        }

        let values: Vec<String> = vals
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();

        if values.is_empty() {
            return Err(AppError::InvalidFilter(format!("no values given for '{column}'")));
        }

        Ok(Self {
            column: column.to_string(),
            values,
        })
    }
}

/// Apply filters in order. Filters on columns the table lacks are skipped
/// and their names returned.
pub fn apply_filters(mut table: VolumeTable, filters: &[VolumeFilter]) -> (VolumeTable, Vec<String>) {
    let mut skipped = Vec::new();

    for f in filters {
        let Some(idx) = table.column_index(&f.column) else {
            skipped.push(f.column.clone());
            continue;
        };

        table.rows.retain(|row| {
            row.get(idx)
                .and_then(|c| c.as_deref())
                .is_some_and(|v| f.values.iter().any(|x| x == v))
        });
    }

    (table, skipped)
}

/// Replace every missing cell with `"0"`.
pub fn fill_missing(mut table: VolumeTable) -> VolumeTable {
    for row in &mut table.rows {
        for cell in row.iter_mut() {
            if cell.is_none() {
                *cell = Some("0".to_string());
            }
        }
    }
    table
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekTotal {
    pub week: i64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayShiftTotal {
    pub day: String,
    pub shift: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekShiftTotal {
    pub week: i64,
    pub shift: String,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct VolumeSummary {
    pub rows: usize,
    pub weekly: Vec<WeekTotal>,
    pub by_day_shift: Vec<DayShiftTotal>,
    pub by_week_shift: Vec<WeekShiftTotal>,
}

/// Whole week number, or `None` for blanks, text and fractions.
pub fn week_number(raw: &str) -> Option<i64> {
    let v: f64 = raw.trim().parse().ok()?;
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

fn value_of(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn day_rank(day: &str) -> Option<usize> {
    DAY_ORDER.iter().position(|d| *d == day.trim())
}

/// Aggregate a filtered, gap-filled table.
pub fn summarize(table: &VolumeTable) -> AppResult<VolumeSummary> {
    let col = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| AppError::MissingColumn {
                file: "volume query".to_string(),
                column: name.to_string(),
            })
    };

    let week_i = col(WEEK_COLUMN)?;
    let value_i = col(VALUE_COLUMN)?;
    let day_i = col(DAY_COLUMN)?;
    let shift_i = col(SHIFT_COLUMN)?;

    let mut weekly: BTreeMap<i64, f64> = BTreeMap::new();
    let mut day_shift: BTreeMap<(usize, String), f64> = BTreeMap::new();
    let mut week_shift: BTreeMap<(i64, String), f64> = BTreeMap::new();

    for row in &table.rows {
        let cell = |i: usize| row.get(i).and_then(|c| c.as_deref()).unwrap_or("");

        let value = value_of(cell(value_i));
        let shift = cell(shift_i).to_string();
        let week = week_number(cell(week_i));

        if let Some(w) = week {
            *weekly.entry(w).or_default() += value;
            *week_shift.entry((w, shift.clone())).or_default() += value;
        }

        if let Some(d) = day_rank(cell(day_i)) {
            *day_shift.entry((d, shift)).or_default() += value;
        }
    }

    Ok(VolumeSummary {
        rows: table.len(),
        weekly: weekly
            .into_iter()
            .map(|(week, total)| WeekTotal { week, total })
            .collect(),
        by_day_shift: day_shift
            .into_iter()
            .map(|((d, shift), total)| DayShiftTotal {
                day: DAY_ORDER[d].to_string(),
                shift,
                total,
            })
            .collect(),
        by_week_shift: week_shift
            .into_iter()
            .map(|((week, shift), total)| WeekShiftTotal { week, shift, total })
            .collect(),
    })
}

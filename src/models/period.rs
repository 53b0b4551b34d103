use chrono::NaiveDate;
use std::collections::HashMap;

/// Name of the join column in the financial periods file.
pub const DATE_COLUMN: &str = "Date";

/// Financial periods reference table, keyed by calendar date.
///
/// Columns are kept as read, `Date` included. Rows whose `Date` does not
/// parse are counted but can never be matched.
#[derive(Debug, Clone, Default)]
pub struct PeriodTable {
    pub headers: Vec<String>,
    by_date: HashMap<NaiveDate, Vec<String>>,
    pub rows_read: usize,
    pub unparsed_dates: usize,
    pub duplicate_dates: usize,
}

impl PeriodTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            ..Self::default()
        }
    }

    /// Register a row. The first row seen for a date wins.
    pub fn insert(&mut self, date: Option<NaiveDate>, cells: Vec<String>) {
        self.rows_read += 1;

        let Some(date) = date else {
            self.unparsed_dates += 1;
            return;
        };

        if self.by_date.contains_key(&date) {
            self.duplicate_dates += 1;
            return;
        }
        self.by_date.insert(date, cells);
    }

    pub fn lookup(&self, date: &NaiveDate) -> Option<&[String]> {
        self.by_date.get(date).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

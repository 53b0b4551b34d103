use crate::models::row::TimesheetRow;

/// An extracted row plus the period cells of its date, if any.
#[derive(Debug, Clone)]
pub struct MergedRow {
    pub row: TimesheetRow,
    pub period: Option<Vec<String>>,
}

/// Result of the left join, ready to be written.
#[derive(Debug, Clone, Default)]
pub struct MergedSet {
    pub period_headers: Vec<String>,
    pub rows: Vec<MergedRow>,
}

impl MergedSet {
    pub fn headers(&self) -> Vec<String> {
        TimesheetRow::headers()
            .into_iter()
            .map(str::to_string)
            .chain(self.period_headers.iter().cloned())
            .collect()
    }

    /// Output cells for one row; unmatched rows get empty period cells.
    pub fn record(&self, merged: &MergedRow) -> Vec<String> {
        let mut cells = merged.row.cells();
        match &merged.period {
            Some(p) => cells.extend(p.iter().cloned()),
            None => cells.extend(std::iter::repeat_n(String::new(), self.period_headers.len())),
        }
        cells
    }

    pub fn matched(&self) -> usize {
        self.rows.iter().filter(|r| r.period.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

use chrono::NaiveDate;

/// Canonical date format used for input, output and comparisons.
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Formats accepted by [`parse_lenient_date`] after the canonical prefix.
const FALLBACK_FMTS: [&str; 3] = ["%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Parse a date-like cell by looking only at its first 10 characters.
///
/// `"2025-03-04"`, `"2025-03-04 07:30:00"` and `"2025-03-04T07:30"` all give
/// the same date. Anything that does not start with a valid `YYYY-MM-DD`
/// returns `None`; callers treat that as "never in range".
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, DATE_FMT).ok()
}

/// Parse a reference-table date.
///
/// Tries the canonical prefix first, then a few common spreadsheet layouts
/// on the whole trimmed cell. Coercion failures become `None`.
pub fn parse_lenient_date(raw: &str) -> Option<NaiveDate> {
    if let Some(d) = parse_sheet_date(raw) {
        return Some(d);
    }

    let s = raw.trim();
    FALLBACK_FMTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

pub fn format_date(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

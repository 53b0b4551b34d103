pub mod date;
pub mod path;
pub mod table;

pub use date::{format_date, parse_lenient_date, parse_sheet_date};

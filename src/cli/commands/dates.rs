use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::extract::available_dates;
use crate::errors::AppResult;
use crate::ui::messages::{file_fault, warning};
use crate::utils::date::format_date;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Dates { folder } = cmd {
        let (dates, faults) = available_dates(&expand_tilde(folder))?;

        for f in &faults {
            file_fault(&f.file, &f.reason);
        }

        if dates.is_empty() {
            warning("No valid sheetStart dates found.");
            return Ok(());
        }

        println!("📅 {} date(s) available:", dates.len());
        for d in &dates {
            println!("{}", format_date(d));
        }
    }
    Ok(())
}

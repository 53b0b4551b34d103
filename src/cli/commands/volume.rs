use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::volume::{
    VolumeFilter, VolumeSummary, apply_filters, fill_missing, summarize,
};
use crate::db::log::{log_quietly, ttlog};
use crate::db::pool::DbPool;
use crate::db::volume::load_query;
use crate::errors::{AppError, AppResult};
use crate::export::{ensure_writable, export_summary, write_volume};
use crate::ui::messages::{header, info, success, success_stderr, warning, warning_stderr};
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Volume {
        db_file,
        query,
        filters,
        json,
        out,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let filters = filters
        .iter()
        .map(|f| f.parse::<VolumeFilter>())
        .collect::<AppResult<Vec<_>>>()?;
    let query = query.as_deref().unwrap_or(&cfg.volume_query);

    // In JSON mode stdout carries the document only.
    let warn = |msg: String| if *json { warning_stderr(msg) } else { warning(msg) };

    let path = expand_tilde(db_file);
    if !path.is_file() {
        return Err(AppError::DatabaseNotFound(path.display().to_string()));
    }

    let pool = DbPool::open_read_only(&path)?;
    let table = load_query(&pool, query)?;
    if !*json {
        info(format!("Loaded {} rows from [{query}]", table.len()));
    }

    if table.is_empty() {
        warn("No data to display. Please check the query name or the database file.".into());
        if *json {
            println!("{}", serde_json::to_string_pretty(&VolumeSummary::default())?);
        }
        return Ok(());
    }

    let (filtered, skipped) = apply_filters(table, &filters);
    for col in &skipped {
        warn(format!("Column '{col}' not present, filter ignored."));
    }
    let filtered = fill_missing(filtered);
    let summary = summarize(&filtered)?;

    if *json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if let Some(out) = out {
        let out_path = expand_tilde(out);
        ensure_writable(&out_path, *force)?;
        write_volume(&out_path, &filtered)?;
        let done = export_summary("Filtered volume", &out_path, filtered.len());
        if *json {
            success_stderr(done);
        } else {
            success(done);
        }
    }

    let target = path.display().to_string();
    log_quietly(&cfg.database, |conn| {
        ttlog(
            conn,
            "volume",
            &target,
            &format!("[{query}] {} rows after {} filter(s)", filtered.len(), filters.len()),
        )
    });

    Ok(())
}

fn print_summary(s: &VolumeSummary) {
    header(format!("Value Total by week ({} rows)", s.rows));
    let mut t = Table::new(&["Week", "Value Total"]);
    for w in &s.weekly {
        t.add_row(vec![w.week.to_string(), w.total.to_string()]);
    }
    println!("{}", t.render());

    header("Value Total by day and shift");
    let mut t = Table::new(&["Day", "Shift", "Value Total"]);
    for d in &s.by_day_shift {
        t.add_row(vec![d.day.clone(), d.shift.clone(), d.total.to_string()]);
    }
    println!("{}", t.render());

    header("Value Total by week and shift");
    let mut t = Table::new(&["Week", "Shift", "Value Total"]);
    for w in &s.by_week_shift {
        t.add_row(vec![w.week.to_string(), w.shift.clone(), w.total.to_string()]);
    }
    println!("{}", t.render());
}

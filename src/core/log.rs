use crate::db::log::{ExportRecord, LogEntry, load_exports, load_log};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::table::Table;
use ansi_term::Colour;
use regex::Regex;

const OP_WIDTH: usize = 60;

fn strip_ansi(re: &Regex, s: &str) -> String {
    re.replace_all(s, "").into_owned()
}

/// ANSI colour for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "export" => Colour::Green,
        "no_data" => Colour::Yellow,
        "export_failed" => Colour::Red,
        "volume" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)`, coloured on the operation word and cut to
/// `OP_WIDTH` visible characters.
pub fn render_op_target(re: &Regex, entry: &LogEntry) -> String {
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > OP_WIDTH {
        let mut s: String = plain.chars().take(OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&entry.operation);
    let colored = match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    };

    // padding computed on the visible text only
    let pad = OP_WIDTH.saturating_sub(strip_ansi(re, &colored).chars().count());
    format!("{colored}{}", " ".repeat(pad))
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let re = Regex::new(r"\x1B\[[0-9;]*[mK]").map_err(|e| AppError::Other(e.to_string()))?;

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");
        for e in &entries {
            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                e.id,
                e.date,
                render_op_target(&re, e),
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }

    pub fn print_exports(pool: &DbPool) -> AppResult<()> {
        let records = load_exports(&pool.conn)?;
        if records.is_empty() {
            println!("📦 No exports recorded yet.");
            return Ok(());
        }

        println!("📦 Export history:\n");
        print!("{}", exports_table(&records).render());
        Ok(())
    }
}

fn exports_table(records: &[ExportRecord]) -> Table {
    let mut t = Table::new(&["#", "When", "Range", "Rows", "Matched", "Skipped", "File"]);
    for r in records {
        t.add_row(vec![
            r.id.to_string(),
            r.created_at.clone(),
            format!("{} → {}", r.start_date, r.end_date),
            r.rows.to_string(),
            r.matched.to_string(),
            r.faults.to_string(),
            r.path.clone(),
        ]);
    }
    t
}

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pipeline::{ExportOutcome, ExportRequest, run_export};
use crate::db::log::{ExportRecord, log_quietly, record_export, ttlog};
use crate::errors::{AppError, AppResult};
use crate::export::notify_export_success;
use crate::models::FileFault;
use crate::ui::messages::{file_fault, info, warning};
use crate::utils::path::expand_tilde;

/// Handle the `export` command: resolve paths, run the pipeline, report.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Export {
        folder,
        start,
        end,
        periods,
        out_dir,
    } = cmd
    else {
        return Ok(());
    };

    let periods_file = periods
        .as_deref()
        .map(expand_tilde)
        .or_else(|| cfg.periods_path())
        .ok_or_else(|| AppError::ReferenceFile {
            path: "-".to_string(),
            reason: "no --periods given and no periods_file configured".to_string(),
        })?;
    let output_dir = out_dir
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| cfg.output_dir_path());
    let folder = expand_tilde(folder);

    let req = ExportRequest {
        folder: &folder,
        start,
        end,
        periods_file: &periods_file,
        output_dir: &output_dir,
    };

    info(format!(
        "Extracting {start} → {end} from {} (periods: {})",
        folder.display(),
        periods_file.display()
    ));

    let outcome = match run_export(&req) {
        Ok(o) => o,
        Err(e) => {
            let target = folder.display().to_string();
            log_quietly(&cfg.database, |conn| {
                ttlog(conn, "export_failed", &target, &e.to_string())
            });
            return Err(e);
        }
    };

    report_faults(outcome.faults());

    match &outcome {
        ExportOutcome::Written {
            path,
            rows,
            matched,
            faults,
        } => {
            notify_export_success("CSV", path, *rows);
            if matched < rows {
                warning(format!(
                    "{} of {rows} rows have no financial period for their date.",
                    rows - matched
                ));
            }

            let target = path.display().to_string();
            let rec = ExportRecord {
                id: 0,
                created_at: String::new(),
                path: target.clone(),
                start_date: start.clone(),
                end_date: end.clone(),
                rows: *rows as i64,
                matched: *matched as i64,
                faults: faults.len() as i64,
            };
            log_quietly(&cfg.database, |conn| {
                ttlog(
                    conn,
                    "export",
                    &target,
                    &format!("{rows} rows ({matched} with period) from {start} to {end}"),
                )?;
                record_export(conn, &rec)
            });
        }
        ExportOutcome::NoData { .. } => {
            warning(format!("No matching rows between {start} and {end}; nothing written."));
            let target = folder.display().to_string();
            log_quietly(&cfg.database, |conn| {
                ttlog(conn, "no_data", &target, &format!("{start} → {end}"))
            });
        }
    }

    Ok(())
}

fn report_faults(faults: &[FileFault]) {
    if faults.is_empty() {
        return;
    }
    warning(format!("{} file(s) skipped:", faults.len()));
    for f in faults {
        file_fault(&f.file, &f.reason);
    }
}

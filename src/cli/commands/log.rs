use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::initialize::open_log_db;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print, exports } = cmd {
        let pool = open_log_db(&cfg.database)?;
        if *print {
            LogLogic::print_log(&pool)?;
        }
        if *exports {
            LogLogic::print_exports(&pool)?;
        }
    }

    Ok(())
}

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::open_log_db;
use crate::db::log;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with --test)
///  - the run-log SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    // 1️⃣ config file
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    println!("⚙️  Initializing rTimesheet…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    // 2️⃣ database + migrations
    let pool = open_log_db(&db_path)?;
    println!("✅ Database initialized at {}", &db_path);

    // 3️⃣ internal log (non-blocking)
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    ) {
        warning(format!("Failed to write internal log: {e}"));
    }

    println!("🎉 rTimesheet initialization completed!");
    Ok(())
}

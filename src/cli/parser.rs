use clap::{Parser, Subcommand};

/// Command-line interface definition for rTimesheet
#[derive(Parser)]
#[command(
    name = "rtimesheet",
    version = env!("CARGO_PKG_VERSION"),
    about = "Extract timesheet rows by date range, merge them with financial periods and export numbered CSV files",
    long_about = None
)]
pub struct Cli {
    /// Override run-log database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the run-log database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// List the dates available in a folder of timesheet files
    Dates {
        #[arg(long, value_name = "DIR", help = "Folder containing timesheet CSV files")]
        folder: String,
    },

    /// Extract rows in a date range, merge financial periods, write a numbered CSV
    Export {
        #[arg(long, value_name = "DIR", help = "Folder containing timesheet CSV files")]
        folder: String,

        /// First day to include (YYYY-MM-DD, extra characters are ignored)
        #[arg(long, value_name = "DATE")]
        start: String,

        /// Last day to include (YYYY-MM-DD, extra characters are ignored)
        #[arg(long, value_name = "DATE")]
        end: String,

        #[arg(
            long,
            value_name = "FILE",
            help = "Financial periods CSV (defaults to periods_file in the config)"
        )]
        periods: Option<String>,

        #[arg(
            long = "out-dir",
            value_name = "DIR",
            help = "Output directory (defaults to output_dir in the config)"
        )]
        out_dir: Option<String>,
    },

    /// Filter a volume database query and print weekly, day and shift totals
    Volume {
        #[arg(long = "db-file", value_name = "FILE", help = "SQLite database holding the volume data")]
        db_file: String,

        #[arg(long, value_name = "NAME", help = "Table or view to read (default from config)")]
        query: Option<String>,

        /// Keep rows whose COLUMN is one of the values; repeatable.
        /// Columns: Units, Function_, Cost Category, T_dept_Vol, T_dept
        #[arg(long = "filter", value_name = "COLUMN=V1,V2")]
        filters: Vec<String>,

        #[arg(long, help = "Print the totals as JSON")]
        json: bool,

        #[arg(long, value_name = "FILE", help = "Write the filtered rows to a CSV file")]
        out: Option<String>,

        #[arg(long, short = 'f', requires = "out")]
        force: bool,
    },

    /// Print the internal run log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "exports", help = "Print the history of written export files")]
        exports: bool,
    },
}

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Run-log SQLite database.
    #[serde(default = "default_database")]
    pub database: String,
    /// Directory receiving `filtered_merged_data_<N>.csv`.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Financial periods CSV used when `--periods` is omitted.
    #[serde(default)]
    pub periods_file: Option<String>,
    /// Table or view read by `volume`.
    #[serde(default = "default_volume_query")]
    pub volume_query: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_output_dir() -> String {
    "output".to_string()
}
fn default_volume_query() -> String {
    "data query".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            output_dir: default_output_dir(),
            periods_file: None,
            volume_query: default_volume_query(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtimesheet")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rtimesheet")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtimesheet.conf")
    }

    /// Return the default path of the run-log database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rtimesheet.sqlite")
    }

    /// Load configuration from the standard file, or defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn output_dir_path(&self) -> PathBuf {
        expand_tilde(&self.output_dir)
    }

    pub fn periods_path(&self) -> Option<PathBuf> {
        self.periods_file.as_deref().map(expand_tilde)
    }

    /// Create the config directory and file. Returns the database path.
    ///
    /// `custom_db` may be absolute or relative to the config directory.
    /// With `is_test` the config file is left untouched.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
        }

        Ok(config.database)
    }
}

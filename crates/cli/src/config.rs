//! Runtime configuration.

use std::path::PathBuf;

use stockbook_infra::reports::DEFAULT_RECENT_LIMIT;

/// Environment variable naming the directory that holds the data files.
pub const DATA_DIR_ENV: &str = "STOCKBOOK_DATA_DIR";
/// Environment variable with the default log filter (overridden by `RUST_LOG`).
pub const LOG_ENV: &str = "STOCKBOOK_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `products.json` and `movements.json`.
    pub data_dir: PathBuf,
    /// Filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Rows shown by the movement report.
    pub recent_movements: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            log_filter: "warn".to_string(),
            recent_movements: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by any non-blank environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let non_blank = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(dir) = non_blank(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(filter) = non_blank(LOG_ENV) {
            config.log_filter = filter;
        }
        config
    }
}

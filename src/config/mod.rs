use crate::models::coordinates::Coordinates;
use crate::ui::messages;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file holding local history, the offline queue and caches.
    pub database: String,

    /// Base URL of the attendance service.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Default employee used by `in`/`out` when --employee is omitted.
    #[serde(default)]
    pub employee_id: String,

    /// Capture coordinates by default (overridable per action).
    #[serde(default)]
    pub use_location: bool,

    /// Bounded location acquisition, in seconds.
    #[serde(default = "default_location_timeout")]
    pub location_timeout_secs: u64,

    /// HTTP endpoint returning {"lat": .., "lng": ..}. Takes precedence
    /// over `fixed_location` when both are set.
    #[serde(default)]
    pub location_endpoint: Option<String>,

    /// Pinned worksite coordinates.
    #[serde(default)]
    pub fixed_location: Option<Coordinates>,

    /// Timeout for each submission request, in seconds.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Soft "having trouble syncing" warning point.
    #[serde(default = "default_warn_threshold")]
    pub retry_warn_threshold: u32,

    /// Optional dead-letter bound. Absent = retry forever.
    #[serde(default)]
    pub max_retries: Option<u32>,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_location_timeout() -> u64 {
    5
}
fn default_http_timeout() -> u64 {
    10
}
fn default_warn_threshold() -> u32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            server_url: default_server_url(),
            employee_id: String::new(),
            use_location: false,
            location_timeout_secs: default_location_timeout(),
            location_endpoint: None,
            fixed_location: None,
            http_timeout_secs: default_http_timeout(),
            retry_warn_threshold: default_warn_threshold(),
            max_retries: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("clocksync")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".clocksync")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("clocksync.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("clocksync.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A malformed file falls back to defaults with a warning rather than
    /// aborting: every command still needs a usable configuration.
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_yaml::from_str(&content) {
                    Ok(cfg) => cfg,
                    Err(e) => {
                        messages::warning(format!(
                            "failed to parse {} ({e}); using defaults",
                            path.display()
                        ));
                        Config::default()
                    }
                },
                Err(e) => {
                    messages::warning(format!(
                        "failed to read {} ({e}); using defaults",
                        path.display()
                    ));
                    Config::default()
                }
            }
        } else {
            Config::default()
        }
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB path: user provided or default
        let db_path = if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file (skipped in test mode)
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {db_path:?}");

        Ok(())
    }

    /// Sanity checks for `config --check`.
    /// Returns the list of problems found (empty = all good).
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.database.trim().is_empty() {
            problems.push("database path is empty".to_string());
        }
        if self.server_url.trim().is_empty() {
            problems.push("server_url is empty".to_string());
        } else if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://")
        {
            problems.push(format!(
                "server_url '{}' is not an http(s) URL",
                self.server_url
            ));
        }
        if self.employee_id.trim().is_empty() {
            problems.push(
                "employee_id is empty: every `in`/`out` will need --employee".to_string(),
            );
        }
        if self.use_location && self.location_endpoint.is_none() && self.fixed_location.is_none() {
            problems.push(
                "use_location is on but neither location_endpoint nor fixed_location is set"
                    .to_string(),
            );
        }
        if self.location_timeout_secs == 0 {
            problems.push("location_timeout_secs must be at least 1".to_string());
        }
        if let Some(max) = self.max_retries {
            if max < self.retry_warn_threshold {
                problems.push(format!(
                    "max_retries ({max}) is below retry_warn_threshold ({}): events die before the warning fires",
                    self.retry_warn_threshold
                ));
            }
        }

        problems
    }
}

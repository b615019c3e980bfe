use std::env;
use std::path::PathBuf;

/// Database configuration.
///
/// Reads from the `INNINGS_DATABASE_URL` environment variable, falling back
/// to a SQLite file under the user's data directory when unset.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Full SQLite connection URL (e.g. `sqlite:///home/me/innings.db`).
    pub database_url: String,
}

impl DbConfig {
    /// Environment variable consulted by [`DbConfig::from_env`].
    pub const ENV_VAR: &str = "INNINGS_DATABASE_URL";

    /// Build a config from the environment.
    ///
    /// Priority: `INNINGS_DATABASE_URL` env var, then [`DbConfig::default_url`].
    pub fn from_env() -> Self {
        let database_url = env::var(Self::ENV_VAR).unwrap_or_else(|_| Self::default_url());
        Self { database_url }
    }

    /// Build a config from an explicit URL (useful for tests and CLI flags).
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Build a config pointing at a database file on disk.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        Self::new(format!("sqlite://{}", path.display()))
    }

    /// The default connection URL: `innings.db` inside [`default_data_dir`].
    pub fn default_url() -> String {
        let path = default_data_dir().join("innings.db");
        format!("sqlite://{}", path.display())
    }

    /// Extract the database file path from the URL.
    ///
    /// Returns `None` for in-memory databases or URLs without a path.
    pub fn database_path(&self) -> Option<PathBuf> {
        let rest = self
            .database_url
            .strip_prefix("sqlite://")
            .or_else(|| self.database_url.strip_prefix("sqlite:"))?;
        // Drop query parameters such as `?mode=rwc`.
        let path = rest.split('?').next().unwrap_or_default();
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(PathBuf::from(path))
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Return the innings data directory.
///
/// Uses XDG layout: `$XDG_DATA_HOME/innings` or `~/.local/share/innings`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("innings");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".local")
        .join("share")
        .join("innings")
}

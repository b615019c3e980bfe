//! Configuration file management for innings.
//!
//! Provides a TOML-based config file at `~/.config/innings/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use innings_core::generate::{DEFAULT_TIMEOUT, GenerationClient};
use innings_core::provider::{CommandProvider, FixtureProvider, GenerationProvider};
use innings_db::config::DbConfig;

pub const PROVIDER_COMMAND_ENV: &str = "INNINGS_PROVIDER_COMMAND";
pub const PROVIDER_TIMEOUT_ENV: &str = "INNINGS_PROVIDER_TIMEOUT_SECS";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub provider: ProviderSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DatabaseSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProviderSection {
    /// Bridge executable that answers generation requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Environment variable that must hold the provider API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the innings config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/innings` or `~/.config/innings`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("innings");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("innings")
}

/// Return the path to the innings config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    save_config_to(&config_path(), config)
}

/// Write `config` to `path`. Sets file permissions to 0600 on Unix.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // Owner read/write only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Where generation requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSettings {
    /// Replay a payload file for every request.
    Fixture(PathBuf),
    Command {
        command: String,
        args: Vec<String>,
        api_key_env: Option<String>,
    },
    Unconfigured,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct InningsConfig {
    pub db_config: DbConfig,
    pub provider: ProviderSettings,
    pub timeout: Duration,
}

impl InningsConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `cli_db_url` > `INNINGS_DATABASE_URL` > `database.url` > data-dir default
    /// - Provider: `--fixture` > `INNINGS_PROVIDER_COMMAND` > `provider.command` > unconfigured
    /// - Timeout: `INNINGS_PROVIDER_TIMEOUT_SECS` > `provider.timeout_secs` > 60 s
    pub fn resolve(cli_db_url: Option<&str>, fixture: Option<&Path>) -> Result<Self> {
        let file_config = load_config().ok().unwrap_or_default();
        Self::resolve_with(file_config, cli_db_url, fixture)
    }

    pub fn resolve_with(
        file_config: ConfigFile,
        cli_db_url: Option<&str>,
        fixture: Option<&Path>,
    ) -> Result<Self> {
        let ConfigFile { database, provider } = file_config;

        // DB URL resolution.
        let db_url = if let Some(url) = cli_db_url {
            url.to_string()
        } else if let Ok(url) = std::env::var(DbConfig::ENV_VAR) {
            url
        } else if let Some(url) = database.url {
            url
        } else {
            DbConfig::default_url()
        };
        let db_config = DbConfig::new(db_url);

        // Provider resolution.
        let provider_settings = if let Some(path) = fixture {
            ProviderSettings::Fixture(path.to_path_buf())
        } else if let Ok(command) = std::env::var(PROVIDER_COMMAND_ENV) {
            ProviderSettings::Command {
                command,
                args: Vec::new(),
                api_key_env: provider.api_key_env.clone(),
            }
        } else if let Some(command) = provider.command.clone() {
            ProviderSettings::Command {
                command,
                args: provider.args.clone(),
                api_key_env: provider.api_key_env.clone(),
            }
        } else {
            ProviderSettings::Unconfigured
        };

        // Timeout resolution.
        let timeout = if let Ok(raw) = std::env::var(PROVIDER_TIMEOUT_ENV) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{PROVIDER_TIMEOUT_ENV} is not a number of seconds: {raw}"))?;
            Duration::from_secs(secs)
        } else if let Some(secs) = provider.timeout_secs {
            Duration::from_secs(secs)
        } else {
            DEFAULT_TIMEOUT
        };
        if timeout.is_zero() {
            bail!("provider timeout must be at least one second");
        }

        Ok(Self {
            db_config,
            provider: provider_settings,
            timeout,
        })
    }

    /// Build the generation client for the resolved provider.
    pub async fn generation_client(&self) -> Result<GenerationClient> {
        let provider: Arc<dyn GenerationProvider> = match &self.provider {
            ProviderSettings::Fixture(path) => Arc::new(
                FixtureProvider::from_file(path)
                    .await
                    .with_context(|| format!("failed to load fixture {}", path.display()))?,
            ),
            ProviderSettings::Command {
                command,
                args,
                api_key_env,
            } => {
                let mut adapter = CommandProvider::new(command.as_str()).with_args(args.iter().cloned());
                if let Some(var) = api_key_env {
                    adapter = adapter.with_api_key_env(var.as_str());
                }
                Arc::new(adapter)
            }
            ProviderSettings::Unconfigured => bail!(
                "no generation provider configured; run `innings init --provider-command <bridge>`, \
                 set {PROVIDER_COMMAND_ENV}, or pass --fixture <file>"
            ),
        };

        Ok(GenerationClient::new(provider).with_timeout(self.timeout))
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

//! Settings: built-in defaults, optionally overridden by a TOML file and CLI flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ranking_engine::{Config, Weights};
use serde::Deserialize;

use crate::error::ScoutError;

/// Name used for the config directory and the default key file.
pub const APP_NAME: &str = "repo-scout";

/// GitHub caps `per_page` at 100.
const MAX_PER_PAGE: usize = 100;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Private key used for the connectivity check. `~/` is expanded.
  pub ssh_key: PathBuf,
  pub ssh_host: String,
  pub connect_timeout_secs: u64,
  pub api_timeout_secs: u64,
  pub max_results: usize,
  pub api_base: String,
  pub raw_base: String,
  /// Branch assumed when fetching README.md.
  pub default_branch: String,
  pub report_prefix: String,
  pub ranking_weights: Weights,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      ssh_key: home_dir().join(".ssh").join("repo_scout_key"),
      ssh_host: "git@github.com".to_string(),
      connect_timeout_secs: 10,
      api_timeout_secs: 20,
      max_results: 15,
      api_base: "https://api.github.com".to_string(),
      raw_base: "https://raw.githubusercontent.com".to_string(),
      default_branch: "main".to_string(),
      report_prefix: "RepoScout".to_string(),
      ranking_weights: Weights::default(),
    }
  }
}

fn home_dir() -> PathBuf {
  dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Expand a leading `~/` (or a bare `~`) to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
  match path.strip_prefix("~") {
    Ok(rest) => home_dir().join(rest),
    Err(_) => path.to_path_buf(),
  }
}

impl Settings {
  /// `<config_dir>/repo-scout/config.toml`, if the platform has a config dir.
  pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME).join("config.toml"))
  }

  pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
    let mut settings: Settings = toml::from_str(raw)?;
    settings.ssh_key = expand_home(&settings.ssh_key);
    Ok(settings)
  }

  /// Load from `path`, or from the default location when it exists, else defaults.
  ///
  /// An explicit path that cannot be read is an error; a missing default file is not.
  pub fn load(path: Option<&Path>) -> Result<Self, ScoutError> {
    let candidate = match path {
      Some(p) => Some(p.to_path_buf()),
      None => Self::default_path().filter(|p| p.is_file()),
    };

    let settings = match candidate {
      Some(p) => {
        let raw = std::fs::read_to_string(&p)?;
        tracing::debug!(path = %p.display(), "loaded settings file");
        Self::from_toml(&raw).map_err(|source| ScoutError::ConfigFile { path: p, source })?
      }
      None => Self::default(),
    };
    settings.validate()?;
    Ok(settings)
  }

  pub fn validate(&self) -> Result<(), ScoutError> {
    if self.max_results == 0 || self.max_results > MAX_PER_PAGE {
      return Err(ScoutError::Config(format!(
        "max_results must be between 1 and {}, got {}",
        MAX_PER_PAGE, self.max_results
      )));
    }
    if self.api_timeout_secs == 0 {
      return Err(ScoutError::Config("api_timeout_secs must be positive".to_string()));
    }
    Ok(())
  }

  pub fn api_timeout(&self) -> Duration {
    Duration::from_secs(self.api_timeout_secs)
  }

  pub fn connect_timeout(&self) -> Duration {
    Duration::from_secs(self.connect_timeout_secs)
  }

  pub fn engine_config(&self) -> Config {
    Config::with_weights(self.ranking_weights)
  }
}

//! Errors surfaced by the repo-scout shell (network, processes, files, prompts).

use std::path::PathBuf;

use ranking_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoutError {
  #[error("config: {0}")]
  Config(String),

  #[error("config file {path}: {source}")]
  ConfigFile {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("i/o: {0}")]
  Io(#[from] std::io::Error),

  #[error("http: {0}")]
  Http(#[from] reqwest::Error),

  #[error("http status {status} from {url}")]
  Status { status: u16, url: String },

  #[error("identity: {0}")]
  Identity(String),

  #[error("could not authenticate with {host} using {key}")]
  Connectivity { host: String, key: PathBuf },

  #[error("report: {0}")]
  Render(String),

  #[error("prompt: {0}")]
  Prompt(#[from] dialoguer::Error),

  #[error(transparent)]
  Engine(#[from] EngineError),
}

impl ScoutError {
  pub fn identity(msg: impl Into<String>) -> Self {
    Self::Identity(msg.into())
  }

  pub fn render(msg: impl Into<String>) -> Self {
    Self::Render(msg.into())
  }
}

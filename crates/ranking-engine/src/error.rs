//! Structured error types for the ranking engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("missing field: {0}")]
  MissingField(String),

  #[error("parse: {field}: {reason}")]
  Parse { field: String, reason: String },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl EngineError {
  pub fn missing(field: &str) -> Self {
    Self::MissingField(field.to_string())
  }

  pub fn parse(field: &str, reason: impl Into<String>) -> Self {
    Self::Parse {
      field: field.to_string(),
      reason: reason.into(),
    }
  }
}

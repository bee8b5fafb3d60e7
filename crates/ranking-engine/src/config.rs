//! Engine configuration with sane defaults.

use serde::{Deserialize, Serialize};

/// Relative weight of each score component. Sums to 1.0 by convention only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
  /// Recency of the last push.
  pub activity: f64,
  /// README reading ease.
  pub readability: f64,
  /// Issue ratio + commit frequency.
  pub health: f64,
  /// Log-scaled star count.
  pub popularity: f64,
  /// CI workflow presence.
  pub ci_cd: f64,
}

impl Weights {
  pub fn sum(&self) -> f64 {
    self.activity + self.readability + self.health + self.popularity + self.ci_cd
  }

  /// True when the weights add up to 1.0 (within float noise).
  pub fn is_normalized(&self) -> bool {
    (self.sum() - 1.0).abs() <= 1e-6
  }
}

impl Default for Weights {
  fn default() -> Self {
    Self {
      activity: 0.35,
      readability: 0.25,
      health: 0.20,
      popularity: 0.15,
      ci_cd: 0.05,
    }
  }
}

/// Tunables for enrichment and scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  pub weights: Weights,
}

impl Config {
  pub fn with_weights(weights: Weights) -> Self {
    if !weights.is_normalized() {
      tracing::warn!(sum = weights.sum(), "ranking weights do not sum to 1.0");
    }
    Self { weights }
  }
}

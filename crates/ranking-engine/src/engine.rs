//! Core engine: merges fetched pieces into scored, ranked records.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::Config;
use crate::health;
use crate::readability;
use crate::score;
use crate::types::*;

/// Stateless apart from its configuration; one per orchestration run.
#[derive(Debug, Clone)]
pub struct Engine {
  config: Config,
}

impl Engine {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// README text (if the fetch succeeded) to analysis.
  pub fn analyze_readme(&self, text: Option<&str>) -> ReadmeAnalysis {
    match text {
      Some(body) => ReadmeAnalysis::present(readability::analyze(body)),
      None => ReadmeAnalysis::missing(),
    }
  }

  /// Build the enriched record for one search item.
  ///
  /// Never fails: a missing detail record or missing keys leave `health`
  /// empty, and a score that cannot be computed becomes 0 with `degraded` set.
  pub fn enrich(
    &self,
    summary: RepositorySummary,
    detail: Option<RepositoryDetail>,
    readme: ReadmeAnalysis,
    now: DateTime<Utc>,
  ) -> EnrichedRepository {
    let mut detail = detail.unwrap_or_default();
    if detail.pushed_at.is_none() {
      detail.pushed_at = summary.pushed_at.clone();
    }

    let health = match health::compute(&detail, now) {
      Ok(h) => Some(h),
      Err(e) => {
        debug!(repo = %summary.full_name, error = %e, "health metrics unavailable");
        None
      }
    };

    let mut repo = EnrichedRepository {
      name: summary.name,
      full_name: summary.full_name,
      description: summary.description,
      stars: summary.stargazers_count,
      forks: summary.forks_count,
      pushed_at: detail.pushed_at,
      readme,
      health,
      metadata: RepositoryMetadata {
        license: detail.license.and_then(|l| l.name),
        ci_cd: detail.has_workflows,
        tests: detail.has_tests,
        stargazers_count: detail.stargazers_count,
      },
      score: 0.0,
      degraded: None,
    };

    match score::score(&repo, &self.config.weights) {
      Ok(s) => repo.score = s,
      Err(e) => {
        warn!(repo = %repo.full_name, error = %e, "scoring failed, using 0");
        repo.degraded = Some(e.to_string());
      }
    }
    repo
  }

  /// Sort in place, best first, ties in fetch order.
  pub fn rank(&self, repos: &mut [EnrichedRepository]) {
    score::rank(repos);
  }
}

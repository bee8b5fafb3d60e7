//! Orchestrator: connectivity gate → search → per-item enrichment → rank → report.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use ranking_engine::report;
use ranking_engine::{EnrichedRepository, Engine, RepositorySummary, SearchFilters};
use tracing::{info, warn};

use crate::error::ScoutError;
use crate::github::RepositorySource;
use crate::render::ReportRenderer;
use crate::settings::Settings;
use crate::ssh::ConnectivityGate;

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
  /// Best first.
  pub repos: Vec<EnrichedRepository>,
  /// Written report, absent when the search came back empty.
  pub report: Option<PathBuf>,
}

pub struct Scout<S, G, R> {
  source: S,
  gate: G,
  renderer: R,
  engine: Engine,
  max_results: usize,
  report_prefix: String,
}

impl<S, G, R> Scout<S, G, R>
where
  S: RepositorySource,
  G: ConnectivityGate,
  R: ReportRenderer,
{
  pub fn new(source: S, gate: G, renderer: R, settings: &Settings) -> Self {
    Self {
      source,
      gate,
      renderer,
      engine: Engine::new(settings.engine_config()),
      max_results: settings.max_results,
      report_prefix: settings.report_prefix.clone(),
    }
  }

  /// Fail-fast gate: a usable identity and one successful handshake.
  pub async fn preflight(&self) -> Result<(), ScoutError> {
    self.gate.ensure_identity().await?;
    if !self.gate.test_connection().await {
      let (host, key) = self.gate.describe();
      return Err(ScoutError::Connectivity { host, key });
    }
    info!("connectivity check passed");
    Ok(())
  }

  /// Search and enrich every candidate concurrently, then rank.
  ///
  /// Never fails: a failed search yields no candidates, a failed item fetch
  /// degrades only that item.
  pub async fn rank(&self, query: &str, filters: &SearchFilters, now: DateTime<Utc>) -> Vec<EnrichedRepository> {
    let summaries = match self.source.search(query, filters).await {
      Ok(items) => items,
      Err(e) => {
        warn!(error = %e, "search failed");
        Vec::new()
      }
    };

    let candidates: Vec<_> = summaries
      .into_iter()
      .take(self.max_results)
      .filter(|s| {
        let keep = filters.admits(s);
        if !keep {
          warn!(repo = %s.full_name, "dropping result that does not match the filters");
        }
        keep
      })
      .collect();
    info!(count = candidates.len(), "enriching candidates");

    let mut repos = join_all(candidates.into_iter().map(|s| self.enrich_one(s, now))).await;
    self.engine.rank(&mut repos);
    repos
  }

  async fn enrich_one(&self, summary: RepositorySummary, now: DateTime<Utc>) -> EnrichedRepository {
    let (detail, readme) = futures::join!(self.source.detail(&summary), self.source.readme(&summary));

    let detail = match detail {
      Ok(d) => Some(d),
      Err(e) => {
        warn!(repo = %summary.full_name, error = %e, "detail fetch failed");
        None
      }
    };
    let readme = match readme {
      Ok(text) => text,
      Err(e) => {
        warn!(repo = %summary.full_name, error = %e, "readme fetch failed");
        None
      }
    };

    let analysis = self.engine.analyze_readme(readme.as_deref());
    self.engine.enrich(summary, detail, analysis, now)
  }

  /// Render the report for one repository. `output` overrides the default file name.
  pub fn report(&self, top: &EnrichedRepository, output: Option<&Path>) -> Result<PathBuf, ScoutError> {
    let path = match output {
      Some(p) => p.to_path_buf(),
      None => PathBuf::from(report::default_file_name(&self.report_prefix, &top.name)),
    };
    let layout = report::layout(top);
    let written = self.renderer.render(&layout, &path)?;
    info!(path = %written.display(), "report written");
    Ok(written)
  }

  pub async fn run(
    &self,
    query: &str,
    filters: &SearchFilters,
    output: Option<&Path>,
    now: DateTime<Utc>,
  ) -> Result<RunOutcome, ScoutError> {
    self.preflight().await?;
    let repos = self.rank(query, filters, now).await;
    let report = match repos.first() {
      Some(top) => Some(self.report(top, output)?),
      None => None,
    };
    Ok(RunOutcome { repos, report })
  }
}

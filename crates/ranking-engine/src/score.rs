//! Composite 0–100 ranking score and stable ranking.

use serde::Serialize;

use crate::config::Weights;
use crate::error::EngineError;
use crate::types::{EnrichedRepository, ReadmeAnalysis};

/// Readability component when no README could be fetched.
pub const MISSING_README_READABILITY: f64 = 0.3;
/// CI/CD component when no workflow is detected.
pub const NO_CI_CD: f64 = 0.3;
/// Multiplier on ln(stars + 1).
pub const POPULARITY_SCALE: f64 = 0.4;

/// Per-signal values before weighting. Health and popularity are not bounded above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Components {
  pub activity: f64,
  pub readability: f64,
  pub health: f64,
  pub popularity: f64,
  pub ci_cd: f64,
}

impl Components {
  pub fn weighted_sum(&self, w: &Weights) -> f64 {
    self.activity * w.activity
      + self.readability * w.readability
      + self.health * w.health
      + self.popularity * w.popularity
      + self.ci_cd * w.ci_cd
  }
}

pub fn readability_component(readme: &ReadmeAnalysis) -> f64 {
  match &readme.metrics {
    Some(m) if readme.readme_exists => m.readability * 0.01,
    _ => MISSING_README_READABILITY,
  }
}

pub fn popularity_component(stars: u64) -> f64 {
  (stars as f64 + 1.0).ln() * POPULARITY_SCALE
}

pub fn ci_cd_component(has_workflows: bool) -> f64 {
  if has_workflows {
    1.0
  } else {
    NO_CI_CD
  }
}

/// Pre-scale every signal. Missing health metrics or CI flag is an error for this item.
pub fn components(repo: &EnrichedRepository) -> Result<Components, EngineError> {
  let health = repo.health.ok_or_else(|| EngineError::missing("health"))?;
  let has_workflows = repo
    .metadata
    .ci_cd
    .ok_or_else(|| EngineError::missing("has_workflows"))?;
  let stars = repo.metadata.stargazers_count.unwrap_or(repo.stars);

  Ok(Components {
    activity: health.activity_score as f64 * 0.01,
    readability: readability_component(&repo.readme),
    health: 0.5 * health.issue_ratio + 0.5 * health.commit_frequency,
    popularity: popularity_component(stars),
    ci_cd: ci_cd_component(has_workflows),
  })
}

/// Clamp a raw percentage into [0, 100]; NaN becomes 0.
pub fn clamp_score(raw: f64) -> f64 {
  if raw.is_nan() {
    return 0.0;
  }
  raw.clamp(0.0, 100.0)
}

pub fn score(repo: &EnrichedRepository, weights: &Weights) -> Result<f64, EngineError> {
  let parts = components(repo)?;
  Ok(clamp_score(100.0 * parts.weighted_sum(weights)))
}

/// Sort by score, highest first. Equal scores keep their fetch order.
pub fn rank(repos: &mut [EnrichedRepository]) {
  repos.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{HealthMetrics, ReadmeMetrics, RepositoryMetadata};

  fn repo(name: &str, score: f64) -> EnrichedRepository {
    EnrichedRepository {
      name: name.to_string(),
      full_name: format!("acme/{}", name),
      description: None,
      stars: 99,
      forks: 3,
      pushed_at: None,
      readme: ReadmeAnalysis::missing(),
      health: Some(HealthMetrics {
        activity_score: 90,
        issue_ratio: 1.0,
        commit_frequency: 1.0,
      }),
      metadata: RepositoryMetadata {
        license: None,
        ci_cd: Some(true),
        tests: None,
        stargazers_count: Some(99),
      },
      score,
      degraded: None,
    }
  }

  #[test]
  fn reference_scenario_scores_about_91_6() {
    let r = repo("demo", 0.0);
    let parts = components(&r).unwrap();
    assert!((parts.activity - 0.9).abs() < 1e-12);
    assert_eq!(parts.readability, 0.3);
    assert!((parts.health - 1.0).abs() < 1e-12);
    assert!((parts.popularity - 100f64.ln() * 0.4).abs() < 1e-12);
    assert_eq!(parts.ci_cd, 1.0);

    let s = score(&r, &Weights::default()).unwrap();
    assert!((s - 91.63).abs() < 0.01, "got {}", s);
  }

  #[test]
  fn missing_readme_is_always_point_three() {
    let mut r = repo("demo", 0.0);
    for stars in [0, 10, 1_000_000] {
      r.stars = stars;
      assert_eq!(components(&r).unwrap().readability, 0.3);
    }
  }

  #[test]
  fn readme_readability_is_scaled() {
    let mut r = repo("demo", 0.0);
    r.readme = ReadmeAnalysis::present(ReadmeMetrics {
      readability: 62.0,
      grade_level: "8th and 9th grade".to_string(),
      sections: 4,
    });
    assert!((components(&r).unwrap().readability - 0.62).abs() < 1e-12);
  }

  #[test]
  fn score_is_clamped_for_extreme_inputs() {
    let weights = Weights::default();
    let extremes = [
      (i64::MIN / 2, 0.0, 0.0, 0),
      (0, 0.0, 0.0, 0),
      (101, 1e9, 1e9, u64::MAX),
      (-50, -5.0, -5.0, 1),
    ];
    for (activity, ratio, freq, stars) in extremes {
      let mut r = repo("x", 0.0);
      r.health = Some(HealthMetrics {
        activity_score: activity,
        issue_ratio: ratio,
        commit_frequency: freq,
      });
      r.metadata.stargazers_count = Some(stars);
      let s = score(&r, &weights).unwrap();
      assert!((0.0..=100.0).contains(&s), "score {} out of range", s);
    }
    assert_eq!(clamp_score(f64::NAN), 0.0);
  }

  #[test]
  fn missing_health_or_ci_flag_is_an_error() {
    let mut r = repo("x", 0.0);
    r.health = None;
    assert!(matches!(score(&r, &Weights::default()), Err(EngineError::MissingField(f)) if f == "health"));

    let mut r = repo("x", 0.0);
    r.metadata.ci_cd = None;
    assert!(matches!(score(&r, &Weights::default()), Err(EngineError::MissingField(f)) if f == "has_workflows"));
  }

  #[test]
  fn detail_star_count_falls_back_to_summary() {
    let mut r = repo("x", 0.0);
    r.metadata.stargazers_count = None;
    r.stars = 0;
    assert_eq!(components(&r).unwrap().popularity, 0.0);
  }

  #[test]
  fn ranking_is_stable_for_ties() {
    let mut repos = vec![repo("a", 50.0), repo("b", 80.0), repo("c", 50.0), repo("d", 50.0)];
    rank(&mut repos);
    let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["b", "a", "c", "d"]);
  }
}

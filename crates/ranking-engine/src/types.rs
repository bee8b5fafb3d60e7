//! Core types for the ranking engine (platform JSON contracts + enriched records).

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Search filters
// ---------------------------------------------------------------------------

/// Optional qualifiers appended to the free-text search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
  pub min_stars: Option<u64>,
  pub license: Option<String>,
}

impl SearchFilters {
  /// Blank or whitespace-only licenses are treated as "no license filter".
  pub fn new(min_stars: Option<u64>, license: Option<&str>) -> Self {
    let license = license
      .map(str::trim)
      .filter(|l| !l.is_empty())
      .map(str::to_string);
    Self { min_stars, license }
  }

  /// Free text plus ` stars:>=N` and ` license:X` qualifiers.
  pub fn qualified_query(&self, query: &str) -> String {
    let mut q = query.trim().to_string();
    if let Some(n) = self.min_stars {
      q.push_str(&format!(" stars:>={}", n));
    }
    if let Some(license) = &self.license {
      q.push_str(&format!(" license:{}", license));
    }
    q
  }

  /// Whether a returned summary meets the star threshold.
  ///
  /// `license:` also accepts family keywords (`gpl`, `cc`, ...), so the
  /// platform's license matching is trusted as returned.
  pub fn admits(&self, repo: &RepositorySummary) -> bool {
    self.min_stars.map_or(true, |n| repo.stargazers_count >= n)
  }
}

// ---------------------------------------------------------------------------
// Inbound types (platform JSON contract). Unknown fields are ignored.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseInfo {
  #[serde(default)]
  pub key: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub spdx_id: Option<String>,
}

/// One item of the search endpoint's `items` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
  pub name: String,
  pub full_name: String,
  /// Per-repository detail endpoint.
  pub url: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub stargazers_count: u64,
  #[serde(default)]
  pub forks_count: u64,
  #[serde(default)]
  pub pushed_at: Option<String>,
  #[serde(default)]
  pub license: Option<LicenseInfo>,
}

/// Search endpoint response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
  #[serde(default)]
  pub items: Vec<RepositorySummary>,
}

impl SearchResponse {
  pub fn from_json(body: &str) -> Result<Self, EngineError> {
    Ok(serde_json::from_str(body)?)
  }
}

/// Extended fields from the per-repository endpoint. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryDetail {
  pub pushed_at: Option<String>,
  pub closed_issues: Option<u64>,
  pub open_issues: Option<u64>,
  pub commits: Option<u64>,
  pub age_days: Option<i64>,
  pub stargazers_count: Option<u64>,
  pub has_workflows: Option<bool>,
  pub has_tests: Option<bool>,
  pub license: Option<LicenseInfo>,
}

impl RepositoryDetail {
  pub fn from_json(body: &str) -> Result<Self, EngineError> {
    Ok(serde_json::from_str(body)?)
  }
}

// ---------------------------------------------------------------------------
// Derived metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadmeMetrics {
  /// Flesch reading ease.
  pub readability: f64,
  pub grade_level: String,
  /// Count of `#` characters.
  pub sections: usize,
}

/// README analysis. `readme_exists` is true exactly when `metrics` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadmeAnalysis {
  pub readme_exists: bool,
  #[serde(flatten, skip_serializing_if = "Option::is_none")]
  pub metrics: Option<ReadmeMetrics>,
}

impl ReadmeAnalysis {
  pub fn missing() -> Self {
    Self {
      readme_exists: false,
      metrics: None,
    }
  }

  pub fn present(metrics: ReadmeMetrics) -> Self {
    Self {
      readme_exists: true,
      metrics: Some(metrics),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthMetrics {
  /// 100 minus whole days since the last push, floored at 0.
  pub activity_score: i64,
  /// closed / open issues, 1 when nothing is open.
  pub issue_ratio: f64,
  /// Commits per day of repository age.
  pub commit_frequency: f64,
}

// ---------------------------------------------------------------------------
// Enriched record (what gets ranked and reported)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepositoryMetadata {
  pub license: Option<String>,
  pub ci_cd: Option<bool>,
  pub tests: Option<bool>,
  /// Star count reported by the detail endpoint.
  pub stargazers_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRepository {
  pub name: String,
  pub full_name: String,
  pub description: Option<String>,
  pub stars: u64,
  pub forks: u64,
  pub pushed_at: Option<String>,
  pub readme: ReadmeAnalysis,
  /// `None` when the detail record lacked the fields health needs.
  pub health: Option<HealthMetrics>,
  pub metadata: RepositoryMetadata,
  pub score: f64,
  /// Why the score fell back to 0, if it did.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub degraded: Option<String>,
}

//! Integration tests for the ranking engine.

use chrono::{DateTime, Duration, TimeZone, Utc};
use ranking_engine::report;
use ranking_engine::types::SearchResponse;
use ranking_engine::{Engine, ReadmeAnalysis, RepositoryDetail, SearchFilters};

fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap()
}

fn fixture_search() -> SearchResponse {
  let json = r#"{
    "total_count": 6,
    "items": [
      {"name": "alpha", "full_name": "acme/alpha", "url": "https://api.github.com/repos/acme/alpha",
       "description": "first", "stargazers_count": 5, "forks_count": 1,
       "license": {"key": "mit", "name": "MIT License", "spdx_id": "MIT"}},
      {"name": "bravo", "full_name": "acme/bravo", "url": "https://api.github.com/repos/acme/bravo",
       "description": null, "stargazers_count": 50, "forks_count": 2,
       "license": {"key": "apache-2.0", "name": "Apache License 2.0", "spdx_id": "Apache-2.0"}},
      {"name": "charlie", "full_name": "acme/charlie", "url": "https://api.github.com/repos/acme/charlie",
       "stargazers_count": 500, "forks_count": 3, "license": null},
      {"name": "delta", "full_name": "acme/delta", "url": "https://api.github.com/repos/acme/delta",
       "stargazers_count": 0, "forks_count": 0},
      {"name": "echo", "full_name": "acme/echo", "url": "https://api.github.com/repos/acme/echo",
       "stargazers_count": 5000, "forks_count": 40,
       "license": {"key": "mit", "name": "MIT License", "spdx_id": "MIT"}},
      {"name": "foxtrot", "full_name": "acme/foxtrot", "url": "https://api.github.com/repos/acme/foxtrot",
       "stargazers_count": 50, "forks_count": 9, "some_unknown_field": [1, 2, 3]}
    ]
  }"#;
  SearchResponse::from_json(json).unwrap()
}

fn reference_detail() -> RepositoryDetail {
  let pushed = (now() - Duration::days(10)).format("%Y-%m-%dT%H:%M:%SZ").to_string();
  let json = format!(
    r#"{{
      "pushed_at": "{}",
      "closed_issues": 5,
      "open_issues": 0,
      "commits": 30,
      "age_days": 30,
      "stargazers_count": 99,
      "has_workflows": true,
      "has_tests": false,
      "license": {{"name": "MIT License"}}
    }}"#,
    pushed
  );
  RepositoryDetail::from_json(&json).unwrap()
}

#[test]
fn reference_item_scores_91_6() {
  let engine = Engine::with_defaults();
  let summary = fixture_search().items.remove(0);
  let repo = engine.enrich(summary, Some(reference_detail()), ReadmeAnalysis::missing(), now());

  let health = repo.health.unwrap();
  assert_eq!(health.activity_score, 90);
  assert_eq!(health.issue_ratio, 1.0);
  assert_eq!(health.commit_frequency, 1.0);
  assert!((repo.score - 91.63).abs() < 0.01, "got {}", repo.score);
  assert!(repo.degraded.is_none());
  assert_eq!(repo.metadata.license.as_deref(), Some("MIT License"));
  assert_eq!(repo.metadata.tests, Some(false));
}

#[test]
fn star_filter_only_narrows() {
  let items = fixture_search().items;
  let mut previous = usize::MAX;
  for n in [0, 1, 5, 6, 50, 51, 500, 5000, 5001, u64::MAX] {
    let filters = SearchFilters::new(Some(n), None);
    let admitted: Vec<_> = items.iter().filter(|r| filters.admits(r)).collect();
    assert!(admitted.len() <= previous, "stars:>={} widened the result set", n);
    assert!(admitted.iter().all(|r| r.stargazers_count >= n));
    previous = admitted.len();
  }
  assert_eq!(previous, 0);
}

#[test]
fn license_filter_trusts_platform_results() {
  let items = fixture_search().items;
  let stars_only = SearchFilters::new(Some(5), None);
  let with_license = SearchFilters::new(Some(5), Some("gpl"));
  let a: Vec<_> = items.iter().filter(|r| stars_only.admits(r)).map(|r| r.name.as_str()).collect();
  let b: Vec<_> = items.iter().filter(|r| with_license.admits(r)).map(|r| r.name.as_str()).collect();
  assert_eq!(a, b);
  assert_eq!(b, ["alpha", "bravo", "charlie", "echo", "foxtrot"]);
}

#[test]
fn ties_keep_fetch_order_after_ranking() {
  let engine = Engine::with_defaults();
  // No detail anywhere: every item degrades to 0 and keeps its place.
  let mut repos: Vec<_> = fixture_search()
    .items
    .into_iter()
    .map(|s| engine.enrich(s, None, ReadmeAnalysis::missing(), now()))
    .collect();
  engine.rank(&mut repos);
  let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
  assert_eq!(names, ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"]);
}

#[test]
fn scored_item_outranks_degraded_ones() {
  let engine = Engine::with_defaults();
  let mut repos: Vec<_> = fixture_search()
    .items
    .into_iter()
    .enumerate()
    .map(|(i, s)| {
      let detail = (i == 3).then(reference_detail);
      engine.enrich(s, detail, ReadmeAnalysis::missing(), now())
    })
    .collect();
  engine.rank(&mut repos);
  assert_eq!(repos[0].name, "delta");
  assert!(repos[1..].iter().all(|r| r.score == 0.0 && r.degraded.is_some()));

  let layout = report::layout(&repos[0]);
  assert!(layout.lines().any(|l| l == "Description: No description"));
  assert!(layout.lines().any(|l| l == "License: MIT License"));
}

#[test]
fn deterministic_output_across_runs() {
  let engine = Engine::with_defaults();
  let run = || {
    let summary = fixture_search().items.remove(4);
    let readme = engine.analyze_readme(Some("# Echo\n\nEcho repeats input. Nothing more."));
    let repo = engine.enrich(summary, Some(reference_detail()), readme, now());
    serde_json::to_string(&repo).unwrap()
  };
  assert_eq!(run(), run());
}

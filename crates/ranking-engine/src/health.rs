//! Health metrics: push recency, issue resolution ratio, commit frequency.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::EngineError;
use crate::types::{HealthMetrics, RepositoryDetail};

/// Timestamp layout of `pushed_at` (UTC, seconds precision).
pub const PUSHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const SECONDS_PER_DAY: i64 = 86_400;

pub fn parse_pushed_at(raw: &str) -> Result<DateTime<Utc>, EngineError> {
  NaiveDateTime::parse_from_str(raw.trim(), PUSHED_AT_FORMAT)
    .map(|naive| naive.and_utc())
    .map_err(|e| EngineError::parse("pushed_at", e.to_string()))
}

/// Whole days from `then` to `now`, floored (a push in the future gives a negative age).
pub fn days_between(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
  (now - then).num_seconds().div_euclid(SECONDS_PER_DAY)
}

pub fn activity_score(age_days: i64) -> i64 {
  (100 - age_days).max(0)
}

pub fn issue_ratio(closed: u64, open: u64) -> f64 {
  if open > 0 {
    closed as f64 / open as f64
  } else {
    1.0
  }
}

pub fn commit_frequency(commits: u64, age_days: i64) -> f64 {
  commits as f64 / age_days.max(1) as f64
}

/// Compute health metrics from a detail record.
///
/// Fails with `MissingField` / `Parse` when a required key is absent or
/// malformed; callers treat that as "no health metrics" for the item.
pub fn compute(detail: &RepositoryDetail, now: DateTime<Utc>) -> Result<HealthMetrics, EngineError> {
  let pushed_at = detail
    .pushed_at
    .as_deref()
    .ok_or_else(|| EngineError::missing("pushed_at"))?;
  let closed = detail.closed_issues.ok_or_else(|| EngineError::missing("closed_issues"))?;
  let open = detail.open_issues.ok_or_else(|| EngineError::missing("open_issues"))?;
  let commits = detail.commits.ok_or_else(|| EngineError::missing("commits"))?;
  let age_days = detail.age_days.ok_or_else(|| EngineError::missing("age_days"))?;

  let since_push = days_between(parse_pushed_at(pushed_at)?, now);

  Ok(HealthMetrics {
    activity_score: activity_score(since_push),
    issue_ratio: issue_ratio(closed, open),
    commit_frequency: commit_frequency(commits, age_days),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
  }

  fn detail(pushed_at: DateTime<Utc>) -> RepositoryDetail {
    RepositoryDetail {
      pushed_at: Some(pushed_at.format(PUSHED_AT_FORMAT).to_string()),
      closed_issues: Some(5),
      open_issues: Some(0),
      commits: Some(30),
      age_days: Some(30),
      ..RepositoryDetail::default()
    }
  }

  #[test]
  fn ten_days_since_push_scores_ninety() {
    let metrics = compute(&detail(now() - Duration::days(10)), now()).unwrap();
    assert_eq!(metrics.activity_score, 90);
    assert_eq!(metrics.issue_ratio, 1.0);
    assert!((metrics.commit_frequency - 1.0).abs() < 1e-12);
  }

  #[test]
  fn stale_repository_floors_at_zero() {
    let metrics = compute(&detail(now() - Duration::days(400)), now()).unwrap();
    assert_eq!(metrics.activity_score, 0);
  }

  #[test]
  fn future_push_is_tolerated() {
    let metrics = compute(&detail(now() + Duration::hours(3)), now()).unwrap();
    assert_eq!(metrics.activity_score, 101);
  }

  #[test]
  fn no_open_issues_means_ratio_one() {
    for closed in [0, 1, 500] {
      assert_eq!(issue_ratio(closed, 0), 1.0);
    }
    assert_eq!(issue_ratio(6, 4), 1.5);
  }

  #[test]
  fn zero_age_uses_one_day() {
    assert_eq!(commit_frequency(12, 0), 12.0);
    assert_eq!(commit_frequency(12, -3), 12.0);
  }

  #[test]
  fn missing_key_is_reported_by_name() {
    let mut d = detail(now());
    d.commits = None;
    let err = compute(&d, now()).unwrap_err();
    assert!(err.to_string().contains("commits"), "got: {}", err);
  }

  #[test]
  fn malformed_timestamp_is_a_parse_error() {
    let mut d = detail(now());
    d.pushed_at = Some("yesterday".to_string());
    assert!(matches!(compute(&d, now()), Err(EngineError::Parse { .. })));
  }
}

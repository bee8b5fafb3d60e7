//! One-page report layout for the top-ranked repository.
//!
//! Layout only: positioned text runs in PDF points on an A4 page. Drawing them
//! is the renderer's job.

use serde::Serialize;

use crate::types::EnrichedRepository;

pub const PAGE_WIDTH_PT: f32 = 595.0;
pub const PAGE_HEIGHT_PT: f32 = 842.0;

const MARGIN_X: f32 = 50.0;
const METRIC_X: f32 = 70.0;
const TITLE_Y: f32 = 800.0;
const INFO_TOP_Y: f32 = 750.0;
const LINE_STEP: f32 = 25.0;
const HEADING_GAP: f32 = 30.0;
const METRICS_GAP: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
  Title,
  Heading,
  Body,
}

impl TextStyle {
  pub fn font_size(self) -> f32 {
    match self {
      Self::Title => 16.0,
      Self::Heading => 14.0,
      Self::Body => 12.0,
    }
  }

  pub fn is_bold(self) -> bool {
    !matches!(self, Self::Body)
  }
}

/// A single line of text anchored at (x, y), origin bottom-left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
  pub text: String,
  pub style: TextStyle,
  pub x: f32,
  pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLayout {
  pub title: String,
  pub runs: Vec<TextRun>,
}

impl ReportLayout {
  pub fn lines(&self) -> impl Iterator<Item = &str> {
    self.runs.iter().map(|r| r.text.as_str())
  }
}

/// Default output file name: `{prefix}_{name}_Report.pdf`.
pub fn default_file_name(prefix: &str, repo_name: &str) -> String {
  format!("{}_{}_Report.pdf", prefix, repo_name)
}

/// First ten characters of the push timestamp (the date part).
fn push_date(pushed_at: Option<&str>) -> String {
  match pushed_at {
    Some(ts) => ts.chars().take(10).collect(),
    None => "Unknown".to_string(),
  }
}

pub fn layout(repo: &EnrichedRepository) -> ReportLayout {
  let title = format!("Project Report: {}", repo.name);
  let mut runs = vec![TextRun {
    text: title.clone(),
    style: TextStyle::Title,
    x: MARGIN_X,
    y: TITLE_Y,
  }];

  let info = [
    format!(
      "Description: {}",
      repo.description.as_deref().filter(|d| !d.is_empty()).unwrap_or("No description")
    ),
    format!("Stars: {} | Forks: {}", repo.stars, repo.forks),
    format!("Last Updated: {}", push_date(repo.pushed_at.as_deref())),
    format!("License: {}", repo.metadata.license.as_deref().unwrap_or("Unknown")),
  ];

  let mut y = INFO_TOP_Y;
  for text in info {
    runs.push(TextRun {
      text,
      style: TextStyle::Body,
      x: MARGIN_X,
      y,
    });
    y -= LINE_STEP;
  }

  y -= HEADING_GAP;
  runs.push(TextRun {
    text: "Project Health Metrics:".to_string(),
    style: TextStyle::Heading,
    x: MARGIN_X,
    y,
  });

  let metrics: [(&str, Option<f64>); 3] = match repo.health {
    Some(h) => [
      ("Activity", Some(h.activity_score as f64)),
      ("Issue Management", Some(h.issue_ratio * 100.0)),
      ("Commit Frequency", Some(h.commit_frequency)),
    ],
    None => [("Activity", None), ("Issue Management", None), ("Commit Frequency", None)],
  };

  y -= METRICS_GAP;
  for (name, value) in metrics {
    let text = match value {
      Some(v) => format!("{}: {:.1}%", name, v),
      None => format!("{}: n/a", name),
    };
    runs.push(TextRun {
      text,
      style: TextStyle::Body,
      x: METRIC_X,
      y,
    });
    y -= LINE_STEP;
  }

  ReportLayout { title, runs }
}

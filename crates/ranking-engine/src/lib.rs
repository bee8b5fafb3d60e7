//! repo-scout Ranking Engine: deterministic scoring of repository search results.
//!
//! Takes search summaries, per-repository details and README text, derives
//! health and readability metrics, scores each candidate 0–100 with fixed
//! weights, ranks them, and lays out a one-page report for the winner.
//!
//! No network, no filesystem; every time-dependent step takes an explicit "now".

pub mod config;
pub mod engine;
pub mod error;
pub mod health;
pub mod readability;
pub mod report;
pub mod score;
pub mod types;

pub use config::{Config, Weights};
pub use engine::Engine;
pub use error::EngineError;
pub use report::ReportLayout;
pub use types::{
  EnrichedRepository, HealthMetrics, ReadmeAnalysis, RepositoryDetail, RepositorySummary, SearchFilters,
};

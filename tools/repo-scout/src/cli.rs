//! Command-line surface: flags, interactive prompts, ranked-list output.

use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use dialoguer::Input;
use ranking_engine::{EnrichedRepository, SearchFilters};

use crate::error::ScoutError;
use crate::github::GithubClient;
use crate::pipeline::Scout;
use crate::render::PdfRenderer;
use crate::settings::Settings;
use crate::ssh::SshIdentity;

#[derive(Debug, Parser)]
#[command(name = "repo-scout", version)]
#[command(about = "Search GitHub, rank matching projects, and report on the best one", long_about = None)]
pub struct Cli {
  /// Free-text search keywords (prompted when omitted)
  #[arg(short, long)]
  pub query: Option<String>,

  /// Only consider repositories with at least this many stars
  #[arg(long, value_name = "N")]
  pub min_stars: Option<u64>,

  /// License key to filter on, e.g. mit or apache-2.0
  #[arg(long)]
  pub license: Option<String>,

  /// Settings file (TOML)
  #[arg(short, long, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Number of search results to rank
  #[arg(long, value_name = "N")]
  pub max_results: Option<usize>,

  /// Per-request HTTP timeout
  #[arg(long, value_name = "SECS")]
  pub timeout: Option<u64>,

  /// Private key used for the connectivity check
  #[arg(long, value_name = "PATH")]
  pub ssh_key: Option<PathBuf>,

  /// Report file (defaults to a name derived from the top repository)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Rank only, skip the PDF report
  #[arg(long)]
  pub no_report: bool,

  /// Print the ranked records as JSON
  #[arg(long)]
  pub json: bool,

  /// Debug logging on stderr (RUST_LOG takes precedence)
  #[arg(short, long)]
  pub verbose: bool,
}

impl Cli {
  /// File settings with flag overrides applied.
  pub fn settings(&self) -> Result<Settings, ScoutError> {
    let mut settings = Settings::load(self.config.as_deref())?;
    if let Some(n) = self.max_results {
      settings.max_results = n;
    }
    if let Some(secs) = self.timeout {
      settings.api_timeout_secs = secs;
    }
    if let Some(key) = &self.ssh_key {
      settings.ssh_key = crate::settings::expand_home(key);
    }
    settings.validate()?;
    Ok(settings)
  }

  /// Query and filters from flags, prompting for what is missing.
  pub fn search_input(&self) -> Result<(String, SearchFilters), ScoutError> {
    if let Some(query) = &self.query {
      return Ok((query.clone(), SearchFilters::new(self.min_stars, self.license.as_deref())));
    }

    let query: String = Input::new().with_prompt("Enter search keywords").interact_text()?;

    let min_stars = match self.min_stars {
      Some(n) => n,
      None => {
        let raw: String = Input::new()
          .with_prompt("Minimum stars (0 for any)")
          .allow_empty(true)
          .validate_with(|s: &String| parse_min_stars(s).map(|_| ()))
          .interact_text()?;
        parse_min_stars(&raw).map_err(ScoutError::Config)?
      }
    };

    let license = match &self.license {
      Some(l) => l.clone(),
      None => Input::new()
        .with_prompt("License type (optional)")
        .allow_empty(true)
        .interact_text()?,
    };

    Ok((query, SearchFilters::new(Some(min_stars), Some(&license))))
  }
}

/// Blank means 0.
pub fn parse_min_stars(raw: &str) -> Result<u64, String> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(0);
  }
  raw
    .parse()
    .map_err(|_| format!("'{}' is not a non-negative whole number", raw))
}

/// `rank. name (score/100)` then an indented stars / health line per repository.
pub fn format_ranked(repos: &[EnrichedRepository]) -> String {
  let mut out = String::new();
  for (i, repo) in repos.iter().enumerate() {
    let health = match repo.health {
      Some(h) => format!("{:.1}%", h.activity_score as f64),
      None => "n/a".to_string(),
    };
    let _ = writeln!(out, "{}. {} ({:.1}/100)", i + 1, repo.name, repo.score);
    let _ = writeln!(out, "   Stars: {} | Health: {}", repo.stars, health);
  }
  out
}

/// Completion notice. Goes to stderr under `--json` so stdout holds only the array.
pub fn report_notice<'a>(json: bool, out: &'a mut dyn io::Write, err: &'a mut dyn io::Write) -> io::Result<()> {
  let target = if json { err } else { out };
  writeln!(target, "Report generated successfully!")
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
  let settings = cli.settings()?;
  let client = GithubClient::new(&settings)?;
  let gate = SshIdentity::from_settings(&settings);
  let scout = Scout::new(client, gate, PdfRenderer, &settings);

  scout.preflight().await.context("Failed to connect to GitHub")?;

  let (query, filters) = cli.search_input()?;
  let repos = scout.rank(&query, &filters, Utc::now()).await;

  if cli.json {
    println!("{}", serde_json::to_string_pretty(&repos)?);
  } else if repos.is_empty() {
    println!("No repositories found.");
  } else {
    println!("\nResults:");
    print!("{}", format_ranked(&repos));
  }

  if cli.no_report {
    return Ok(());
  }
  if let Some(top) = repos.first() {
    let path = scout.report(top, cli.output.as_deref())?;
    eprintln!("{} {}", console::style("Report:").bold(), path.display());
    report_notice(cli.json, &mut io::stdout(), &mut io::stderr())?;
  }
  Ok(())
}

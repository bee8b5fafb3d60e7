//! Binary entrypoint: connectivity gate, prompts, ranked list on stdout, PDF report.

use clap::Parser;
use repo_scout::cli::{self, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  if let Err(e) = run_binary(cli) {
    eprintln!("{} {:#}", console::style("repo-scout error:").red().bold(), e);
    std::process::exit(1);
  }
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
  let fallback = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .compact()
    .init();
}

fn run_binary(cli: Cli) -> anyhow::Result<()> {
  let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
  runtime.block_on(cli::run(cli))
}

//! repo-scout: search GitHub, rank candidates, report on the winner.
//!
//! The binary wires a `GithubClient`, an `SshIdentity` gate and a
//! `PdfRenderer` into a `Scout`; tests swap any of them for fakes.

pub mod cli;
pub mod error;
pub mod github;
pub mod pipeline;
pub mod render;
pub mod settings;
pub mod ssh;

pub use error::ScoutError;
pub use github::{GithubClient, RepositorySource};
pub use pipeline::{RunOutcome, Scout};
pub use render::{PdfRenderer, ReportRenderer};
pub use settings::Settings;
pub use ssh::{ConnectivityGate, SshIdentity};

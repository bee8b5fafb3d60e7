//! SSH identity: create the key pair if needed, then check GitHub accepts it.
//!
//! Key generation and the handshake are delegated to `ssh-keygen` and `ssh`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{info, warn};

use crate::error::ScoutError;
use crate::settings::Settings;

/// Substring GitHub prints on stderr after a successful `ssh -T`.
const AUTH_SUCCESS_MARKER: &str = "successfully authenticated";

/// Startup gate run before any search request.
#[async_trait]
pub trait ConnectivityGate: Send + Sync {
  /// Make sure a usable key exists. Failure is fatal.
  async fn ensure_identity(&self) -> Result<(), ScoutError>;

  /// One authenticated handshake. No retries.
  async fn test_connection(&self) -> bool;

  fn describe(&self) -> (String, PathBuf);
}

pub struct SshIdentity {
  key_path: PathBuf,
  host: String,
  timeout: Duration,
}

impl SshIdentity {
  pub fn new(key_path: impl Into<PathBuf>, host: impl Into<String>, timeout: Duration) -> Self {
    Self {
      key_path: key_path.into(),
      host: host.into(),
      timeout,
    }
  }

  pub fn from_settings(settings: &Settings) -> Self {
    Self::new(&settings.ssh_key, &settings.ssh_host, settings.connect_timeout())
  }

  pub fn key_path(&self) -> &Path {
    &self.key_path
  }

  async fn generate_keys(&self) -> Result<(), ScoutError> {
    if let Some(parent) = self.key_path.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    info!(path = %self.key_path.display(), "generating ed25519 key pair");

    let mut cmd = Command::new("ssh-keygen");
    cmd
      .args(["-t", "ed25519", "-N", "", "-q", "-f"])
      .arg(&self.key_path)
      .stdin(Stdio::null());
    let status = cmd
      .status()
      .await
      .map_err(|e| ScoutError::identity(format!("cannot run ssh-keygen: {}", e)))?;

    if !status.success() {
      return Err(ScoutError::identity(format!("ssh-keygen exited with {}", status)));
    }
    Ok(())
  }
}

/// Owner read/write only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), ScoutError> {
  use std::os::unix::fs::PermissionsExt;
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
  Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), ScoutError> {
  Ok(())
}

/// Whether `ssh -T` diagnostics report a successful authentication.
pub fn handshake_succeeded(stderr: &str) -> bool {
  stderr.contains(AUTH_SUCCESS_MARKER)
}

#[async_trait]
impl ConnectivityGate for SshIdentity {
  async fn ensure_identity(&self) -> Result<(), ScoutError> {
    if !self.key_path.exists() {
      self.generate_keys().await?;
    }
    restrict_permissions(&self.key_path)
  }

  async fn test_connection(&self) -> bool {
    let mut cmd = Command::new("ssh");
    cmd
      .arg("-T")
      .arg("-i")
      .arg(&self.key_path)
      .arg(&self.host)
      .stdin(Stdio::null())
      .kill_on_drop(true);

    match tokio::time::timeout(self.timeout, cmd.output()).await {
      Ok(Ok(out)) => handshake_succeeded(&String::from_utf8_lossy(&out.stderr)),
      Ok(Err(e)) => {
        warn!(error = %e, "cannot run ssh");
        false
      }
      Err(_) => {
        warn!(host = %self.host, timeout = ?self.timeout, "ssh handshake timed out");
        false
      }
    }
  }

  fn describe(&self) -> (String, PathBuf) {
    (self.host.clone(), self.key_path.clone())
  }
}

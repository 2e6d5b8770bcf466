use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use mockall::automock;

use crate::platform::exec::exec_blocking;
use crate::platform::exec::ExecOptions;
use crate::platform::runtime::resolve_executable;

/// PackageManager abstraction instance
pub type PackageManagerRef = Arc<dyn PackageManager + Send + Sync>;

/// The two package manager operations an install needs. Both run to
/// completion before returning.
#[automock]
pub trait PackageManager {
  /// Pack the package in `package_dir`, leaving the archive in that directory
  fn pack(&self, package_dir: &Path) -> anyhow::Result<()>;

  /// Copy-install `archive` into the package in `destination_dir` without
  /// recording it in the destination's package.json
  fn install_archive(&self, destination_dir: &Path, archive: &Path) -> anyhow::Result<()>;
}

#[derive(Debug, Clone)]
pub struct NpmPackageManager {
  executable: String,
  timeout: Option<Duration>,
  env: HashMap<String, String>,
}

impl NpmPackageManager {
  pub fn new<S: Into<String>>(executable: S) -> Self {
    Self {
      executable: executable.into(),
      timeout: None,
      env: HashMap::new(),
    }
  }

  pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.timeout = timeout;
    self
  }

  /// Extra environment for every npm invocation, e.g. `npm_config_cache`
  pub fn with_env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
    self.env.insert(key.into(), value.into());
    self
  }

  fn options(&self, cwd: &Path) -> ExecOptions {
    ExecOptions {
      cwd: Some(cwd.to_path_buf()),
      silent: true,
      env: if self.env.is_empty() {
        None
      } else {
        Some(self.env.clone())
      },
      timeout: self.timeout,
    }
  }
}

impl PackageManager for NpmPackageManager {
  fn pack(&self, package_dir: &Path) -> anyhow::Result<()> {
    let npm = resolve_executable(&self.executable)?;
    log::info!("Packing {}", package_dir.display());
    exec_blocking(
      [npm.as_os_str(), OsStr::new("pack"), OsStr::new("--silent")],
      &self.options(package_dir),
    )
  }

  fn install_archive(&self, destination_dir: &Path, archive: &Path) -> anyhow::Result<()> {
    let npm = resolve_executable(&self.executable)?;
    log::info!(
      "Installing {} into {}",
      archive.display(),
      destination_dir.display()
    );
    exec_blocking(
      [
        npm.as_os_str(),
        OsStr::new("install"),
        archive.as_os_str(),
        OsStr::new("--no-save"),
        OsStr::new("--no-audit"),
        OsStr::new("--no-fund"),
      ],
      &self.options(destination_dir),
    )
  }
}

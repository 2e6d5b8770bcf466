use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use crate::env::Env;
use crate::error::InstallResult;
use crate::error::NotAPackageError;
use crate::error::PackageRole;
use crate::error::ValidationError;
use crate::package_manager::PackageManagerRef;
use crate::platform::archive::PackedArchive;
use crate::platform::package_json::PackageJson;
use crate::platform::package_json::PACKAGE_JSON;
use crate::platform::path_ext::*;

/// Outcome of a successful install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
  pub local_package: PathBuf,
  pub destination: PathBuf,
  /// Where the archive was packed to; it no longer exists
  pub archive: PathBuf,
}

/// Packs a local package and installs the archive into a destination package
/// as a regular (copied, not linked) dependency.
///
/// Relative paths are resolved against `cwd`, which is also the destination
/// when none is given. Each package manager command receives its own working
/// directory; the process working directory is never changed.
pub struct Installer {
  cwd: PathBuf,
  package_manager: PackageManagerRef,
}

impl Installer {
  pub fn new(cwd: PathBuf, package_manager: PackageManagerRef) -> Self {
    Self {
      cwd,
      package_manager,
    }
  }

  pub fn from_env(env: &Env) -> Self {
    Self::new(env.pwd.clone(), Arc::new(env.package_manager()))
  }

  pub fn cwd(&self) -> &Path {
    &self.cwd
  }

  pub fn install(
    &self,
    local_package: Option<&OsStr>,
    destination: Option<&OsStr>,
  ) -> InstallResult<Installation> {
    let (local_package, destination) = self.resolve_paths(local_package, destination)?;
    log::info!("Local package: {}", local_package.display());
    log::info!("Destination: {}", destination.display());

    check_packages(&local_package, &destination)?;

    let package_json = PackageJson::parse_from_file(local_package.join(PACKAGE_JSON))?;
    let archive_name = package_json
      .archive_file_name()
      .with_context(|| format!("Unable to pack {}", local_package.display()))?;
    let archive = PackedArchive::new(local_package.join(archive_name));

    self.package_manager.pack(&local_package)?;

    if !archive
      .exists()
      .with_context(|| format!("Unable to access {}", archive.path().display()))?
    {
      return Err(
        anyhow::anyhow!(
          "Packing {} did not produce {}",
          local_package.display(),
          archive.path().display()
        )
        .into(),
      );
    }

    self
      .package_manager
      .install_archive(&destination, archive.path())?;

    let archive_path = archive.path().to_path_buf();
    archive
      .remove()
      .with_context(|| format!("Unable to remove {}", archive_path.display()))?;

    log::info!("Installed {}", archive_path.display());

    Ok(Installation {
      local_package,
      destination,
      archive: archive_path,
    })
  }

  /// Validate the raw arguments and resolve them to absolute paths
  fn resolve_paths(
    &self,
    local_package: Option<&OsStr>,
    destination: Option<&OsStr>,
  ) -> Result<(PathBuf, PathBuf), ValidationError> {
    let local_package = match local_package {
      None => return Err(ValidationError::LocalPackageRequired),
      Some(value) if value.is_empty() => return Err(ValidationError::LocalPackageRequired),
      Some(value) => value
        .as_text()
        .ok_or(ValidationError::LocalPackageNotString)?,
    };

    let destination = match destination {
      None => None,
      Some(value) if value.is_empty() => None,
      Some(value) => Some(
        value
          .as_text()
          .ok_or(ValidationError::DestinationNotString)?,
      ),
    };

    let local_package = resolve_path(&self.cwd, local_package);
    let destination = match destination {
      Some(destination) => resolve_path(&self.cwd, destination),
      None => self.cwd.clone(),
    };

    Ok((local_package, destination))
  }
}

/// Both directories are checked concurrently; when both fail the local
/// package is reported.
fn check_packages(local_package: &Path, destination: &Path) -> InstallResult<()> {
  let (local_check, destination_check) = rayon::join(
    || check_package(PackageRole::Local, local_package),
    || check_package(PackageRole::Destination, destination),
  );
  local_check?;
  destination_check?;
  Ok(())
}

/// The package.json must sit directly in `dir`. Ancestors are never searched
/// so npm can't end up running against a different package.
fn check_package(role: PackageRole, dir: &Path) -> InstallResult<()> {
  let package_json = dir.join(PACKAGE_JSON);
  match fs::metadata(&package_json) {
    Ok(_) => Ok(()),
    Err(err) if matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
      log::debug!("check:missing: {:?}", package_json);
      Err(
        NotAPackageError {
          role,
          path: dir.to_path_buf(),
          source: err,
        }
        .into(),
      )
    }
    Err(err) => Err(
      anyhow::Error::new(err)
        .context(format!("Unable to access {}", package_json.display()))
        .into(),
    ),
  }
}

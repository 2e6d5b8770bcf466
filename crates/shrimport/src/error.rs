use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// First line of every operational error message
pub static OP_ERROR_PREAMBLE: &str = "🦐📦 shrimport — Failed to install your local package!";

/// Malformed or missing input paths, detected before any I/O
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
  #[error("local package path is required!")]
  LocalPackageRequired,

  #[error("local package path must be a string")]
  LocalPackageNotString,

  #[error("destination path must be a string")]
  DestinationNotString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageRole {
  Local,
  Destination,
}

impl fmt::Display for PackageRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackageRole::Local => write!(f, "Local package"),
      PackageRole::Destination => write!(f, "Destination package"),
    }
  }
}

/// A directory without a package.json at its root
#[derive(Error, Debug)]
#[error("{} at {} isn't a package (no package.json found)", .role, .path.display())]
pub struct NotAPackageError {
  pub role: PackageRole,
  /// The resolved directory that was checked
  pub path: PathBuf,
  #[source]
  pub source: std::io::Error,
}

#[derive(Error, Debug)]
pub enum OperationalCause {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  NotAPackage(#[from] NotAPackageError),
}

/// Anticipated failure with a stable, user-facing message
#[derive(Error, Debug)]
#[error("{}\n{}", OP_ERROR_PREAMBLE, .cause)]
pub struct OpError {
  #[source]
  pub cause: OperationalCause,
}

impl OpError {
  pub fn new(cause: impl Into<OperationalCause>) -> Self {
    Self {
      cause: cause.into(),
    }
  }
}

impl From<ValidationError> for OpError {
  fn from(err: ValidationError) -> Self {
    Self::new(err)
  }
}

impl From<NotAPackageError> for OpError {
  fn from(err: NotAPackageError) -> Self {
    Self::new(err)
  }
}

pub type InstallResult<T> = std::result::Result<T, InstallError>;

#[derive(Error, Debug)]
pub enum InstallError {
  #[error(transparent)]
  Operational(#[from] OpError),

  /// Anything not anticipated, surfaced as-is
  #[error(transparent)]
  Unexpected(#[from] anyhow::Error),
}

impl InstallError {
  pub fn is_operational(&self) -> bool {
    matches!(self, Self::Operational(_))
  }
}

impl From<ValidationError> for InstallError {
  fn from(err: ValidationError) -> Self {
    Self::Operational(err.into())
  }
}

impl From<NotAPackageError> for InstallError {
  fn from(err: NotAPackageError) -> Self {
    Self::Operational(err.into())
  }
}

#[cfg(test)]
mod tests {
  use std::error::Error;
  use std::io;

  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn preamble_text() {
    assert_eq!(
      OP_ERROR_PREAMBLE,
      "🦐📦 shrimport — Failed to install your local package!"
    );
  }

  #[test]
  fn validation_errors_are_prefixed_with_preamble() {
    let err = OpError::from(ValidationError::LocalPackageRequired);

    assert_eq!(
      err.to_string(),
      format!("{OP_ERROR_PREAMBLE}\nlocal package path is required!")
    );
  }

  #[test]
  fn not_a_package_names_the_side_and_path() {
    let err = NotAPackageError {
      role: PackageRole::Destination,
      path: PathBuf::from("/some/dest"),
      source: io::Error::from(io::ErrorKind::NotFound),
    };

    assert_eq!(
      err.to_string(),
      "Destination package at /some/dest isn't a package (no package.json found)"
    );
  }

  #[test]
  fn op_error_keeps_the_original_cause() {
    let err = OpError::from(NotAPackageError {
      role: PackageRole::Local,
      path: PathBuf::from("/some/local"),
      source: io::Error::from(io::ErrorKind::NotFound),
    });

    let cause = err.source().expect("cause");
    let io_err = cause
      .source()
      .and_then(|e| e.downcast_ref::<io::Error>())
      .expect("io error");
    assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
  }

  #[test]
  fn unexpected_errors_are_not_embellished() {
    let err = InstallError::from(anyhow::anyhow!("boom"));

    assert!(!err.is_operational());
    assert_eq!(err.to_string(), "boom");
  }
}

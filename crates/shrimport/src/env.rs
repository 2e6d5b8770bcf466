use std::path::PathBuf;
use std::time::Duration;

use crate::package_manager::NpmPackageManager;

pub static ENV_NPM: &str = "SHRIMPORT_NPM";
pub static ENV_TIMEOUT: &str = "SHRIMPORT_TIMEOUT";

/// Snapshot of the process environment taken once at startup
#[derive(Debug, Clone)]
pub struct Env {
  pub pwd: PathBuf,
  /// $SHRIMPORT_NPM (default "npm")
  pub npm: String,
  /// $SHRIMPORT_TIMEOUT in seconds (default none)
  pub timeout: Option<Duration>,
}

impl Env {
  pub fn parse() -> anyhow::Result<Self> {
    let pwd = std::env::current_dir()?;

    Ok(Self {
      pwd,
      npm: match std::env::var(ENV_NPM) {
        Ok(npm) if !npm.trim().is_empty() => npm,
        _ => "npm".to_string(),
      },
      timeout: match std::env::var(ENV_TIMEOUT) {
        Ok(timeout) => parse_timeout(&timeout)?,
        Err(_) => None,
      },
    })
  }

  pub fn package_manager(&self) -> NpmPackageManager {
    NpmPackageManager::new(&self.npm).with_timeout(self.timeout)
  }
}

fn parse_timeout(value: &str) -> anyhow::Result<Option<Duration>> {
  let value = value.trim();
  if value.is_empty() {
    return Ok(None);
  }
  match value.parse::<u64>() {
    Ok(0) => Ok(None),
    Ok(seconds) => Ok(Some(Duration::from_secs(seconds))),
    Err(_) => Err(anyhow::anyhow!(
      "${} must be a whole number of seconds, got \"{}\"",
      ENV_TIMEOUT,
      value
    )),
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn timeout_in_seconds() {
    assert_eq!(parse_timeout("30").unwrap(), Some(Duration::from_secs(30)));
    assert_eq!(parse_timeout(" 5 ").unwrap(), Some(Duration::from_secs(5)));
  }

  #[test]
  fn empty_or_zero_timeout_disables_it() {
    assert_eq!(parse_timeout("").unwrap(), None);
    assert_eq!(parse_timeout("0").unwrap(), None);
  }

  #[test]
  fn malformed_timeout_is_an_error() {
    assert_eq!(
      parse_timeout("soon").map_err(|e| e.to_string()),
      Err("$SHRIMPORT_TIMEOUT must be a whole number of seconds, got \"soon\"".to_string())
    );
  }
}

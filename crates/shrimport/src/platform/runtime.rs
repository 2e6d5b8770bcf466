use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;

/// Locate the package manager executable. Absolute paths are used as given,
/// anything else is looked up on `PATH`.
pub fn resolve_executable<S: AsRef<str>>(executable: S) -> anyhow::Result<PathBuf> {
  let executable = executable.as_ref();
  let runtime = if Path::new(executable).is_absolute() {
    PathBuf::from(executable)
  } else {
    which::which(executable)
      .with_context(|| format!("Cannot find package manager executable \"{executable}\""))?
  };
  if !std::fs::exists(&runtime)? {
    return Err(anyhow::anyhow!(
      "Cannot find package manager executable {}",
      runtime.display()
    ));
  }
  Ok(runtime)
}

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

pub static PACKAGE_JSON: &str = "package.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
  pub name: Option<String>,
  pub version: Option<String>,
}

impl PackageJson {
  pub fn parse<S: AsRef<str>>(input: S) -> anyhow::Result<Self> {
    Ok(serde_json::from_str(input.as_ref())?)
  }

  pub fn parse_from_file<P: AsRef<Path>>(input: P) -> anyhow::Result<Self> {
    let input = input.as_ref();
    let contents =
      fs::read_to_string(input).with_context(|| format!("Unable to read {}", input.display()))?;
    Self::parse(contents).with_context(|| format!("Unable to parse {}", input.display()))
  }

  /// Name of the archive `npm pack` writes for this package
  ///
  /// Scoped names lose the leading `@` and have the `/` replaced, so
  /// `@scope/name@1.0.0` packs to `scope-name-1.0.0.tgz`.
  pub fn archive_file_name(&self) -> anyhow::Result<String> {
    let Some(name) = self.name.as_deref().filter(|v| !v.is_empty()) else {
      return Err(anyhow::anyhow!("package.json has no \"name\""));
    };
    let Some(version) = self.version.as_deref().filter(|v| !v.is_empty()) else {
      return Err(anyhow::anyhow!("package.json has no \"version\""));
    };

    let name = name.strip_prefix('@').unwrap_or(name).replace('/', "-");
    Ok(format!("{}-{}.tgz", name, version.trim()))
  }
}

use std::ffi::OsStr;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

pub trait OsStrExt {
  /// The value as text, or None when it is not valid unicode
  fn as_text(&self) -> Option<&str>;
}

impl OsStrExt for OsStr {
  fn as_text(&self) -> Option<&str> {
    self.to_str()
  }
}

/// Resolve `path` against `cwd` into an absolute path with `.` and `..`
/// removed. Purely lexical; symlinks are not followed and the path does not
/// need to exist.
pub fn resolve_path<C: AsRef<Path>, P: AsRef<Path>>(cwd: C, path: P) -> PathBuf {
  let path = path.as_ref();
  let mut result = if path.is_absolute() {
    vec![]
  } else {
    cwd.as_ref().components().collect::<Vec<Component<'_>>>()
  };

  for component in path.components() {
    match component {
      Component::Prefix(prefix) => {
        result = vec![Component::Prefix(prefix)];
      }
      Component::RootDir => {
        result.push(Component::RootDir);
      }
      Component::CurDir => {}
      Component::ParentDir => {
        // Never pop past the root
        if matches!(result.last(), Some(Component::Normal(_))) {
          result.pop();
        }
      }
      Component::Normal(part) => {
        result.push(Component::Normal(part));
      }
    }
  }

  PathBuf::from_iter(result)
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[cfg(unix)]
  #[test]
  fn resolves_relative_paths_against_cwd() {
    assert_eq!(
      resolve_path("/work/dest", "../local-a"),
      PathBuf::from("/work/local-a")
    );
    assert_eq!(resolve_path("/work/dest", "."), PathBuf::from("/work/dest"));
    assert_eq!(
      resolve_path("/work/dest", "./pkg/./nested/"),
      PathBuf::from("/work/dest/pkg/nested")
    );
  }

  #[cfg(unix)]
  #[test]
  fn absolute_paths_ignore_cwd() {
    assert_eq!(
      resolve_path("/work/dest", "/completely/nonexistent/../path"),
      PathBuf::from("/completely/path")
    );
  }

  #[cfg(unix)]
  #[test]
  fn parent_of_root_is_root() {
    assert_eq!(resolve_path("/", "../../a"), PathBuf::from("/a"));
  }

  #[cfg(unix)]
  #[test]
  fn non_unicode_values_are_not_text() {
    use std::os::unix::ffi::OsStrExt as _;

    assert_eq!(OsStr::from_bytes(b"local\xff").as_text(), None);
    assert_eq!(OsStr::new("local").as_text(), Some("local"));
  }
}

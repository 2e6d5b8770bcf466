use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

/// Archive produced by packing the local package
///
/// The file is deleted when the guard is dropped, so an early return after
/// packing never leaves it behind. Use [`PackedArchive::remove`] when the
/// deletion error matters.
#[derive(Debug)]
pub struct PackedArchive {
  path: PathBuf,
  removed: bool,
}

impl PackedArchive {
  pub fn new(path: PathBuf) -> Self {
    Self {
      path,
      removed: false,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn exists(&self) -> io::Result<bool> {
    fs::exists(&self.path)
  }

  pub fn remove(mut self) -> io::Result<()> {
    self.removed = true;
    log::debug!("remv:file: {:?}", self.path);
    fs::remove_file(&self.path)
  }
}

impl Drop for PackedArchive {
  fn drop(&mut self) {
    if self.removed {
      return;
    }
    if fs::remove_file(&self.path).is_ok() {
      log::debug!("remv:file:dropped: {:?}", self.path);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn drop_deletes_the_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a-1.0.0.tgz");
    fs::write(&path, b"archive").unwrap();

    drop(PackedArchive::new(path.clone()));

    assert!(!path.exists());
  }

  #[test]
  fn drop_tolerates_a_missing_archive() {
    let dir = tempfile::tempdir().unwrap();

    drop(PackedArchive::new(dir.path().join("never-packed-1.0.0.tgz")));
  }

  #[test]
  fn remove_reports_a_missing_archive() {
    let dir = tempfile::tempdir().unwrap();
    let archive = PackedArchive::new(dir.path().join("never-packed-1.0.0.tgz"));

    let err = archive.remove().unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::NotFound);
  }
}

//! Install a local package into another package as though it had been
//! published and installed from the registry.
//!
//! npm's `link` shares one copy of the package through a symlink, so the
//! linked package resolves its own dependencies from its own tree. shrimport
//! runs `npm pack` in the local package and installs the resulting archive
//! into the destination instead, giving the same layout a real install would.

pub mod env;
pub mod error;
pub mod installer;
pub mod package_manager;
pub mod platform;

pub use error::InstallError;
pub use error::OpError;
pub use installer::Installation;
pub use installer::Installer;
pub use package_manager::NpmPackageManager;
pub use package_manager::PackageManager;
pub use package_manager::PackageManagerRef;

//! Platform-specific packaging procedures.
//!
//! One module per host platform, each a linear sequence of side-effecting
//! steps. Failure of any step aborts the run; there is no partial success.

pub mod linux;
pub mod macos;
pub mod windows;

use crate::bundler::error::{Error, Result};

/// Kind of distributable artifact a run produces.
///
/// Exactly one per run, selected from the host platform.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PackageType {
    /// Windows redistributable zip archive
    Zip,
    /// Linux AppImage
    AppImage,
    /// macOS compressed disk image
    Dmg,
}

impl PackageType {
    /// Selects the package type for the host platform.
    pub fn host() -> Result<Self> {
        if cfg!(target_os = "windows") {
            Ok(PackageType::Zip)
        } else if cfg!(target_os = "linux") {
            Ok(PackageType::AppImage)
        } else if cfg!(target_os = "macos") {
            Ok(PackageType::Dmg)
        } else {
            Err(Error::GenericError(format!(
                "unsupported host platform: {}",
                std::env::consts::OS
            )))
        }
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PackageType::Zip => "zip",
            PackageType::AppImage => "AppImage",
            PackageType::Dmg => "dmg",
        };
        write!(f, "{}", name)
    }
}
